//! Test suites for the channel statistics service.

pub(crate) mod support;
