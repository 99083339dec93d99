//! Launch sequencing for the service process.

use std::sync::Arc;

use tracing::{info, warn};

use chanscope_config::Config;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::youtube::{ChannelSource, UpstreamError, YouTubeClient};

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Runs the service with the production collaborators until a termination
/// signal arrives.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap fails, the listener cannot be
/// started or joined, or signal handlers cannot be installed.
pub fn run_daemon() -> Result<(), LaunchError> {
    run_daemon_with(
        &SystemConfigLoader,
        Arc::new(StructuredHealthReporter::new()),
        YouTubeClient::from_config,
        &SystemShutdownSignal,
    )
}

/// Runs the service with injected collaborators.
pub(crate) fn run_daemon_with<S, F>(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    connect: F,
    shutdown: &dyn ShutdownSignal,
) -> Result<(), LaunchError>
where
    S: ChannelSource + 'static,
    F: FnOnce(&Config) -> Result<S, UpstreamError>,
{
    let daemon = bootstrap_with(loader, reporter, connect)?;
    let service = daemon.start()?;
    info!(
        target: PROCESS_TARGET,
        endpoint = %service.endpoint(),
        "service running"
    );

    let waited = shutdown.wait();
    if let Err(error) = &waited {
        warn!(target: PROCESS_TARGET, %error, "shutdown listener failed; stopping");
    }
    service.stop()?;
    waited?;
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
