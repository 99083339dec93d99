//! Test helpers for the transport module.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::thread;
use std::time::Duration;

use super::{ConnectionHandler, ConnectionStream};

pub(crate) struct CountingHandler {
    count: Arc<AtomicUsize>,
    active: AtomicUsize,
    peak: Arc<AtomicUsize>,
    hold: Duration,
}

impl CountingHandler {
    pub(crate) fn new() -> (Arc<AtomicUsize>, Arc<Self>) {
        let (count, _, handler) = Self::holding(Duration::ZERO);
        (count, handler)
    }

    /// Handler that keeps each connection open for `hold` and records the
    /// highest number of connections it saw at once.
    pub(crate) fn holding(hold: Duration) -> (Arc<AtomicUsize>, Arc<AtomicUsize>, Arc<Self>) {
        let count = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let handler = Arc::new(Self {
            count: Arc::clone(&count),
            active: AtomicUsize::new(0),
            peak: Arc::clone(&peak),
            hold,
        });
        (count, peak, handler)
    }
}

impl ConnectionHandler for CountingHandler {
    fn handle(&self, _stream: ConnectionStream) {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(active, Ordering::SeqCst);
        if !self.hold.is_zero() {
            thread::sleep(self.hold);
        }
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
