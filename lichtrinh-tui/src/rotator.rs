use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use lichtrinh_core::catalog::LOADING_MESSAGES;

/// Cycles through the loading messages while the loading screen is up.
///
/// The ticking task belongs to the rotator and is aborted when it is dropped.
pub(crate) struct Rotator {
    index: Arc<AtomicUsize>,
    len: usize,
    task: JoinHandle<()>,
}

impl Rotator {
    /// Must be called from within a tokio runtime.
    pub(crate) fn start(period: Duration, len: usize) -> Self {
        let index = Arc::new(AtomicUsize::new(0));
        let shared = Arc::clone(&index);
        let len = len.max(1);

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            while Arc::strong_count(&shared) > 1 {
                ticker.tick().await;
                let next = (shared.load(Ordering::Relaxed) + 1) % len;
                shared.store(next, Ordering::Relaxed);
            }
        });

        Self { index, len, task }
    }

    pub(crate) fn current(&self) -> usize {
        self.index.load(Ordering::Relaxed) % self.len
    }

    pub(crate) fn message(&self) -> &'static str {
        LOADING_MESSAGES
            .get(self.current())
            .copied()
            .unwrap_or_default()
    }
}

impl Drop for Rotator {
    fn drop(&mut self) {
        self.task.abort();
    }
}
