//! Trailing-edge debounce for text input.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Fires the latest value once no newer value arrived within `delay`.
///
/// Each call bumps a generation counter and schedules a delayed task; a task
/// only fires if its generation is still the newest when it wakes. A zero
/// delay fires synchronously on every call.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    shutdown: CancellationToken,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called inside a tokio runtime when the delay is non-zero.
    pub fn call<T, F>(&self, value: T, f: F)
    where
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        if self.shutdown.is_cancelled() {
            return;
        }

        if self.delay.is_zero() {
            f(value);
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = self.generation.clone();
        let shutdown = self.shutdown.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    trace!(generation, "debounced call cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    if latest.load(Ordering::SeqCst) == generation {
                        f(value);
                    }
                }
            }
        });
    }

    /// Drops any scheduled call; nothing fires after this.
    pub fn cancel(&self) {
        self.shutdown.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
