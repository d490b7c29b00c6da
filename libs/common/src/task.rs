//! Cancellable recurring tasks
//!
//! Widgets that refresh on a timer run as a [`ScheduledTask`]. The task is
//! stopped by [`ScheduledTask::cancel`] or when the handle is dropped, which
//! ties the timer to the lifetime of the component owning it.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::info;

/// Handle to a job running on a fixed period
#[derive(Debug)]
pub struct ScheduledTask {
    name: String,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Run `job` every `period`, the first run one period from now
    ///
    /// Must be called from within a tokio runtime.
    pub fn every<F, Fut>(name: impl Into<String>, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                job().await;
            }
        });

        info!("Started scheduled task {} every {:?}", name, period);
        Self { name, handle }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop the task; a tick already running is interrupted at its next await
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            info!("Cancelling scheduled task {}", self.name);
            self.handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
