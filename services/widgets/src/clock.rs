use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveTime, Timelike};
use common::page::regions;
use common::{Page, ScheduledTask, Selector};

type TimeSource = Arc<dyn Fn() -> NaiveTime + Send + Sync>;

/// Writes the current wall-clock time into the time widget region
pub struct ClockWidget<P: Page> {
    page: Arc<P>,
    now: TimeSource,
}

/// `H:M:S` without zero padding, e.g. `9:05:03` renders as `9:5:3`
pub fn format_time<T: Timelike>(time: &T) -> String {
    format!("{}:{}:{}", time.hour(), time.minute(), time.second())
}

impl<P: Page> ClockWidget<P> {
    /// Clock reading the local time zone
    pub fn new(page: Arc<P>) -> Self {
        Self::with_time_source(page, || Local::now().time())
    }

    pub fn with_time_source<F>(page: Arc<P>, now: F) -> Self
    where
        F: Fn() -> NaiveTime + Send + Sync + 'static,
    {
        Self {
            page,
            now: Arc::new(now),
        }
    }

    pub fn render(&self) {
        let text = format_time(&(self.now)());
        self.page.set_text(&Selector::id(regions::TIME_WIDGET), &text);
    }

    /// Re-render every `period` until the returned task is cancelled or dropped
    pub fn start(self, period: Duration) -> ScheduledTask {
        ScheduledTask::every("clock-widget", period, move || {
            self.render();
            std::future::ready(())
        })
    }
}
