use std::sync::Arc;
use std::time::Duration;

use common::page::regions;
use common::{ClientResult, Page, ScheduledTask, Selector, Transport};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};

/// Keeps the unread-notification counter in sync with the server
///
/// Every tick issues its own request. Ticks may overlap a request still in
/// flight, and whichever response resolves last sets the displayed value.
pub struct UnreadCountPoller<T: Transport, P: Page> {
    transport: Arc<T>,
    page: Arc<P>,
    url: Arc<str>,
}

impl<T: Transport, P: Page> UnreadCountPoller<T, P> {
    pub fn new(transport: Arc<T>, page: Arc<P>, url: impl Into<String>) -> Self {
        Self {
            transport,
            page,
            url: Arc::from(url.into()),
        }
    }

    /// Fetch the count once and show it
    pub async fn refresh(&self) -> ClientResult<u64> {
        let counts = self.transport.fetch_unread_counts(&self.url).await?;

        let matched = self.page.set_text(
            &Selector::id(regions::UNREAD_COUNT),
            &counts.not_checked.to_string(),
        );
        if matched == 0 {
            debug!("Unread counter is not on this page");
        }

        Ok(counts.not_checked)
    }

    /// Refresh, keeping the previous value on failure
    pub async fn poll_once(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Failed to fetch unread notification count: {}", e);
        }
    }

    /// Start a refresh without waiting for the response
    pub fn tick(&self) -> JoinHandle<()> {
        let poller = self.clone();
        tokio::spawn(async move { poller.poll_once().await })
    }

    /// Poll every `period` until the returned task is cancelled or dropped
    ///
    /// Requests still in flight are abandoned on teardown.
    pub fn start(self, period: Duration) -> ScheduledTask {
        let mut in_flight = JoinSet::new();
        ScheduledTask::every("unread-count-poller", period, move || {
            while in_flight.try_join_next().is_some() {}

            let poller = self.clone();
            in_flight.spawn(async move { poller.poll_once().await });
            std::future::ready(())
        })
    }
}

// Implement Clone for UnreadCountPoller without requiring T: Clone or P: Clone
impl<T: Transport, P: Page> Clone for UnreadCountPoller<T, P> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            page: Arc::clone(&self.page),
            url: Arc::clone(&self.url),
        }
    }
}
