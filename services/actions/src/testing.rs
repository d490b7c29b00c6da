//! Test doubles for the handler unit tests

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::models::UnreadCounts;
use common::page::regions;
use common::{ClientError, ClientResult, MemoryPage, PageConfig, Selector, Transport};

use crate::context::ActionContext;

/// Records every POST and answers with a fixed status after a latency
#[derive(Default)]
pub struct RecordingTransport {
    posts: Mutex<Vec<String>>,
    fail_status: AtomicU16,
    latency: Mutex<Duration>,
}

impl RecordingTransport {
    pub fn posts(&self) -> Vec<String> {
        self.posts.lock().expect("posts lock").clone()
    }

    pub fn fail_with(&self, status: u16) {
        self.fail_status.store(status, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().expect("latency lock") = latency;
    }
}

impl Transport for RecordingTransport {
    async fn post_protected(&self, url: &str) -> ClientResult<()> {
        self.posts.lock().expect("posts lock").push(url.to_string());
        let latency = *self.latency.lock().expect("latency lock");
        tokio::time::sleep(latency).await;

        match self.fail_status.load(Ordering::SeqCst) {
            0 => Ok(()),
            status => Err(ClientError::Status {
                url: url.to_string(),
                status,
            }),
        }
    }

    async fn fetch_unread_counts(&self, _url: &str) -> ClientResult<UnreadCounts> {
        Ok(UnreadCounts {
            all: None,
            not_checked: 0,
        })
    }
}

pub fn config() -> PageConfig {
    PageConfig {
        csrf_token: "test-token".to_string(),
        comment_post_url: "/posts/hello-world/comment/".to_string(),
        ..PageConfig::default()
    }
}

pub fn context() -> (
    Arc<RecordingTransport>,
    Arc<MemoryPage>,
    ActionContext<RecordingTransport, MemoryPage>,
) {
    let transport = Arc::new(RecordingTransport::default());
    let page = Arc::new(MemoryPage::with_layout());
    let context = ActionContext::new(Arc::clone(&transport), Arc::clone(&page), &config());
    (transport, page, context)
}

pub fn flashes(page: &MemoryPage) -> Vec<String> {
    page.children_html(&Selector::id(regions::FLASHES_CONTAINER))
}

/// Let every pending flash insertion run
pub async fn settle_flashes() {
    tokio::time::sleep(config().flash_delay() + Duration::from_millis(1)).await;
}
