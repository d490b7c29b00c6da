use std::sync::Arc;

use anyhow::Result;
use common::cookies::check_cookies_enabled;
use common::page::regions;
use common::{HttpTransport, MemoryPage, PageConfig, Selector};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use widgets::{ClockWidget, UnreadCountPoller};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting headless page widgets");

    let config = PageConfig::from_env()?;
    let page = Arc::new(MemoryPage::with_layout());

    if !check_cookies_enabled(page.as_ref(), &config.messages) {
        warn!("Continuing without cookie support");
    }

    let transport = Arc::new(HttpTransport::new(&config)?);

    let poller = UnreadCountPoller::new(
        transport,
        Arc::clone(&page),
        config.unread_count_url.clone(),
    );
    let poller_task = poller.start(config.poll_interval());

    let clock_task = ClockWidget::new(Arc::clone(&page)).start(config.clock_interval());

    info!("Widgets started successfully");

    // Keep the widgets running
    tokio::signal::ctrl_c().await?;
    info!("Shutting down page widgets");

    poller_task.cancel();
    clock_task.cancel();

    let unread = page.text_of(&Selector::id(regions::UNREAD_COUNT)).unwrap_or_default();
    let time = page.text_of(&Selector::id(regions::TIME_WIDGET)).unwrap_or_default();
    info!("Last unread count: {}, last clock reading: {}", unread, time);

    Ok(())
}
