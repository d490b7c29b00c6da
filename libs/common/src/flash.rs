//! Flash notifier
//!
//! A flash is a dismissible alert block appended to the flashes container a
//! short delay after the viewport is scrolled to the top. Dismissal is handled
//! by the page's generic alert widget through the close control.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use crate::page::{Page, Selector, regions};

/// Style category of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Info,
    Warning,
    Danger,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Info => "info",
            Category::Warning => "warning",
            Category::Danger => "danger",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escapes message text, so markup inside a message is shown rather than rendered
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Markup of a single dismissible flash block
pub fn render_flash_item(message: &str, category: Category) -> String {
    format!(
        concat!(
            r#"<div class="alert alert-{category} alert-dismissible fade show" role="alert">"#,
            r#"<strong>Attention!</strong> {message}"#,
            r#"<button type="button" class="close" data-dismiss="alert" aria-label="Close">"#,
            r#"<span aria-hidden="true">&times;</span>"#,
            r#"</button>"#,
            r#"</div>"#,
        ),
        category = category,
        message = escape_html(message),
    )
}

/// Schedules flash messages on a page
pub struct Flasher<P: Page> {
    page: Arc<P>,
    delay: Duration,
}

impl<P: Page> Flasher<P> {
    pub fn new(page: Arc<P>, delay: Duration) -> Self {
        Self { page, delay }
    }

    /// Scroll to the top now and append the message once the delay elapses
    ///
    /// Exactly one block is inserted per call. Must be called from within a
    /// tokio runtime; the returned handle resolves after the insertion.
    pub fn flash(&self, message: &str, category: Category) -> JoinHandle<()> {
        let item = render_flash_item(message, category);
        self.page.scroll_to_top();

        let page = Arc::clone(&self.page);
        let delay = self.delay;
        tokio::spawn(async move {
            sleep(delay).await;
            page.append_html(&Selector::id(regions::FLASHES_CONTAINER), &item);
            debug!("Inserted {} flash message", category);
        })
    }
}

// Implement Clone for Flasher without requiring P: Clone
impl<P: Page> Clone for Flasher<P> {
    fn clone(&self) -> Self {
        Self {
            page: Arc::clone(&self.page),
            delay: self.delay,
        }
    }
}
