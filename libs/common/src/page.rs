//! Page (document) abstraction
//!
//! Components never touch a concrete document. They mutate the page through
//! the [`Page`] trait using typed [`Selector`]s, so the same handlers run
//! against a browser binding or against [`MemoryPage`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

/// Element selector understood by every page implementation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Selector::Class(class.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{}", id),
            Selector::Class(class) => write!(f, ".{}", class),
        }
    }
}

/// Well-known page regions
pub mod regions {
    pub const UNREAD_COUNT: &str = "not-checked-notifications-count";
    pub const TIME_WIDGET: &str = "time-widget";
    pub const FLASHES_CONTAINER: &str = "flashes-container";
    pub const REPLY_INFO: &str = "reply-info";
    pub const COMMENT_FORM: &str = "comment-form";
    pub const REPLY_CANCEL_BUTTON: &str = "reply-cancel-btn";
}

/// Operations components perform on the document
///
/// Mutating operations return the number of elements they matched, so callers
/// can log selectors that no longer exist.
pub trait Page: Send + Sync + 'static {
    /// Remove every element matching `selector`
    fn remove(&self, selector: &Selector) -> usize;

    /// Replace the text content of every matching element
    fn set_text(&self, selector: &Selector, text: &str) -> usize;

    /// Set an attribute on every matching element
    fn set_attribute(&self, selector: &Selector, name: &str, value: &str) -> usize;

    /// Show or hide every matching element
    fn set_visible(&self, selector: &Selector, visible: bool) -> usize;

    /// Append an HTML fragment as the last child of every matching element
    fn append_html(&self, selector: &Selector, html: &str) -> usize;

    /// Scroll the viewport back to the top
    fn scroll_to_top(&self);

    /// Ask the user a yes/no question; blocks until answered
    fn confirm(&self, question: &str) -> bool;

    /// Show a blocking notice
    fn alert(&self, message: &str);

    /// Whether the document can store cookies
    fn cookies_enabled(&self) -> bool;
}

/// A single element of a [`MemoryPage`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub visible: bool,
    /// HTML fragments appended as children, in insertion order
    pub children_html: Vec<String>,
}

impl Element {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            visible: true,
            ..Default::default()
        }
    }

    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            visible: true,
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    elements: Vec<Element>,
    confirm_answers: Vec<bool>,
    questions: Vec<String>,
    alerts: Vec<String>,
    scroll_count: usize,
    cookies_enabled: bool,
}

/// In-memory document used by the headless runner and the test suites
///
/// Confirmation prompts are answered from a queue filled with
/// [`MemoryPage::answer_confirm`]; an empty queue declines.
#[derive(Debug)]
pub struct MemoryPage {
    state: Mutex<MemoryState>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                cookies_enabled: true,
                ..Default::default()
            }),
        }
    }

    /// Page with the regions every component expects
    pub fn with_layout() -> Self {
        let page = Self::new();
        page.insert(Element::with_id(regions::UNREAD_COUNT).text("0"));
        page.insert(Element::with_id(regions::TIME_WIDGET));
        page.insert(Element::with_id(regions::FLASHES_CONTAINER));
        page.insert(Element::with_id(regions::REPLY_INFO));
        page.insert(Element::with_id(regions::COMMENT_FORM));
        page.insert(Element::with_id(regions::REPLY_CANCEL_BUTTON).hidden());
        page
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert(&self, element: Element) {
        self.lock().elements.push(element);
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.lock().confirm_answers.push(answer);
    }

    pub fn set_cookies_enabled(&self, enabled: bool) {
        self.lock().cookies_enabled = enabled;
    }

    pub fn count(&self, selector: &Selector) -> usize {
        self.lock()
            .elements
            .iter()
            .filter(|e| e.matches(selector))
            .count()
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.count(selector) > 0
    }

    /// First element matching `selector`
    pub fn find(&self, selector: &Selector) -> Option<Element> {
        self.lock()
            .elements
            .iter()
            .find(|e| e.matches(selector))
            .cloned()
    }

    pub fn text_of(&self, selector: &Selector) -> Option<String> {
        self.find(selector).map(|e| e.text)
    }

    pub fn attribute_of(&self, selector: &Selector, name: &str) -> Option<String> {
        self.find(selector)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    pub fn is_visible(&self, selector: &Selector) -> Option<bool> {
        self.find(selector).map(|e| e.visible)
    }

    pub fn children_html(&self, selector: &Selector) -> Vec<String> {
        self.find(selector)
            .map(|e| e.children_html)
            .unwrap_or_default()
    }

    pub fn questions(&self) -> Vec<String> {
        self.lock().questions.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }

    pub fn scroll_count(&self) -> usize {
        self.lock().scroll_count
    }

    fn update(&self, selector: &Selector, mut apply: impl FnMut(&mut Element)) -> usize {
        let mut state = self.lock();
        let mut matched = 0;
        for element in state.elements.iter_mut().filter(|e| e.matches(selector)) {
            apply(element);
            matched += 1;
        }
        matched
    }
}

impl Page for MemoryPage {
    fn remove(&self, selector: &Selector) -> usize {
        let mut state = self.lock();
        let before = state.elements.len();
        state.elements.retain(|e| !e.matches(selector));
        let removed = before - state.elements.len();
        debug!("Removed {} element(s) matching {}", removed, selector);
        removed
    }

    fn set_text(&self, selector: &Selector, text: &str) -> usize {
        self.update(selector, |e| e.text = text.to_string())
    }

    fn set_attribute(&self, selector: &Selector, name: &str, value: &str) -> usize {
        self.update(selector, |e| {
            e.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn set_visible(&self, selector: &Selector, visible: bool) -> usize {
        self.update(selector, |e| e.visible = visible)
    }

    fn append_html(&self, selector: &Selector, html: &str) -> usize {
        self.update(selector, |e| e.children_html.push(html.to_string()))
    }

    fn scroll_to_top(&self) {
        self.lock().scroll_count += 1;
    }

    fn confirm(&self, question: &str) -> bool {
        let mut state = self.lock();
        state.questions.push(question.to_string());
        if state.confirm_answers.is_empty() {
            false
        } else {
            state.confirm_answers.remove(0)
        }
    }

    fn alert(&self, message: &str) {
        self.lock().alerts.push(message.to_string());
    }

    fn cookies_enabled(&self) -> bool {
        self.lock().cookies_enabled
    }
}
