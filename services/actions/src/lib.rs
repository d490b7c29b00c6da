//! Click handlers of the blog pages
//!
//! Each handler takes a typed view model, optionally asks for confirmation,
//! sends one state-changing request carrying the anti-forgery token, and only
//! mutates the page once the server has accepted the request. Failures are
//! reported to the user with a flash message and leave the page unchanged.

pub mod comments;
pub mod context;
pub mod guard;
pub mod models;
pub mod notifications;
pub mod sessions;

#[cfg(test)]
pub(crate) mod testing;

pub use comments::{ReplyForm, ReplyState};
pub use context::{ActionContext, ActionOutcome};
pub use models::{CommentItem, ItemKey, NotificationItem, SessionItem};
