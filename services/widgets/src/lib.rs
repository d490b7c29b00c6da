//! Recurring page widgets
//!
//! The unread-count poller and the clock both run as cancellable scheduled
//! tasks and only ever touch their own page region.

pub mod clock;
pub mod poller;

pub use clock::ClockWidget;
pub use poller::UnreadCountPoller;
