//! Common library for the blog page client
//!
//! This crate provides the pieces shared by every page component: the page
//! configuration and message table, the HTTP transport that carries the
//! anti-forgery token, the [`page::Page`] document abstraction, the flash
//! notifier and cancellable scheduled tasks.

pub mod config;
pub mod cookies;
pub mod error;
pub mod flash;
pub mod http;
pub mod messages;
pub mod models;
pub mod page;
pub mod task;

pub use config::PageConfig;
pub use error::{ClientError, ClientResult};
pub use flash::{Category, Flasher};
pub use http::{HttpTransport, Transport};
pub use messages::Messages;
pub use page::{MemoryPage, Page, Selector};
pub use task::ScheduledTask;
