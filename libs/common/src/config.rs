//! Page configuration
//!
//! Everything the page bootstrap used to leave in globals (anti-forgery token,
//! localized messages, endpoint URLs, timings) is loaded once here and then
//! handed explicitly to each component.

use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;
use tracing::info;

use crate::error::{ConfigError, ConfigResult};
use crate::http::parse_base_url;
use crate::messages::Messages;

/// Environment variable prefix for page configuration
pub const ENV_PREFIX: &str = "BLOG";

/// Configuration shared by every page component
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Anti-forgery token submitted with every state-changing request
    pub csrf_token: String,
    /// Site root that relative URLs from the page are resolved against
    pub base_url: String,
    /// Endpoint returning `{ "not_checked": n }`
    pub unread_count_url: String,
    /// Default action of the comment form when not replying
    pub comment_post_url: String,
    /// Unread-count polling period in seconds (default: 5)
    pub poll_interval_secs: u64,
    /// Clock refresh period in milliseconds (default: 1000)
    pub clock_interval_ms: u64,
    /// Delay before a flash message is inserted in milliseconds (default: 400)
    pub flash_delay_ms: u64,
    /// Upper bound for a single request in seconds (default: 30)
    pub request_timeout_secs: u64,
    /// Localized message table
    pub messages: Messages,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            csrf_token: String::new(),
            base_url: "http://localhost:5000/".to_string(),
            unread_count_url: "/accounts/notifications/count/".to_string(),
            comment_post_url: String::new(),
            poll_interval_secs: 5,
            clock_interval_ms: 1000,
            flash_delay_ms: 400,
            request_timeout_secs: 30,
            messages: Messages::default(),
        }
    }
}

impl PageConfig {
    /// Create a new PageConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BLOG__CSRF_TOKEN`: anti-forgery token (required)
    /// - `BLOG__BASE_URL`: site root for relative URLs (default: http://localhost:5000/)
    /// - `BLOG__UNREAD_COUNT_URL`: unread-count endpoint
    /// - `BLOG__COMMENT_POST_URL`: default comment form action
    /// - `BLOG__POLL_INTERVAL_SECS`: polling period (default: 5)
    /// - `BLOG__CLOCK_INTERVAL_MS`: clock period (default: 1000)
    /// - `BLOG__FLASH_DELAY_MS`: flash insertion delay (default: 400)
    /// - `BLOG__REQUEST_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `BLOG__MESSAGES__<KEY>`: override a single localized message
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from an explicit environment source
    pub fn from_environment(environment: Environment) -> ConfigResult<Self> {
        let settings = Config::builder()
            .add_source(environment.separator("__").try_parsing(true))
            .build()?;

        let page_config: PageConfig = settings.try_deserialize()?;
        page_config.validate()?;

        info!(
            "Page configuration loaded (base URL: {}, unread count URL: {})",
            page_config.base_url, page_config.unread_count_url
        );
        Ok(page_config)
    }

    /// Reject configurations no component can work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.csrf_token.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "csrf_token",
                reason: "the anti-forgery token must not be empty".to_string(),
            });
        }
        if let Err(e) = parse_base_url(&self.base_url) {
            return Err(ConfigError::Invalid {
                key: "base_url",
                reason: e.to_string(),
            });
        }
        for (key, value) in [
            ("poll_interval_secs", self.poll_interval_secs),
            ("clock_interval_ms", self.clock_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "interval must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    pub fn flash_delay(&self) -> Duration {
        Duration::from_millis(self.flash_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
