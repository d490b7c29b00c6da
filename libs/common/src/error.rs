//! Custom error types for the common library
//!
//! This module defines the error types returned by the HTTP transport and
//! the configuration loader.

use thiserror::Error;

/// Custom error type for outbound page requests
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or the connection failed
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body did not have the expected shape
    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The URL carried by the page could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Error raised while loading the page configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration sources could not be merged or deserialized
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was present but unusable
    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
