//! HTTP transport for page components
//!
//! Every outbound call a component makes goes through [`Transport`]. The
//! production implementation, [`HttpTransport`], embeds the anti-forgery token
//! into each state-changing request so callers never handle it themselves.

use std::future::Future;

use reqwest::{Client, Response, Url};
use tracing::{debug, warn};

use crate::config::PageConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{ProtectedForm, UnreadCounts};

/// Outbound requests issued by page components
pub trait Transport: Send + Sync + 'static {
    /// POST the anti-forgery token to `url`; any 2xx is success
    fn post_protected(&self, url: &str) -> impl Future<Output = ClientResult<()>> + Send;

    /// GET the unread-notification counts from `url`
    fn fetch_unread_counts(
        &self,
        url: &str,
    ) -> impl Future<Output = ClientResult<UnreadCounts>> + Send;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    form: ProtectedForm,
}

impl HttpTransport {
    /// Create a new transport from the page configuration
    pub fn new(config: &PageConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let base_url = parse_base_url(&config.base_url)?;

        Ok(Self::with_client(client, base_url, config.csrf_token.clone()))
    }

    /// Create a transport around an existing client
    pub fn with_client(client: Client, base_url: Url, csrf_token: String) -> Self {
        Self {
            client,
            base_url,
            form: ProtectedForm { csrf_token },
        }
    }

    /// Resolve a URL taken from the page against the site root
    ///
    /// Absolute URLs are kept as they are; paths such as `/comments/42/delete`
    /// are joined onto the base URL.
    pub fn resolve(&self, url: &str) -> ClientResult<Url> {
        self.base_url
            .join(url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))
    }

    fn ensure_success(url: &Url, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            warn!("Request to {} failed with status {}", url, status);
            Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

/// Parse the site root every page URL is resolved against
pub fn parse_base_url(base_url: &str) -> ClientResult<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "{}: base URL must be an http(s) URL",
            base_url
        )));
    }
    Ok(url)
}

impl Transport for HttpTransport {
    async fn post_protected(&self, url: &str) -> ClientResult<()> {
        let url = self.resolve(url)?;
        debug!("POST {}", url);

        let response = self.client.post(url.clone()).form(&self.form).send().await?;
        Self::ensure_success(&url, response)?;

        Ok(())
    }

    async fn fetch_unread_counts(&self, url: &str) -> ClientResult<UnreadCounts> {
        let url = self.resolve(url)?;
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let body = Self::ensure_success(&url, response)?.bytes().await?;
        let counts = serde_json::from_slice(&body)?;

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> HttpTransport {
        let base_url = parse_base_url(base_url).expect("valid base URL");
        HttpTransport::with_client(Client::new(), base_url, "tok".to_string())
    }

    #[test]
    fn test_relative_urls_resolve_against_base() {
        let transport = transport("http://blog.test/");

        let url = transport.resolve("/comments/42/delete").expect("resolvable");
        assert_eq!(url.as_str(), "http://blog.test/comments/42/delete");

        let url = transport
            .resolve("/accounts/notifications/count/")
            .expect("resolvable");
        assert_eq!(url.as_str(), "http://blog.test/accounts/notifications/count/");
    }

    #[test]
    fn test_absolute_urls_are_kept() {
        let transport = transport("http://blog.test/");

        let url = transport
            .resolve("https://other.test/sessions/3/terminate/")
            .expect("resolvable");
        assert_eq!(url.as_str(), "https://other.test/sessions/3/terminate/");
    }

    #[test]
    fn test_invalid_base_url_is_reported() {
        assert!(matches!(
            parse_base_url("/relative/only/"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_base_url("mailto:admin@blog.test"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_unread_counts_shape() {
        let counts: UnreadCounts =
            serde_json::from_str(r#"{"all": 9, "not_checked": 3}"#).expect("valid body");
        assert_eq!(counts.not_checked, 3);
        assert_eq!(counts.all, Some(9));

        let counts: UnreadCounts =
            serde_json::from_str(r#"{"not_checked": 0}"#).expect("valid body");
        assert_eq!(counts.all, None);
    }
}
