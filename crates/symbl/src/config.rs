//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::Result;
use crate::auth::DEFAULT_AUTH_URL;
use crate::dispatch::RetryPolicy;
use crate::error::InvalidInputError;
use crate::transport::DEFAULT_REQUEST_TIMEOUT;

/// Base URL of the production REST API.
pub const DEFAULT_API_URL: &str = "https://api.symbl.ai/v1";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "SYMBL_API_URL";

/// Environment variable overriding the token endpoint.
pub const AUTH_URL_ENV: &str = "SYMBL_AUTH_URL";

/// Endpoints and policies used by a [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_url: Url,
    auth_url: Url,
    retry: RetryPolicy,
    request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            auth_url: Url::parse(DEFAULT_AUTH_URL).expect("default auth URL is valid"),
            retry: RetryPolicy::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults, with `SYMBL_API_URL` / `SYMBL_AUTH_URL` applied when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty()) {
            config = config.with_api_url(&url)?;
        }
        if let Some(url) = std::env::var(AUTH_URL_ENV).ok().filter(|v| !v.is_empty()) {
            config = config.with_auth_url(&url)?;
        }
        Ok(config)
    }

    /// Use a different API base URL, e.g. a mock server.
    pub fn with_api_url(mut self, url: &str) -> Result<Self> {
        self.api_url = parse_http_url(url)?;
        Ok(self)
    }

    /// Use a different token endpoint.
    pub fn with_auth_url(mut self, url: &str) -> Result<Self> {
        self.auth_url = parse_http_url(url)?;
        Ok(self)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Build an API URL by appending percent-encoded path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        // Base URLs are checked to be hierarchical when parsed.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn parse_http_url(value: &str) -> Result<Url> {
    let invalid = |reason: &str| InvalidInputError::InvalidUrl {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(value).map_err(|e| invalid(&e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL must be absolute").into());
    }
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(invalid(&format!("unsupported scheme '{}'", scheme)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn default_endpoints() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url().as_str(), "https://api.symbl.ai/v1");
        assert_eq!(config.auth_url().as_str(), DEFAULT_AUTH_URL);
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn endpoint_appends_encoded_segments() {
        let config = ClientConfig::default();
        let url = config.endpoint(&["conversations", "a b/c", "bookmarks"]);
        assert_eq!(
            url.as_str(),
            "https://api.symbl.ai/v1/conversations/a%20b%2Fc/bookmarks"
        );
    }

    #[test]
    fn endpoint_on_root_base() {
        let config = ClientConfig::default()
            .with_api_url("http://127.0.0.1:8080/")
            .unwrap();
        let url = config.endpoint(&["conversations", "1"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/conversations/1");
    }

    #[test]
    fn rejects_bad_urls() {
        for bad in ["not a url", "mailto:someone@example.com", "ftp://example.com"] {
            let err = ClientConfig::default().with_api_url(bad).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidInput(InvalidInputError::InvalidUrl { .. })
            ));
        }
    }
}
