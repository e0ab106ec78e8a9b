//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use tracing::{debug, instrument, trace};

use crate::Result;
use crate::auth::AccessToken;
use crate::error::{StatusError, TransportError};

use super::{ApiRequest, RequestBody, RequestContext, Transport};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body returned by the API on failures.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP transport built on a shared `reqwest::Client`.
///
/// Clone is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a transport whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("symbl-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    async fn exchange(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<Vec<u8>> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            builder = builder.bearer_auth(token.as_str());
        }

        builder = match request.body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Bytes { content_type, data } => builder
                .header(CONTENT_TYPE, content_type.as_str())
                .body(data.clone()),
        };

        let response = builder.send().await?;
        let status = response.status();
        trace!(status = %status, "HTTP response");

        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(Self::status_error(request, response).await.into())
        }
    }

    async fn status_error(request: &ApiRequest, response: reqwest::Response) -> StatusError {
        let status = response.status().as_u16();

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => None,
        };

        StatusError::new(
            request.method().as_str(),
            request.url().as_str(),
            status,
            message,
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(
        skip(self, ctx, request, token),
        fields(method = %request.method(), url = %request.url())
    )]
    async fn send(
        &self,
        ctx: &RequestContext,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<Vec<u8>> {
        debug!(authenticated = token.is_some(), "Sending request");
        ctx.run(self.exchange(request, token)).await
    }
}
