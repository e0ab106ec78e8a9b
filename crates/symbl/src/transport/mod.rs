//! Transport abstraction.
//!
//! A [`Transport`] performs exactly one network exchange per call. It knows
//! nothing about tokens expiring or retries; that policy lives in
//! [`crate::dispatch`].

mod context;
mod http;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::Result;
use crate::auth::AccessToken;

pub use context::RequestContext;
pub use http::{DEFAULT_REQUEST_TIMEOUT, HttpTransport};

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// A JSON document.
    Json(serde_json::Value),
    /// Raw bytes with an explicit content type.
    Bytes {
        content_type: String,
        data: Vec<u8>,
    },
}

/// A fully built API request.
///
/// Requests are cheap to clone and are re-sent unchanged on every attempt.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    body: RequestBody,
}

impl ApiRequest {
    /// Create a request with no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: RequestBody::Empty,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: Url) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a raw body.
    pub fn bytes(mut self, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        self.body = RequestBody::Bytes {
            content_type: content_type.into(),
            data,
        };
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }
}

/// A single-shot network sender.
///
/// Implementations must:
/// - return the raw body on any 2xx status
/// - return [`crate::Error::Status`] on any other status
/// - return another error variant for network or encoding failures
/// - honor `ctx` for the duration of the network exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request`, presenting `token` as a bearer credential if given.
    async fn send(
        &self,
        ctx: &RequestContext,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<Vec<u8>>;
}
