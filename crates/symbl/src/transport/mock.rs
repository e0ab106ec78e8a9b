//! Scripted in-memory transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use tokio::time::Instant;

use crate::auth::AccessToken;
use crate::error::{StatusError, TransportError};
use crate::{Error, Result};

use super::{ApiRequest, RequestBody, RequestContext, Transport};

/// One call observed by [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub token: Option<String>,
    pub body: RequestBody,
    pub at: Instant,
}

/// Replays queued responses per URL and records every call.
///
/// A URL with an empty queue answers with a connection error.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<HashMap<String, VecDeque<Result<Vec<u8>>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url: &str, response: Result<Vec<u8>>) {
        self.responses
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn push_json(&self, url: &str, body: serde_json::Value) {
        self.push(url, Ok(serde_json::to_vec(&body).unwrap()));
    }

    pub fn push_status(&self, method: &str, url: &str, status: u16) {
        self.push(
            url,
            Err(StatusError::new(method, url, status, None).into()),
        );
    }

    pub fn push_connection_refused(&self, url: &str) {
        self.push(
            url,
            Err(TransportError::Connection {
                message: "connection refused".into(),
            }
            .into()),
        );
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.url == url)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        ctx: &RequestContext,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<Vec<u8>> {
        let url = request.url().to_string();
        self.calls.lock().unwrap().push(RecordedCall {
            method: request.method().clone(),
            url: url.clone(),
            token: token.map(|t| t.as_str().to_string()),
            body: request.body().clone(),
            at: Instant::now(),
        });

        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&url)
            .and_then(|queue| queue.pop_front());

        ctx.run(async move {
            next.unwrap_or_else(|| {
                Err(Error::Transport(TransportError::Connection {
                    message: format!("no scripted response for {}", url),
                }))
            })
        })
        .await
    }
}
