//! Re-authenticating request dispatcher.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::auth::{Authenticator, Session};
use crate::error::StatusError;
use crate::transport::{ApiRequest, RequestContext, Transport};
use crate::{Error, Result};

use super::policy::RetryPolicy;

/// Classified result of one transport call.
#[derive(Debug)]
pub(crate) enum Attempt {
    /// 2xx with its raw body.
    Success(Vec<u8>),
    /// 401: the token was rejected.
    Unauthorized(StatusError),
    /// Any other non-2xx status.
    OtherStatus(StatusError),
    /// Network, cancellation or encoding failure.
    Transport(Error),
}

impl Attempt {
    pub(crate) fn classify(result: Result<Vec<u8>>) -> Self {
        match result {
            Ok(body) => Attempt::Success(body),
            Err(Error::Status(e)) if e.is_unauthorized() => Attempt::Unauthorized(e),
            Err(Error::Status(e)) => Attempt::OtherStatus(e),
            Err(e) => Attempt::Transport(e),
        }
    }
}

/// Sends requests with the session token, recovering from token expiry.
///
/// On a 401 the dispatcher mints a new token from the session credentials,
/// installs it, and re-sends the same request. Other non-2xx statuses are
/// re-sent without re-authenticating. Everything else ends the call.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    authenticator: Authenticator,
    session: Session,
    policy: RetryPolicy,
}

impl Dispatcher {
    /// Create a dispatcher sending through `transport` with the token held
    /// by `session`, renewing it via `authenticator` under `policy`.
    pub fn new(
        transport: Arc<dyn Transport>,
        authenticator: Authenticator,
        session: Session,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            authenticator,
            session,
            policy,
        }
    }

    /// Returns the session whose token this dispatcher presents.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the retry policy bounding each call.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send `request` and decode the JSON response.
    pub async fn send<R>(&self, ctx: &RequestContext, request: &ApiRequest) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let body = self.execute(ctx, request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send `request` and discard the response body.
    pub async fn send_no_response(&self, ctx: &RequestContext, request: &ApiRequest) -> Result<()> {
        self.execute(ctx, request).await.map(|_| ())
    }

    /// Send `request` and return the raw 2xx body.
    ///
    /// The delay between attempts always runs to completion, even if `ctx`
    /// is cancelled meanwhile. The next attempt then fails on the cancelled
    /// context.
    #[instrument(
        skip(self, ctx, request),
        fields(method = %request.method(), url = %request.url())
    )]
    pub async fn execute(&self, ctx: &RequestContext, request: &ApiRequest) -> Result<Vec<u8>> {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1;

        loop {
            let delay = self.policy.delay_before(attempt);
            if !delay.is_zero() {
                debug!(attempt, ?delay, "Waiting before retry");
                tokio::time::sleep(delay).await;
            }

            let token = self.session.access_token().await;
            let result = self.transport.send(ctx, request, Some(&token)).await;

            let failure = match Attempt::classify(result) {
                Attempt::Success(body) => return Ok(body),
                Attempt::Transport(err) => {
                    debug!(attempt, error = %err, "Request failed without a status");
                    return Err(err);
                }
                Attempt::Unauthorized(err) => {
                    info!(attempt, "Access token rejected, re-authenticating");
                    match self
                        .authenticator
                        .authenticate(ctx, self.session.credentials())
                        .await
                    {
                        Ok(token) => self.session.install(token).await,
                        Err(auth_err) => {
                            error!(error = %auth_err, "Re-authentication failed");
                            return Err(auth_err);
                        }
                    }
                    err
                }
                // Retried like a 401, minus the re-authentication.
                Attempt::OtherStatus(err) => {
                    warn!(attempt, status = err.status, "Request failed");
                    err
                }
            };

            if attempt >= max_attempts {
                warn!(attempts = attempt, status = failure.status, "Giving up");
                return Err(failure.into());
            }
            attempt += 1;
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("authenticator", &self.authenticator)
            .field("session", &self.session)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AccessToken, Credentials};
    use crate::error::{AuthError, TransportError};
    use crate::transport::mock::ScriptedTransport;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;
    use url::Url;

    const AUTH_URL: &str = "https://auth.test/oauth2/token:generate";
    const API_URL: &str = "https://api.test/v1/conversations/c1/bookmarks";

    fn dispatcher(transport: &Arc<ScriptedTransport>) -> Dispatcher {
        let authenticator = Authenticator::new(transport.clone(), Url::parse(AUTH_URL).unwrap());
        let session = Session::new(
            Credentials::new("id", "secret"),
            AccessToken::expiring_in("old-token", 3600),
        );
        Dispatcher::new(
            transport.clone(),
            authenticator,
            session,
            RetryPolicy::default(),
        )
    }

    fn request() -> ApiRequest {
        ApiRequest::get(Url::parse(API_URL).unwrap())
    }

    fn tokens(transport: &ScriptedTransport, url: &str) -> Vec<Option<String>> {
        transport
            .calls_to(url)
            .into_iter()
            .map(|c| c.token)
            .collect()
    }

    #[test]
    fn classify_covers_every_kind() {
        assert!(matches!(Attempt::classify(Ok(vec![])), Attempt::Success(_)));
        assert!(matches!(
            Attempt::classify(Err(StatusError::new("GET", API_URL, 401, None).into())),
            Attempt::Unauthorized(_)
        ));
        assert!(matches!(
            Attempt::classify(Err(StatusError::new("GET", API_URL, 404, None).into())),
            Attempt::OtherStatus(e) if e.status == 404
        ));
        assert!(matches!(
            Attempt::classify(Err(TransportError::Timeout.into())),
            Attempt::Transport(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn success_on_first_attempt_has_no_delay() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(API_URL, json!({"ok": true}));

        let start = Instant::now();
        let body: serde_json::Value = dispatcher(&transport)
            .send(&RequestContext::new(), &request())
            .await
            .unwrap();

        assert_eq!(body, json!({"ok": true}));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(tokens(&transport, API_URL), vec![Some("old-token".into())]);
    }

    #[tokio::test(start_paused = true)]
    async fn unauthorized_reauthenticates_and_retries_with_new_token() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_status("GET", API_URL, 401);
        transport.push_json(API_URL, json!({"bookmarks": []}));
        transport.push_json(AUTH_URL, json!({"accessToken": "new-token", "expiresIn": 60}));

        let dispatcher = dispatcher(&transport);
        let body: serde_json::Value = dispatcher
            .send(&RequestContext::new(), &request())
            .await
            .unwrap();

        assert_eq!(body, json!({"bookmarks": []}));
        assert_eq!(
            tokens(&transport, API_URL),
            vec![Some("old-token".into()), Some("new-token".into())]
        );
        assert_eq!(transport.calls_to(AUTH_URL).len(), 1);
        assert_eq!(
            dispatcher.session().access_token().await.as_str(),
            "new-token"
        );

        let calls = transport.calls_to(API_URL);
        assert!(calls[1].at - calls[0].at >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn reauthentication_failure_is_fatal() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_status("GET", API_URL, 401);
        transport.push_connection_refused(AUTH_URL);

        let err = dispatcher(&transport)
            .execute(&RequestContext::new(), &request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Transport(TransportError::Connection { .. })
        ));
        assert_eq!(transport.calls_to(API_URL).len(), 1);
        assert_eq!(transport.calls_to(AUTH_URL).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reauthentication_with_empty_token_is_fatal() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_status("GET", API_URL, 401);
        transport.push_json(AUTH_URL, json!({"accessToken": ""}));

        let dispatcher = dispatcher(&transport);
        let err = dispatcher
            .execute(&RequestContext::new(), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::EmptyToken)));
        assert_eq!(transport.calls_to(API_URL).len(), 1);
        assert_eq!(
            dispatcher.session().access_token().await.as_str(),
            "old-token"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_connection_refused(API_URL);

        let start = Instant::now();
        let err = dispatcher(&transport)
            .execute(&RequestContext::new(), &request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Transport(TransportError::Connection { .. })
        ));
        assert_eq!(transport.calls_to(API_URL).len(), 1);
        assert!(transport.calls_to(AUTH_URL).is_empty());
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn other_statuses_retry_until_exhausted() {
        let transport = Arc::new(ScriptedTransport::new());
        for _ in 0..3 {
            transport.push_status("GET", API_URL, 500);
        }

        let start = Instant::now();
        let err = dispatcher(&transport)
            .execute(&RequestContext::new(), &request())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        let calls = transport.calls_to(API_URL);
        assert_eq!(calls.len(), 3);
        assert!(calls[1].at - calls[0].at >= Duration::from_secs(2));
        assert!(calls[2].at - calls[1].at >= Duration::from_secs(2));
        assert!(start.elapsed() >= Duration::from_secs(4));
        assert!(transport.calls_to(AUTH_URL).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn other_status_then_success() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_status("GET", API_URL, 503);
        transport.push_json(API_URL, json!({"ok": true}));

        let body = dispatcher(&transport)
            .execute(&RequestContext::new(), &request())
            .await
            .unwrap();

        assert_eq!(body, serde_json::to_vec(&json!({"ok": true})).unwrap());
        assert_eq!(transport.calls_to(API_URL).len(), 2);
        assert!(transport.calls_to(AUTH_URL).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_unauthorized_returns_last_status() {
        let transport = Arc::new(ScriptedTransport::new());
        for i in 0..3 {
            transport.push_status("GET", API_URL, 401);
            transport.push_json(
                AUTH_URL,
                json!({"accessToken": format!("token-{}", i), "expiresIn": 60}),
            );
        }

        let err = dispatcher(&transport)
            .execute(&RequestContext::new(), &request())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(
            tokens(&transport, API_URL),
            vec![
                Some("old-token".into()),
                Some("token-0".into()),
                Some("token-1".into())
            ]
        );
        assert_eq!(transport.calls_to(AUTH_URL).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_delay_ignores_cancellation() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_status("GET", API_URL, 500);
        transport.push_json(API_URL, json!({"ok": true}));

        let ctx = RequestContext::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        let err = dispatcher(&transport)
            .execute(&ctx, &request())
            .await
            .unwrap_err();

        // The full delay elapsed before the cancelled context was noticed.
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(matches!(err, Error::Transport(TransportError::Cancelled)));
        assert_eq!(transport.calls_to(API_URL).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn undecodable_body_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(API_URL, Ok(b"not json".to_vec()));

        let err = dispatcher(&transport)
            .send::<serde_json::Value>(&RequestContext::new(), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Decode { .. })));
        assert_eq!(transport.calls_to(API_URL).len(), 1);
    }
}
