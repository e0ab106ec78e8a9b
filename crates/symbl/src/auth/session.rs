//! Authenticated session state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::Result;
use crate::transport::RequestContext;

use super::authenticator::Authenticator;
use super::credentials::Credentials;
use super::tokens::AccessToken;

/// The live pairing of credentials and the current bearer token.
///
/// Sessions are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Requests read a snapshot of the token; a
/// re-authentication swaps the whole token under the write lock through
/// [`Session::install`], the only mutation a session allows.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    credentials: Credentials,
    token: RwLock<AccessToken>,
}

impl Session {
    /// Pair `credentials` with an already issued token.
    pub fn new(credentials: Credentials, token: AccessToken) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                credentials,
                token: RwLock::new(token),
            }),
        }
    }

    /// Authenticate and create a session from the issued token.
    #[instrument(skip(ctx, authenticator, credentials), fields(app_id = %credentials.app_id()))]
    pub async fn login(
        ctx: &RequestContext,
        authenticator: &Authenticator,
        credentials: Credentials,
    ) -> Result<Self> {
        let token = authenticator.authenticate(ctx, &credentials).await?;
        debug!(expires_at = %token.expires_at(), "Session created");
        Ok(Self::new(credentials, token))
    }

    /// Returns the credentials used to mint new tokens.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Returns a snapshot of the current token.
    pub async fn access_token(&self) -> AccessToken {
        self.inner.token.read().await.clone()
    }

    /// Returns the expiry of the current token.
    pub async fn expires_at(&self) -> DateTime<Utc> {
        self.inner.token.read().await.expires_at()
    }

    /// Replace the current token.
    pub async fn install(&self, token: AccessToken) {
        let mut current = self.inner.token.write().await;
        *current = token;
        debug!(expires_at = %current.expires_at(), "Installed new access token");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.inner.credentials)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
