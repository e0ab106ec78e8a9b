//! Token acquisition.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument, warn};
use url::Url;

use crate::Result;
use crate::error::AuthError;
use crate::transport::{ApiRequest, RequestContext, Transport};

use super::credentials::Credentials;
use super::tokens::AccessToken;

/// Token endpoint of the production API.
pub const DEFAULT_AUTH_URL: &str = "https://api.symbl.ai/oauth2/token:generate";

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: i64,
}

/// Exchanges [`Credentials`] for an [`AccessToken`].
///
/// Each call is exactly one POST to the token endpoint. Failures are
/// returned as-is; retrying is the dispatcher's job.
#[derive(Clone)]
pub struct Authenticator {
    transport: Arc<dyn Transport>,
    endpoint: Url,
}

impl Authenticator {
    /// Create an authenticator posting to `endpoint` over `transport`.
    pub fn new(transport: Arc<dyn Transport>, endpoint: Url) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    /// Returns the token endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request a fresh token.
    ///
    /// # Errors
    ///
    /// - [`crate::error::InvalidInputError`] if the credentials are incomplete;
    ///   no request is sent
    /// - whatever the transport returned, unchanged
    /// - [`AuthError::EmptyToken`] if the server answered 2xx without a token
    #[instrument(skip(self, ctx, credentials), fields(app_id = %credentials.app_id()))]
    pub async fn authenticate(
        &self,
        ctx: &RequestContext,
        credentials: &Credentials,
    ) -> Result<AccessToken> {
        credentials.validate()?;

        let request = ApiRequest::post(self.endpoint.clone()).json(credentials)?;
        let body = self.transport.send(ctx, &request, None).await?;
        let response: TokenResponse = serde_json::from_slice(&body)?;

        let token = match response.access_token {
            Some(token) if !token.is_empty() => token,
            _ => {
                warn!("Token endpoint returned an empty access token");
                return Err(AuthError::EmptyToken.into());
            }
        };

        info!(expires_in = response.expires_in, "Authenticated");
        Ok(AccessToken::expiring_in(token, response.expires_in))
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}
