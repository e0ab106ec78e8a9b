//! Authenticated API client.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, instrument};
use url::Url;

use crate::Result;
use crate::auth::{Authenticator, Credentials, Session};
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::TransportError;
use crate::transport::{ApiRequest, HttpTransport, RequestContext, Transport};

/// A logged-in client for the Symbl REST API.
///
/// Construction authenticates once; afterwards every request goes through a
/// [`Dispatcher`] that renews the token whenever the API rejects it.
///
/// # Example
///
/// ```no_run
/// use symbl::{Client, Credentials, RequestContext};
///
/// # async fn example() -> Result<(), symbl::Error> {
/// let ctx = RequestContext::new();
/// let client = Client::new(&ctx, Credentials::new("app-id", "app-secret")).await?;
///
/// let bookmarks = client.get_bookmarks(&ctx, "conversation-id").await?;
/// println!("{} bookmarks", bookmarks.bookmarks.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    config: ClientConfig,
    dispatcher: Dispatcher,
}

impl Client {
    /// Log in with credentials taken from `APP_ID` and `APP_SECRET`.
    ///
    /// Endpoint overrides are read by [`ClientConfig::from_env`]. Missing
    /// variables fail before any network access.
    pub async fn from_env(ctx: &RequestContext) -> Result<Self> {
        let credentials = Credentials::from_env()?;
        let config = ClientConfig::from_env()?;
        Self::with_config(ctx, credentials, config).await
    }

    /// Log in against the production API.
    pub async fn new(ctx: &RequestContext, credentials: Credentials) -> Result<Self> {
        Self::with_config(ctx, credentials, ClientConfig::default()).await
    }

    /// Log in using `config` and a fresh HTTP transport.
    pub async fn with_config(
        ctx: &RequestContext,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        credentials.validate()?;
        let transport = Arc::new(HttpTransport::with_timeout(config.request_timeout())?);
        Self::with_transport(ctx, credentials, config, transport).await
    }

    /// Log in using `config` over a caller-supplied transport.
    #[instrument(skip_all, fields(app_id = %credentials.app_id()))]
    pub async fn with_transport(
        ctx: &RequestContext,
        credentials: Credentials,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let authenticator = Authenticator::new(transport.clone(), config.auth_url().clone());
        let session = Session::login(ctx, &authenticator, credentials).await?;
        let dispatcher = Dispatcher::new(transport, authenticator, session, config.retry_policy());

        info!("Client ready");
        Ok(Self { config, dispatcher })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        self.dispatcher.session()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Send an arbitrary request and decode its JSON response.
    pub async fn send<R>(&self, ctx: &RequestContext, request: &ApiRequest) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.dispatcher.send(ctx, request).await
    }

    /// Send an arbitrary request, ignoring the response body.
    pub async fn send_no_response(&self, ctx: &RequestContext, request: &ApiRequest) -> Result<()> {
        self.dispatcher.send_no_response(ctx, request).await
    }

    /// Upload a local file as the body of a POST to `url`.
    #[instrument(skip_all, fields(%url, path = %path.as_ref().display()))]
    pub async fn send_file<R>(
        &self,
        ctx: &RequestContext,
        url: Url,
        path: impl AsRef<Path>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let data = tokio::fs::read(path.as_ref())
            .await
            .map_err(TransportError::Io)?;
        let request = ApiRequest::post(url).bytes("application/octet-stream", data);
        self.dispatcher.send(ctx, &request).await
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        self.config.endpoint(segments)
    }
}
