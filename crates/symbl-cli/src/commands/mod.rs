//! Subcommand implementations.

pub mod bookmarks;
pub mod login;
pub mod summary_ui;
pub mod upload;

use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use symbl::dispatch::DEFAULT_RETRY_DELAY;
use symbl::{Client, ClientConfig, Credentials, RequestContext, RetryPolicy};

use crate::cli::ConnectionArgs;

/// Build the client configuration from the global flags.
pub fn client_config(args: &ConnectionArgs) -> Result<ClientConfig> {
    let mut config = ClientConfig::default()
        .with_request_timeout(Duration::from_secs(args.timeout))
        .with_retry_policy(RetryPolicy::new(args.max_attempts, DEFAULT_RETRY_DELAY));

    if let Some(url) = &args.api_url {
        config = config.with_api_url(url).context("Invalid API URL")?;
    }
    if let Some(url) = &args.auth_url {
        config = config.with_auth_url(url).context("Invalid auth URL")?;
    }

    Ok(config)
}

/// Log in with the global credentials.
pub async fn connect(ctx: &RequestContext, args: &ConnectionArgs) -> Result<Client> {
    let config = client_config(args)?;
    let credentials = Credentials::new(
        args.app_id.clone().unwrap_or_default(),
        args.app_secret.clone().unwrap_or_default(),
    );

    eprintln!("{}", "Logging in...".dimmed());

    Client::with_config(ctx, credentials, config)
        .await
        .context("Failed to login (set --app-id/--app-secret or APP_ID/APP_SECRET)")
}
