//! Upload command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use symbl::RequestContext;

use crate::cli::ConnectionArgs;
use crate::output;

use super::connect;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Local file to upload
    pub path: PathBuf,

    /// API path relative to the base URL (e.g., process/audio)
    #[arg(long, default_value = "process/audio")]
    pub endpoint: String,
}

pub async fn run(
    ctx: &RequestContext,
    connection: &ConnectionArgs,
    args: UploadArgs,
) -> Result<()> {
    let client = connect(ctx, connection).await?;

    let segments: Vec<&str> = args.endpoint.split('/').filter(|s| !s.is_empty()).collect();
    let url = client.config().endpoint(&segments);

    let response: serde_json::Value = client
        .send_file(ctx, url, &args.path)
        .await
        .with_context(|| format!("Failed to upload {}", args.path.display()))?;

    output::json_pretty(&response)?;

    Ok(())
}
