//! Get bookmark command implementation.

use anyhow::{Context, Result};
use clap::Args;
use symbl::RequestContext;

use crate::cli::ConnectionArgs;
use crate::commands::connect;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Conversation id
    pub conversation_id: String,

    /// Bookmark id
    pub bookmark_id: String,
}

pub async fn run(ctx: &RequestContext, connection: &ConnectionArgs, args: GetArgs) -> Result<()> {
    let client = connect(ctx, connection).await?;

    let bookmark = client
        .get_bookmark(ctx, &args.conversation_id, &args.bookmark_id)
        .await
        .context("Failed to get bookmark")?;

    output::json_pretty(&bookmark)?;

    Ok(())
}
