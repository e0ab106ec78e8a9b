//! List bookmarks command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use symbl::RequestContext;

use crate::cli::ConnectionArgs;
use crate::commands::connect;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Conversation id
    pub conversation_id: String,
}

pub async fn run(ctx: &RequestContext, connection: &ConnectionArgs, args: ListArgs) -> Result<()> {
    let client = connect(ctx, connection).await?;

    let result = client
        .get_bookmarks(ctx, &args.conversation_id)
        .await
        .context("Failed to list bookmarks")?;

    // One JSON object per line
    for bookmark in &result.bookmarks {
        output::json(bookmark)?;
    }

    eprintln!(
        "{}",
        format!("{} bookmark(s)", result.bookmarks.len()).dimmed()
    );

    Ok(())
}
