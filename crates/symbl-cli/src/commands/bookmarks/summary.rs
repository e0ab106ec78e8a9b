//! Bookmark summary command implementation.

use anyhow::{Context, Result};
use clap::Args;
use symbl::RequestContext;

use crate::cli::ConnectionArgs;
use crate::commands::connect;
use crate::output;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Conversation id
    pub conversation_id: String,

    /// Summarize only this bookmark
    #[arg(long)]
    pub bookmark: Option<String>,

    /// Narrow the summaries (repeatable; ignored with --bookmark)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

pub async fn run(
    ctx: &RequestContext,
    connection: &ConnectionArgs,
    args: SummaryArgs,
) -> Result<()> {
    let client = connect(ctx, connection).await?;

    if let Some(bookmark_id) = &args.bookmark {
        let summary = client
            .get_bookmark_summary(ctx, &args.conversation_id, bookmark_id)
            .await
            .context("Failed to get bookmark summary")?;
        return output::json_pretty(&summary);
    }

    let filters: Vec<&str> = args.filters.iter().map(String::as_str).collect();
    let summaries = client
        .get_bookmarks_summary(ctx, &args.conversation_id, &filters)
        .await
        .context("Failed to get bookmarks summary")?;

    output::json_pretty(&summaries)
}
