//! Create and update bookmark command implementations.

use anyhow::{Context, Result};
use clap::Args;
use symbl::RequestContext;
use symbl::api::BookmarkRequest;

use crate::cli::ConnectionArgs;
use crate::commands::connect;
use crate::output;

use super::BookmarkFields;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Conversation id
    pub conversation_id: String,

    #[command(flatten)]
    pub fields: BookmarkFields,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Conversation id
    pub conversation_id: String,

    /// Bookmark id
    pub bookmark_id: String,

    #[command(flatten)]
    pub fields: BookmarkFields,
}

pub async fn create(
    ctx: &RequestContext,
    connection: &ConnectionArgs,
    args: CreateArgs,
) -> Result<()> {
    let request = BookmarkRequest::from(args.fields);
    let client = connect(ctx, connection).await?;

    let bookmark = client
        .create_bookmark(ctx, &args.conversation_id, &request)
        .await
        .context("Failed to create bookmark")?;

    output::success("Bookmark created");
    output::field("ID", &bookmark.id);

    Ok(())
}

pub async fn update(
    ctx: &RequestContext,
    connection: &ConnectionArgs,
    args: UpdateArgs,
) -> Result<()> {
    let request = BookmarkRequest::from(args.fields);
    let client = connect(ctx, connection).await?;

    let bookmark = client
        .update_bookmark(ctx, &args.conversation_id, &args.bookmark_id, &request)
        .await
        .context("Failed to update bookmark")?;

    output::success("Bookmark updated");
    output::json_pretty(&bookmark)?;

    Ok(())
}
