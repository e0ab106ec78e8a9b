//! Bookmark subcommand implementations.

mod delete;
mod get;
mod list;
mod summary;
mod write;

use anyhow::Result;
use clap::{Args, Subcommand};
use symbl::RequestContext;
use symbl::api::{BookmarkRequest, BookmarkUser};

use crate::cli::ConnectionArgs;

#[derive(Args, Debug)]
pub struct BookmarksCommand {
    #[command(subcommand)]
    pub command: BookmarksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BookmarksSubcommand {
    /// List the bookmarks of a conversation
    List(list::ListArgs),

    /// Fetch a single bookmark
    Get(get::GetArgs),

    /// Create a bookmark
    Create(write::CreateArgs),

    /// Replace a bookmark
    Update(write::UpdateArgs),

    /// Delete a bookmark
    Delete(delete::DeleteArgs),

    /// Show generated bookmark summaries
    Summary(summary::SummaryArgs),
}

/// Bookmark content shared by create and update.
#[derive(Args, Debug)]
pub struct BookmarkFields {
    /// Short label
    #[arg(long, default_value = "")]
    pub label: String,

    /// What the bookmarked span is about
    #[arg(long)]
    pub description: String,

    /// Author display name
    #[arg(long)]
    pub user_name: String,

    /// Author id (usually the email address)
    #[arg(long)]
    pub user_id: String,

    /// Author email
    #[arg(long)]
    pub email: String,

    /// Start of the span, in seconds from the start of the conversation
    #[arg(long, default_value_t = 0)]
    pub begin_time_offset: u64,

    /// Length of the span in seconds
    #[arg(long)]
    pub duration: u64,
}

impl From<BookmarkFields> for BookmarkRequest {
    fn from(fields: BookmarkFields) -> Self {
        BookmarkRequest {
            label: fields.label,
            description: fields.description,
            user: BookmarkUser {
                name: fields.user_name,
                user_id: fields.user_id,
                email: fields.email,
            },
            begin_time_offset: fields.begin_time_offset,
            duration: fields.duration,
        }
    }
}

pub async fn handle(
    ctx: &RequestContext,
    connection: &ConnectionArgs,
    cmd: BookmarksCommand,
) -> Result<()> {
    match cmd.command {
        BookmarksSubcommand::List(args) => list::run(ctx, connection, args).await,
        BookmarksSubcommand::Get(args) => get::run(ctx, connection, args).await,
        BookmarksSubcommand::Create(args) => write::create(ctx, connection, args).await,
        BookmarksSubcommand::Update(args) => write::update(ctx, connection, args).await,
        BookmarksSubcommand::Delete(args) => delete::run(ctx, connection, args).await,
        BookmarksSubcommand::Summary(args) => summary::run(ctx, connection, args).await,
    }
}
