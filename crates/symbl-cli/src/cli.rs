//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use symbl::dispatch::DEFAULT_MAX_ATTEMPTS;

use crate::commands::bookmarks::BookmarksCommand;
use crate::commands::login::LoginArgs;
use crate::commands::summary_ui::SummaryUiArgs;
use crate::commands::upload::UploadArgs;

/// Symbl.ai CLI tool for API exploration.
#[derive(Parser, Debug)]
#[command(name = "symbl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Credentials and endpoints shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Application id
    #[arg(long, env = "APP_ID", global = true, hide_env_values = true)]
    pub app_id: Option<String>,

    /// Application secret
    #[arg(long, env = "APP_SECRET", global = true, hide_env_values = true)]
    pub app_secret: Option<String>,

    /// API base URL
    #[arg(long, env = "SYMBL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Token endpoint URL
    #[arg(long, env = "SYMBL_AUTH_URL", global = true)]
    pub auth_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Attempts per request before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, global = true)]
    pub max_attempts: u32,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and show the issued token
    Login(LoginArgs),

    /// Bookmark operations
    Bookmarks(BookmarksCommand),

    /// Generate a summary page for a conversation
    SummaryUi(SummaryUiArgs),

    /// Upload a local file to an API endpoint
    Upload(UploadArgs),
}
