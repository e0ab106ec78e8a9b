//! symbl - CLI tool for exploring the Symbl.ai API.
//!
//! This is a thin wrapper over the `symbl` library, intended for manual
//! exploration and debugging of conversations, bookmarks and summaries.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use symbl::RequestContext;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{bookmarks, login, summary_ui, upload};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let ctx = RequestContext::new();
    cancel_on_ctrl_c(&ctx);

    match cli.command {
        Commands::Login(args) => login::run(&ctx, &cli.connection, args).await,
        Commands::Bookmarks(cmd) => bookmarks::handle(&ctx, &cli.connection, cmd).await,
        Commands::SummaryUi(args) => summary_ui::run(&ctx, &cli.connection, args).await,
        Commands::Upload(args) => upload::run(&ctx, &cli.connection, args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

/// Abort in-flight requests when the user hits Ctrl-C.
fn cancel_on_ctrl_c(ctx: &RequestContext) {
    let ctx = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupted, cancelling requests");
            ctx.cancel();
        }
    });
}
