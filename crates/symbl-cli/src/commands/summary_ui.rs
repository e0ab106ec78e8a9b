//! Summary UI command implementation.

use anyhow::{Context, Result};
use clap::Args;
use symbl::RequestContext;

use crate::cli::ConnectionArgs;
use crate::output;

use super::connect;

#[derive(Args, Debug)]
pub struct SummaryUiArgs {
    /// Conversation id
    pub conversation_id: String,

    /// Audio or video URL of the recording (omit for text conversations)
    #[arg(long)]
    pub uri: Option<String>,
}

pub async fn run(
    ctx: &RequestContext,
    connection: &ConnectionArgs,
    args: SummaryUiArgs,
) -> Result<()> {
    let client = connect(ctx, connection).await?;

    let result = client
        .summary_ui(ctx, &args.conversation_id, args.uri.as_deref())
        .await
        .context("Failed to create summary UI")?;

    output::success("Summary page created");
    println!();
    output::field("Name", &result.name);
    output::field("URL", &result.url);

    Ok(())
}
