//! Login command implementation.

use anyhow::Result;
use clap::Args;
use symbl::RequestContext;

use crate::cli::ConnectionArgs;
use crate::output;

use super::connect;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Print the raw access token
    #[arg(long)]
    pub show_token: bool,
}

pub async fn run(ctx: &RequestContext, connection: &ConnectionArgs, args: LoginArgs) -> Result<()> {
    let client = connect(ctx, connection).await?;
    let token = client.session().access_token().await;

    output::success("Logged in successfully");
    println!();
    output::field("App ID", client.session().credentials().app_id());
    output::field("Auth URL", client.config().auth_url().as_str());
    output::field("Expires", &token.expires_at().to_rfc3339());
    if args.show_token {
        output::field("Token", token.as_str());
    }

    Ok(())
}
