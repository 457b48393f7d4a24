//! Whoami command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use pylearn_client::AuthSession;

use crate::commands::build_client;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, api_url: &str) -> Result<()> {
    let session = AuthSession::new(build_client(api_url)?);

    session
        .bootstrap()
        .await
        .context("Failed to validate session")?;

    let Some(user) = session.current_user() else {
        bail!("No active session. Run 'pylearn login' first.");
    };

    output::field("User", &user.username);
    if !user.email.is_empty() {
        output::field("Email", &user.email);
    }
    output::field("Id", &user.id.to_string());

    Ok(())
}
