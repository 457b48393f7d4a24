//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::commands::build_client;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;
    client.store().clear()?;

    output::success("Logged out");

    Ok(())
}
