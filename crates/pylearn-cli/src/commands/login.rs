//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pylearn_core::Credentials;

use crate::commands::build_client;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to authenticate with
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let pair = client
        .login(&credentials)
        .await
        .context("Failed to login")?;
    client.store().save(&pair)?;

    let user = client
        .current_user()
        .await
        .context("Failed to fetch user profile")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", &user.username);
    if !user.email.is_empty() {
        output::field("Email", &user.email);
    }

    Ok(())
}
