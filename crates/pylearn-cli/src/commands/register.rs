//! Register command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use pylearn_core::{Error, NewAccount};

use crate::commands::build_client;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Password confirmation; defaults to the password itself
    #[arg(long)]
    pub confirm: Option<String>,
}

pub async fn run(args: RegisterArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let confirm = args.confirm.as_deref().unwrap_or(&args.password);
    let account = NewAccount::new(&args.username, &args.email, &args.password, confirm);

    eprintln!("{}", "Creating account...".dimmed());

    let created = match client.register(&account).await {
        Ok(created) => created,
        Err(Error::Api(err)) if !err.field_errors.is_empty() => {
            for (field, messages) in &err.field_errors {
                output::error(&format!("{}: {}", field, messages.join(", ")));
            }
            bail!("Registration failed");
        }
        Err(err) => return Err(err).context("Failed to register"),
    };

    // Registration doubles as login: the backend issues a pair right away.
    client.store().save(&created.tokens)?;

    output::success(&created.message);
    println!();
    output::field("User", &created.user.username);
    if !created.user.email.is_empty() {
        output::field("Email", &created.user.email);
    }

    Ok(())
}
