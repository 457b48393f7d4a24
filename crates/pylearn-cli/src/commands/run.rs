//! Run-code command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use crate::commands::{build_client, read_code};
use crate::output;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a Python file; reads stdin when omitted or `-`
    pub file: Option<PathBuf>,
}

pub async fn run(args: RunArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let code = read_code(args.file.as_deref())?;
    if code.trim().is_empty() {
        bail!("No code provided");
    }

    eprintln!("{}", "Running...".dimmed());

    let result = client.run_code(&code).await.context("Failed to run code")?;

    if let Some(error) = result.error {
        output::error("Execution failed");
        println!("{}", error);
    } else {
        println!("{}", result.output.unwrap_or_else(|| "(no output)".to_string()));
    }

    Ok(())
}
