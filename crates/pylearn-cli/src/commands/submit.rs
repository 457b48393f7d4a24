//! Submit command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use crate::commands::{build_client, read_code};
use crate::output;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Question id
    pub id: u64,

    /// Path to a Python file; reads stdin when omitted or `-`
    pub file: Option<PathBuf>,
}

pub async fn run(args: SubmitArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let code = read_code(args.file.as_deref())?;
    if code.trim().is_empty() {
        bail!("No code provided");
    }

    eprintln!("{}", "Checking...".dimmed());

    let result = client
        .submit_code(args.id, &code)
        .await
        .context("Failed to submit code")?;

    if result.passed {
        output::success(&result.message);
        if result.topic_completed == Some(true) {
            println!("{}", "Topic completed! The next topic is unlocked.".green());
        }
        return Ok(());
    }

    output::error(&result.message);

    if let Some(keywords) = &result.missing_keywords {
        println!("Your code must use these keywords:");
        for keyword in keywords {
            println!("  - {}", keyword);
        }
    } else {
        println!();
        println!("{}", "Your output:".dimmed());
        println!("{}", result.output.as_deref().unwrap_or("(empty)"));
        println!();
        println!("{}", "Expected output:".dimmed());
        println!("{}", result.expected);
    }

    Ok(())
}
