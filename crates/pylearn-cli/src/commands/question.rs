//! Question detail command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use pylearn_core::Error;

use crate::commands::build_client;
use crate::output;

#[derive(Args, Debug)]
pub struct QuestionArgs {
    /// Question id
    pub id: u64,

    /// Print the raw question as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: QuestionArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let question = match client.question(args.id).await {
        Ok(question) => question,
        Err(Error::Api(err)) if err.is_forbidden() => {
            bail!("This topic is locked. Complete previous topics first.");
        }
        Err(Error::Api(err)) if err.is_not_found() => {
            bail!("Question not found.");
        }
        Err(err) => return Err(err).context("Failed to load question"),
    };

    if args.json {
        return output::json_pretty(&question);
    }

    println!("{}", question.title.bold());
    output::field("Topic", &question.topic_title);
    if question.is_completed {
        println!("{}", "✓ Completed".green());
    }
    if let Some(attempts) = question.attempts {
        if attempts > 0 {
            output::field("Attempts", &attempts.to_string());
        }
    }

    println!();
    println!("{}", question.description);

    if let Some(hint) = &question.hint {
        println!();
        println!("{} {}", "Hint:".yellow(), hint);
    }

    println!();
    println!("{}", "Expected output:".dimmed());
    println!("{}", question.expected_output);

    if let Some(code) = &question.submitted_code {
        if !code.trim().is_empty() {
            println!();
            println!("{}", "Your last submission:".dimmed());
            println!("{}", code);
        }
    }

    Ok(())
}
