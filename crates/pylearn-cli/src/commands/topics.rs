//! Topics listing command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::commands::build_client;
use crate::output;

#[derive(Args, Debug)]
pub struct TopicsArgs {
    /// Print the raw topic list as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: TopicsArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let topics = client.topics().await.context("Failed to load topics")?;

    if args.json {
        return output::json_pretty(&topics);
    }

    for topic in &topics {
        let status = if topic.is_completed {
            "completed".green().to_string()
        } else if topic.is_unlocked {
            format!("{}/{}", topic.completed_count, topic.questions_count)
        } else {
            "locked".dimmed().to_string()
        };

        println!("{:>3}. {} [{}] #{}", topic.order, topic.title, status, topic.id);
    }

    Ok(())
}
