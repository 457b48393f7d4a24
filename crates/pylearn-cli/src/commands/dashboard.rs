//! Dashboard command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::commands::build_client;
use crate::output;

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Print the raw dashboard as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: DashboardArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let dashboard = client
        .dashboard()
        .await
        .context("Failed to load dashboard")?;

    if args.json {
        return output::json_pretty(&dashboard);
    }

    output::field("User", &dashboard.user.username);
    output::field(
        "Topics",
        &format!(
            "{}/{} completed",
            dashboard.progress.completed_topics, dashboard.progress.total_topics
        ),
    );
    output::field(
        "Questions",
        &format!(
            "{}/{} completed",
            dashboard.progress.completed_questions, dashboard.progress.total_questions
        ),
    );

    println!();
    for topic in &dashboard.topics {
        let marker = if topic.is_completed {
            "✓".green().to_string()
        } else if topic.is_unlocked {
            "•".to_string()
        } else {
            "🔒".to_string()
        };

        println!(
            "{} {:>2}. {} ({}/{})",
            marker, topic.order, topic.title, topic.completed_count, topic.questions_count
        );
    }

    Ok(())
}
