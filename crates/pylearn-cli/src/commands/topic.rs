//! Topic detail command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use pylearn_core::Error;

use crate::commands::build_client;
use crate::output;

#[derive(Args, Debug)]
pub struct TopicArgs {
    /// Topic id
    pub id: u64,

    /// Print the raw topic as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: TopicArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let topic = match client.topic(args.id).await {
        Ok(topic) => topic,
        Err(Error::Api(err)) if err.is_forbidden() => {
            bail!("This topic is locked. Complete previous topics first.");
        }
        Err(Error::Api(err)) if err.is_not_found() => {
            bail!("Topic not found.");
        }
        Err(err) => return Err(err).context("Failed to load topic"),
    };

    if args.json {
        return output::json_pretty(&topic);
    }

    println!("{}", topic.title.bold());
    if !topic.description.is_empty() {
        println!("{}", topic.description.dimmed());
    }
    println!();
    println!("{}", topic.theory);

    println!();
    for question in &topic.questions {
        let marker = if question.is_completed {
            "✓".green().to_string()
        } else {
            "•".to_string()
        };
        println!("{} {:>2}. {} #{}", marker, question.order, question.title, question.id);
    }

    Ok(())
}
