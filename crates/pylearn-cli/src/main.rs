//! pylearn - CLI for the PyLearn learning platform.
//!
//! This is a thin wrapper over the `pylearn-client` library: it signs in,
//! browses topics and questions, and runs or submits Python snippets
//! against the remote grader.

mod cli;
mod commands;
mod output;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Register(args) => commands::register::run(args, &cli.api_url).await,
        Commands::Login(args) => commands::login::run(args, &cli.api_url).await,
        Commands::Logout(args) => commands::logout::run(args, &cli.api_url).await,
        Commands::Whoami(args) => commands::whoami::run(args, &cli.api_url).await,
        Commands::Dashboard(args) => commands::dashboard::run(args, &cli.api_url).await,
        Commands::Topics(args) => commands::topics::run(args, &cli.api_url).await,
        Commands::Topic(args) => commands::topic::run(args, &cli.api_url).await,
        Commands::Question(args) => commands::question::run(args, &cli.api_url).await,
        Commands::Run(args) => commands::run::run(args, &cli.api_url).await,
        Commands::Submit(args) => commands::submit::run(args, &cli.api_url).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
