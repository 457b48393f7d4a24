//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands;

/// PyLearn command line client.
#[derive(Parser, Debug)]
#[command(name = "pylearn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Base URL of the PyLearn API
    #[arg(
        long,
        env = "PYLEARN_API_URL",
        default_value = "https://pylearn-backend.onrender.com/api",
        global = true
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account and sign in
    Register(commands::register::RegisterArgs),

    /// Sign in with username and password
    Login(commands::login::LoginArgs),

    /// Discard the stored session
    Logout(commands::logout::LogoutArgs),

    /// Display the signed-in user
    Whoami(commands::whoami::WhoamiArgs),

    /// Show the progress dashboard
    Dashboard(commands::dashboard::DashboardArgs),

    /// List all topics
    Topics(commands::topics::TopicsArgs),

    /// Show a topic with its questions
    Topic(commands::topic::TopicArgs),

    /// Show a question
    Question(commands::question::QuestionArgs),

    /// Run a Python snippet without grading it
    Run(commands::run::RunArgs),

    /// Submit a solution for grading
    Submit(commands::submit::SubmitArgs),
}
