//! branch-sync CLI
//!
//! Usage:
//!   branch-sync -s develop -d main
//!   branch-sync -s release -d main -u ci-bot -p "$APP_PASSWORD" --repo-owner acme --repo-slug widgets

mod cli;

use anstream::eprintln;
use branch_sync::config::ConfigArgs;
use branch_sync::error::ExitStatus;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use cli::style::Stylize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "branch-sync")]
#[command(version)]
#[command(about = "Open and merge a Bitbucket pull request to keep two branches in sync")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Branch to merge from
    #[arg(short, long)]
    source: Option<String>,

    /// Branch to merge into
    #[arg(short, long)]
    destination: Option<String>,

    /// Bitbucket username [env: BITBUCKET_USERNAME]
    #[arg(short, long)]
    user: Option<String>,

    /// Bitbucket password or app password [env: BITBUCKET_APP_PASSWORD]
    #[arg(short, long)]
    password: Option<String>,

    /// Repository owner or workspace [env: BITBUCKET_REPO_OWNER]
    #[arg(long)]
    repo_owner: Option<String>,

    /// Repository slug [env: BITBUCKET_REPO_SLUG]
    #[arg(long)]
    repo_slug: Option<String>,

    /// REST API base URL [env: BITBUCKET_API_URL]
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// TOML config file with defaults for credentials and repository [env: BRANCH_SYNC_CONFIG]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for ConfigArgs {
    fn from(cli: Cli) -> Self {
        Self {
            source: cli.source,
            destination: cli.destination,
            username: cli.user,
            password: cli.password,
            repo_owner: cli.repo_owner,
            repo_slug: cli.repo_slug,
            api_url: cli.api_url,
            config_path: cli.config,
        }
    }
}

/// Initialize tracing with the given verbosity level
///
/// - 0: warn (default)
/// - 1: info (-v)
/// - 2: debug (-vv)
/// - 3+: trace (-vvv)
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Allow RUST_LOG to override if set
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Print a clap error (or help/version) and pick the exit status
fn usage_exit(err: &clap::Error) -> ExitCode {
    // Nothing useful to do if the terminal is gone
    let _ = err.print();

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitStatus::Usage.into(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_exit(&err),
    };

    init_tracing(cli.verbose);

    match cli::run_sync(cli.into()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "Error:".error());
            err.exit_status().into()
        }
    }
}
