//! Sync command - open and merge the sync pull request

use crate::cli::CliProgress;
use crate::cli::style::{Stylize, check};
use anstream::println;
use branch_sync::config::{ConfigArgs, SyncConfig};
use branch_sync::error::Result;
use branch_sync::platform::BitbucketService;
use branch_sync::sync::{SyncOutcome, sync_branches};

/// Run the sync command
pub async fn run_sync(args: ConfigArgs) -> Result<()> {
    let config = SyncConfig::from_env(args)?;
    let platform = BitbucketService::new(config.credentials.clone(), config.platform.clone())?;

    let progress = CliProgress::new();
    let outcome = sync_branches(&config, &platform, &progress).await;
    progress.clear();

    match outcome? {
        SyncOutcome::UpToDate => {
            println!(
                "{} Nothing to merge: {} is up to date",
                check(),
                config.destination.emphasis()
            );
        }
        SyncOutcome::Merged { pr, result } => {
            let sha = result
                .sha
                .as_deref()
                .map(|sha| format!(" ({})", sha.chars().take(12).collect::<String>()))
                .unwrap_or_default();
            let number = format!("#{}", pr.id);
            println!(
                "{} Merged pull request {} into {}{}",
                check(),
                number.accent(),
                config.destination.emphasis(),
                sha.muted()
            );
        }
    }

    Ok(())
}
