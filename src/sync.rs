//! Branch sync flow
//!
//! Open a pull request from source into destination, then merge it. A
//! "no changes" answer from the platform ends the run successfully without a
//! merge.

use crate::config::SyncConfig;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{CreatePrOutcome, CreatePrRequest, MergeResult, PullRequest};
use async_trait::async_trait;
use tracing::{debug, info};

/// Progress callback for reporting sync status
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Pull request creation is about to start
    async fn on_creating(&self, source: &str, destination: &str);

    /// Pull request was created
    async fn on_created(&self, pr: &PullRequest);

    /// Merge of `pr` is about to start
    async fn on_merging(&self, pr: &PullRequest);

    /// Free-form status message
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards everything
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_creating(&self, _source: &str, _destination: &str) {}
    async fn on_created(&self, _pr: &PullRequest) {}
    async fn on_merging(&self, _pr: &PullRequest) {}
    async fn on_message(&self, _message: &str) {}
}

/// How a sync run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Destination already contained everything in source
    UpToDate,
    /// A pull request was opened and merged
    Merged {
        /// The pull request that was merged
        pr: PullRequest,
        /// What the merge call reported
        result: MergeResult,
    },
}

/// Run one sync: create the pull request, then merge it unless there was
/// nothing to pull.
pub async fn sync_branches(
    config: &SyncConfig,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
) -> Result<SyncOutcome> {
    let request = CreatePrRequest::for_sync(&config.source, &config.destination);

    info!(
        source = %config.source,
        destination = %config.destination,
        owner = %platform.config().owner,
        slug = %platform.config().slug,
        "syncing branches"
    );
    progress
        .on_creating(&config.source, &config.destination)
        .await;

    let pr = match platform.create_pr(&request).await? {
        CreatePrOutcome::NoChanges => {
            debug!("nothing to merge, skipping merge");
            progress
                .on_message(&format!(
                    "{} already contains {}",
                    config.destination, config.source
                ))
                .await;
            return Ok(SyncOutcome::UpToDate);
        }
        CreatePrOutcome::Created(pr) => pr,
    };
    progress.on_created(&pr).await;

    progress.on_merging(&pr).await;
    let result = platform.merge_pr(&pr).await?;
    info!(pr_id = pr.id, sha = ?result.sha, "merged pull request");

    Ok(SyncOutcome::Merged { pr, result })
}
