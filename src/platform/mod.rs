//! Platform services
//!
//! The sync flow talks to the hosting provider only through
//! [`PlatformService`], so it can run against Bitbucket or an in-memory mock.

mod bitbucket;

pub use bitbucket::BitbucketService;

use crate::error::Result;
use crate::types::{CreatePrOutcome, CreatePrRequest, MergeResult, PlatformConfig, PullRequest};
use async_trait::async_trait;

/// Platform service trait for pull request operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Open a pull request.
    ///
    /// Returns [`CreatePrOutcome::NoChanges`] when the provider reports there
    /// is nothing to pull; every other provider error is an `Err`.
    async fn create_pr(&self, request: &CreatePrRequest) -> Result<CreatePrOutcome>;

    /// Merge a pull request with a merge commit, keeping the source branch
    async fn merge_pr(&self, pr: &PullRequest) -> Result<MergeResult>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
