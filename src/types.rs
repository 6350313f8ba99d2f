//! Core types for branch-sync

use serde::{Deserialize, Serialize};

/// Bitbucket Cloud REST API base
pub const DEFAULT_API_URL: &str = "https://api.bitbucket.org/2.0";

/// Error message Bitbucket returns when the source has nothing the
/// destination lacks
pub const NO_CHANGES_MESSAGE: &str = "There are no changes to be pulled";

/// HTTP Basic credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username
    pub username: String,
    /// Account password or app password
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or workspace)
    pub owner: String,
    /// Repository slug
    pub slug: String,
    /// REST API base URL, without trailing slash
    pub api_url: String,
}

/// What to open a pull request for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrRequest {
    /// Branch to merge from
    pub source: String,
    /// Branch to merge into
    pub destination: String,
    /// Pull request title
    pub title: String,
    /// Pull request description
    pub description: String,
}

impl CreatePrRequest {
    /// Request with the fixed sync title and description
    pub fn for_sync(source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            title: format!("Merge {source} into {destination}"),
            description: format!(
                "Automated pull request opened by branch-sync to keep {destination} in sync with {source}."
            ),
        }
    }
}

/// A newly created pull request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request id
    pub id: u64,
    /// Pull request title
    pub title: String,
    /// Web URL, when the provider returned one
    pub html_url: Option<String>,
    /// Endpoint that merges this pull request
    pub merge_url: String,
}

/// Result of asking the platform to open a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatePrOutcome {
    /// Pull request exists and can be merged
    Created(PullRequest),
    /// Destination already contains everything in source
    NoChanges,
}

/// Result of a merge operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResult {
    /// Pull request state after the call, when reported (e.g. "MERGED")
    pub state: Option<String>,
    /// Merge commit hash, when reported
    pub sha: Option<String>,
}
