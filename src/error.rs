//! Error types for branch-sync
//!
//! Every failure is terminal, so each variant also knows which process exit
//! status it maps to.

use thiserror::Error;

/// Process exit status reported by the `branch-sync` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Merged, or nothing to merge
    Success,
    /// The Bitbucket API rejected a request or could not be reached
    ApiFailure,
    /// Bad invocation: no arguments, unknown flag, missing or invalid setting
    Usage,
    /// The HTTP client could not be initialised
    MissingDependency,
    /// No source branch given
    MissingSource,
    /// No destination branch given
    MissingDestination,
}

impl ExitStatus {
    /// Numeric process exit code
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::ApiFailure => 1,
            Self::Usage => 2,
            Self::MissingDependency => 3,
            Self::MissingSource => 4,
            Self::MissingDestination => 5,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.code())
    }
}

/// Errors that can occur while syncing branches
#[derive(Debug, Error)]
pub enum Error {
    /// Source branch was not supplied
    #[error("source branch is required (-s/--source)")]
    MissingSource,

    /// Destination branch was not supplied
    #[error("destination branch is required (-d/--destination)")]
    MissingDestination,

    /// A credential or repository setting was not supplied by any source
    #[error("{name} is required: pass {flag} or set {env}")]
    MissingSetting {
        /// Human-readable setting name
        name: &'static str,
        /// CLI flag that sets it
        flag: &'static str,
        /// Environment variable that sets it
        env: &'static str,
    },

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// API base URL is not an absolute http(s) URL
    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl {
        /// The rejected value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// HTTP client construction failed
    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),

    /// Bitbucket returned an error or an unusable response
    #[error("Bitbucket API error: {0}")]
    BitbucketApi(String),

    /// Created pull request has no merge link to follow
    #[error("pull request #{0} was created but the response has no merge link")]
    MissingMergeLink(u64),

    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Exit status the binary reports for this error
    pub const fn exit_status(&self) -> ExitStatus {
        match self {
            Self::MissingSource => ExitStatus::MissingSource,
            Self::MissingDestination => ExitStatus::MissingDestination,
            Self::MissingSetting { .. } | Self::Config(_) | Self::InvalidApiUrl { .. } => {
                ExitStatus::Usage
            }
            Self::HttpClient(_) => ExitStatus::MissingDependency,
            Self::BitbucketApi(_) | Self::MissingMergeLink(_) | Self::Http(_) | Self::Json(_) => {
                ExitStatus::ApiFailure
            }
        }
    }
}

/// Result type alias for branch-sync operations
pub type Result<T> = std::result::Result<T, Error>;
