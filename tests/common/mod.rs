//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;
mod recording_progress;

pub use mock_platform::{CreateResponse, MockPlatformService};
pub use recording_progress::{Journal, RecordingProgress};

use branch_sync::config::SyncConfig;
use branch_sync::types::{Credentials, PlatformConfig, PullRequest};
use serde_json::json;

/// Platform config for the `acme/widgets` repository on `api_url`
pub fn bitbucket_config(api_url: &str) -> PlatformConfig {
    PlatformConfig {
        owner: "acme".to_string(),
        slug: "widgets".to_string(),
        api_url: api_url.to_string(),
    }
}

/// Credentials whose basic-auth header is `Basic Y2ktYm90OnNlY3JldA==`
pub fn test_credentials() -> Credentials {
    Credentials {
        username: "ci-bot".to_string(),
        password: "secret".to_string(),
    }
}

/// Basic-auth header value for [`test_credentials`]
pub const TEST_AUTH_HEADER: &str = "Basic Y2ktYm90OnNlY3JldA==";

/// Sync config for `develop` -> `main` in `acme/widgets`
pub fn sync_config() -> SyncConfig {
    SyncConfig {
        source: "develop".to_string(),
        destination: "main".to_string(),
        credentials: test_credentials(),
        platform: bitbucket_config("https://api.bitbucket.org/2.0"),
    }
}

/// Pull request fixture
pub fn make_pr(id: u64) -> PullRequest {
    PullRequest {
        id,
        title: "Merge develop into main".to_string(),
        html_url: Some(format!("https://bitbucket.org/acme/widgets/pull-requests/{id}")),
        merge_url: format!(
            "https://api.bitbucket.org/2.0/repositories/acme/widgets/pullrequests/{id}/merge"
        ),
    }
}

/// Bitbucket error body carrying `message`
pub fn error_body(message: &str) -> String {
    json!({ "type": "error", "error": { "message": message } }).to_string()
}
