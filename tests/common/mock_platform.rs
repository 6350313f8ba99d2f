//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use branch_sync::error::{Error, Result};
use branch_sync::platform::PlatformService;
use branch_sync::types::{
    CreatePrOutcome, CreatePrRequest, MergeResult, PlatformConfig, PullRequest,
};
use std::sync::Mutex;

use super::Journal;

/// Canned answer for `create_pr`
#[derive(Debug, Clone)]
pub enum CreateResponse {
    /// Return `Created` with this pull request
    Created(PullRequest),
    /// Return `NoChanges`
    NoChanges,
    /// Fail with a Bitbucket API error carrying this message
    Error(String),
}

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable create/merge responses
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    create_response: Mutex<CreateResponse>,
    merge_response: Mutex<MergeResult>,
    // Call tracking
    create_pr_calls: Mutex<Vec<CreatePrRequest>>,
    merge_pr_calls: Mutex<Vec<PullRequest>>,
    journal: Mutex<Option<Journal>>,
    // Error injection
    error_on_merge_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config; `create_pr` succeeds with PR #1
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            create_response: Mutex::new(CreateResponse::Created(super::make_pr(1))),
            merge_response: Mutex::new(MergeResult {
                state: Some("MERGED".to_string()),
                sha: Some("abc123def456".to_string()),
            }),
            create_pr_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            journal: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    /// Also log each call into `journal`, interleaved with progress events
    pub fn record_into(&self, journal: Journal) {
        *self.journal.lock().unwrap() = Some(journal);
    }

    fn log(&self, entry: &str) {
        if let Some(journal) = self.journal.lock().unwrap().as_ref() {
            journal.lock().unwrap().push(entry.to_string());
        }
    }

    /// Set the response for `create_pr`
    pub fn set_create_response(&self, response: CreateResponse) {
        *self.create_response.lock().unwrap() = response;
    }

    /// Set the response for `merge_pr`
    pub fn set_merge_response(&self, result: MergeResult) {
        *self.merge_response.lock().unwrap() = result;
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrRequest> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Get all `merge_pr` calls
    pub fn get_merge_pr_calls(&self) -> Vec<PullRequest> {
        self.merge_pr_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn create_pr(&self, request: &CreatePrRequest) -> Result<CreatePrOutcome> {
        self.create_pr_calls.lock().unwrap().push(request.clone());
        self.log("create_pr");

        match self.create_response.lock().unwrap().clone() {
            CreateResponse::Created(pr) => Ok(CreatePrOutcome::Created(pr)),
            CreateResponse::NoChanges => Ok(CreatePrOutcome::NoChanges),
            CreateResponse::Error(message) => Err(Error::BitbucketApi(message)),
        }
    }

    async fn merge_pr(&self, pr: &PullRequest) -> Result<MergeResult> {
        self.merge_pr_calls.lock().unwrap().push(pr.clone());
        self.log(&format!("merge_pr #{}", pr.id));

        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().as_ref() {
            return Err(Error::BitbucketApi(msg.clone()));
        }

        Ok(self.merge_response.lock().unwrap().clone())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
