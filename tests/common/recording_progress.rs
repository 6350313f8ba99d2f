//! Progress callback that records what it was told

#![allow(dead_code)]

use async_trait::async_trait;
use branch_sync::sync::ProgressCallback;
use branch_sync::types::PullRequest;
use std::sync::{Arc, Mutex};

/// Ordered log shared between the progress recorder and the mock platform
pub type Journal = Arc<Mutex<Vec<String>>>;

/// Records every callback into a [`Journal`]
pub struct RecordingProgress {
    journal: Journal,
}

impl RecordingProgress {
    /// Create a recorder writing to `journal`
    pub const fn new(journal: Journal) -> Self {
        Self { journal }
    }

    fn record(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_creating(&self, source: &str, destination: &str) {
        self.record(format!("on_creating {source} -> {destination}"));
    }

    async fn on_created(&self, pr: &PullRequest) {
        self.record(format!("on_created #{}", pr.id));
    }

    async fn on_merging(&self, pr: &PullRequest) {
        self.record(format!("on_merging #{}", pr.id));
    }

    async fn on_message(&self, message: &str) {
        self.record(format!("on_message {message}"));
    }
}
