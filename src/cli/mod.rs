//! Command-line front end

pub mod style;
mod sync;

pub use sync::run_sync;

use anstream::println;
use async_trait::async_trait;
use branch_sync::sync::ProgressCallback;
use branch_sync::types::PullRequest;
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;
use style::{Stylize, arrow, check, hyperlink, spinner_style};

/// Progress reporter for terminal output
///
/// Shows a spinner while an API call is in flight and prints a line once it
/// completes. Spinners are hidden automatically when stderr is not a terminal,
/// so CI logs only get the completion lines.
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create a reporter with no active spinner
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start(&self, message: String) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    /// Remove any active spinner
    pub fn clear(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(spinner) = slot.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_creating(&self, source: &str, destination: &str) {
        self.start(format!(
            "Opening pull request {} {} {}...",
            source.emphasis(),
            arrow(),
            destination.emphasis()
        ));
    }

    async fn on_created(&self, pr: &PullRequest) {
        self.clear();
        let number = format!("#{}", pr.id);
        let label = pr
            .html_url
            .as_deref()
            .map_or_else(|| number.accent(), |url| hyperlink(&number, url).accent());
        println!("{} Opened pull request {} {}", check(), label, pr.title.muted());
    }

    async fn on_merging(&self, pr: &PullRequest) {
        let number = format!("#{}", pr.id);
        self.start(format!("Merging pull request {}...", number.accent()));
    }

    async fn on_message(&self, message: &str) {
        self.clear();
        println!("{}", message.muted());
    }
}
