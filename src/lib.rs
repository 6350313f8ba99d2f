//! branch-sync: keep two Bitbucket branches in sync from CI
//!
//! Opens a pull request from a source branch into a destination branch and
//! merges it straight away. When Bitbucket reports there is nothing to pull
//! the run ends successfully without merging.

pub mod config;
pub mod error;
pub mod platform;
pub mod sync;
pub mod types;
