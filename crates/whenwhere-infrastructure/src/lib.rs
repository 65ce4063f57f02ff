//! Infrastructure layer for the When & Where walkthrough.
//!
//! Provides the concrete submission store (local JSON file) and the
//! platform path resolution it depends on. The domain core only sees
//! the [`SubmissionSink`](whenwhere_core::submission::SubmissionSink)
//! trait.

pub mod json_submission_store;
pub mod paths;

pub use json_submission_store::JsonSubmissionStore;
pub use paths::{PathError, StudyPaths};
