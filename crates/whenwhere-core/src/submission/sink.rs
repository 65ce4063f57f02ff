//! Submission sink trait.
//!
//! Defines the persistence boundary for completed submissions.

use super::record::SubmissionRecord;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract, best-effort store for submission records.
///
/// Decouples the session core from the specific storage mechanism
/// (local JSON file in the shipped prototype, an in-memory fake in
/// tests, a real backend later). Within one session the sink is
/// appended to at most once; implementations must serialize writes
/// across concurrently running sessions themselves.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Appends one record to the store.
    ///
    /// Failures are recoverable by design: callers log and continue,
    /// never surfacing the error to the participant.
    async fn append(&self, record: &SubmissionRecord) -> Result<()>;
}
