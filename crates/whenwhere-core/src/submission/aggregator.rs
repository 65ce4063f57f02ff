//! Response aggregation: one submission record per completed session.

use super::clock::{Clock, SystemClock};
use super::record::SubmissionRecord;
use super::sink::SubmissionSink;
use crate::experience::ExperienceOrder;
use crate::participant::ParticipantIdentity;
use crate::survey::SurveyResponses;
use std::sync::Arc;
use uuid::Uuid;

/// Merges identity, presentation order, and survey answers into one
/// write-once [`SubmissionRecord`] and commits it through the sink.
///
/// The sink is injected rather than reached ambiently so tests can
/// substitute an in-memory fake.
pub struct ResponseAggregator {
    sink: Arc<dyn SubmissionSink>,
    clock: Arc<dyn Clock>,
}

impl ResponseAggregator {
    /// Creates an aggregator timestamping with the system clock.
    pub fn new(sink: Arc<dyn SubmissionSink>) -> Self {
        Self::with_clock(sink, Arc::new(SystemClock))
    }

    /// Creates an aggregator with an explicit clock (for tests).
    pub fn with_clock(sink: Arc<dyn SubmissionSink>, clock: Arc<dyn Clock>) -> Self {
        Self { sink, clock }
    }

    /// Builds the submission record and appends it to the sink.
    ///
    /// Persistence is fire-and-forget: a sink failure is logged and
    /// swallowed so the session still reaches the Thanks step. The
    /// constructed record is returned either way.
    pub async fn finalize(
        &self,
        identity: ParticipantIdentity,
        order: ExperienceOrder,
        responses: SurveyResponses,
    ) -> SubmissionRecord {
        let record = SubmissionRecord {
            id: Uuid::new_v4().to_string(),
            identity,
            experience_order: order,
            responses,
            submitted_at: self.clock.now(),
        };

        match self.sink.append(&record).await {
            Ok(()) => tracing::info!(record_id = %record.id, "submission persisted"),
            Err(error) => {
                tracing::warn!(record_id = %record.id, %error, "submission persistence failed; continuing to thanks");
            }
        }

        record
    }
}
