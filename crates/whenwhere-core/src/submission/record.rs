//! The final persisted artifact of one completed session.

use crate::experience::ExperienceOrder;
use crate::participant::ParticipantIdentity;
use crate::survey::SurveyResponses;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed session's submission.
///
/// Created exactly once per session at survey completion and never
/// mutated afterwards; appended to the submission sink's record list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Unique record identifier (UUID format)
    pub id: String,
    pub identity: ParticipantIdentity,
    /// The randomized order the experiences were presented in, kept for
    /// post-hoc labeling of the ranking answers.
    pub experience_order: ExperienceOrder,
    pub responses: SurveyResponses,
    pub submitted_at: DateTime<Utc>,
}
