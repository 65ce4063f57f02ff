//! Presentation-boundary events.
//!
//! These four events are the only ways the presentation layer advances
//! session state.

use serde::{Deserialize, Serialize};

/// An event raised by the presentation layer against the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Welcome form submitted with raw field values.
    SubmitIdentity { name: String, email: String },
    /// Participant pressed "Try This Experience" on an intro screen.
    StartExperience,
    /// The active runner signalled completion.
    ExperienceCompleted,
    /// Survey submitted and the submission record committed.
    SurveyCompleted,
}
