//! Session orchestration: the single source of truth for which screen
//! is showing.

use super::event::SessionEvent;
use super::step::{Slot, StepState};
use crate::experience::{ExperienceKind, ExperienceOrder};
use crate::participant::{IdentityFieldErrors, ParticipantIdentity};
use rand::Rng;

/// Owns session-level state and step transitions for one participant
/// session, from Welcome to Thanks.
///
/// One instance per participant session; sessions never share state.
/// All transitions are strictly forward. Out-of-sequence calls clamp to
/// the current state with a warn-level log and are never surfaced to
/// the participant.
#[derive(Debug)]
pub struct SessionOrchestrator {
    step: StepState,
    order: Option<ExperienceOrder>,
    identity: Option<ParticipantIdentity>,
}

impl SessionOrchestrator {
    /// Creates a fresh, uninitialized session at the Welcome step.
    pub fn new() -> Self {
        Self {
            step: StepState::Welcome,
            order: None,
            identity: None,
        }
    }

    /// Samples the presentation order and resets to Welcome.
    ///
    /// This is the one place randomness enters the session. Sampling
    /// happens once: re-entry (e.g. a re-render calling initialize
    /// again) keeps the already-chosen order and the current step, so
    /// an in-progress session is never re-biased.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.order.is_some() {
            tracing::debug!("session already initialized; keeping existing order");
            return;
        }
        let order = ExperienceOrder::sample(rng);
        tracing::info!(order = ?order.kinds(), "session initialized");
        self.order = Some(order);
        self.step = StepState::Welcome;
        self.identity = None;
    }

    /// The screen currently showing.
    pub fn current_step(&self) -> StepState {
        self.step
    }

    /// The immutable per-session presentation order, once sampled.
    pub fn experience_order(&self) -> Option<&ExperienceOrder> {
        self.order.as_ref()
    }

    /// The participant identity, once the welcome form succeeded.
    pub fn identity(&self) -> Option<&ParticipantIdentity> {
        self.identity.as_ref()
    }

    /// Maps the active intro/experience slot to its entry in the
    /// presentation order. `None` outside intro/experience steps.
    pub fn current_experience(&self) -> Option<ExperienceKind> {
        let slot = self.step.slot()?;
        self.order.as_ref()?.get(slot.index())
    }

    /// Validates the welcome form and, on success, stores the identity
    /// and advances to `Intro(1)`. On failure the step stays at Welcome
    /// and field-level errors are returned.
    pub fn submit_identity(
        &mut self,
        name: &str,
        email: &str,
    ) -> Result<(), IdentityFieldErrors> {
        if self.step != StepState::Welcome {
            self.warn_out_of_sequence("submit_identity");
            return Ok(());
        }
        let identity = ParticipantIdentity::validate(name, email)?;
        tracing::info!(name = %identity.name, "participant registered");
        self.identity = Some(identity);
        self.step = StepState::Intro { slot: Slot::FIRST };
        Ok(())
    }

    /// Deterministic table-driven transition to the next major step.
    ///
    /// `Intro(n) -> Experience(n)`, `Experience(n<3) -> Intro(n+1)`,
    /// `Experience(3) -> Survey`, `Survey -> Thanks`. Calling from
    /// Welcome or Thanks is a no-op that clamps to the current state.
    /// Returns the (possibly unchanged) current step.
    pub fn advance(&mut self) -> StepState {
        match self.step.successor() {
            Some(next) => {
                tracing::debug!(from = ?self.step, to = ?next, "step advanced");
                self.step = next;
            }
            None => self.warn_out_of_sequence("advance"),
        }
        self.step
    }

    /// Intro screen confirmed; runs the experience in the same slot.
    pub fn start_experience(&mut self) -> StepState {
        match self.step {
            StepState::Intro { .. } => self.advance(),
            _ => {
                self.warn_out_of_sequence("start_experience");
                self.step
            }
        }
    }

    /// Active runner signalled completion; moves to the next intro or,
    /// after the third experience, to the survey.
    pub fn experience_completed(&mut self) -> StepState {
        match self.step {
            StepState::Experience { .. } => self.advance(),
            _ => {
                self.warn_out_of_sequence("experience_completed");
                self.step
            }
        }
    }

    /// Survey submission committed; reaches the terminal Thanks step.
    ///
    /// Only called after the response aggregator has run (persistence
    /// being best-effort, it always has by then).
    pub fn survey_completed(&mut self) -> StepState {
        match self.step {
            StepState::Survey => self.advance(),
            _ => {
                self.warn_out_of_sequence("survey_completed");
                self.step
            }
        }
    }

    /// Applies a presentation-boundary event.
    ///
    /// `SubmitIdentity` may return field-level validation errors; the
    /// other events never do.
    pub fn apply(&mut self, event: &SessionEvent) -> Result<(), IdentityFieldErrors> {
        match event {
            SessionEvent::SubmitIdentity { name, email } => self.submit_identity(name, email),
            SessionEvent::StartExperience => {
                self.start_experience();
                Ok(())
            }
            SessionEvent::ExperienceCompleted => {
                self.experience_completed();
                Ok(())
            }
            SessionEvent::SurveyCompleted => {
                self.survey_completed();
                Ok(())
            }
        }
    }

    // Not reachable through the defined event set; clamp and log rather
    // than surface anything to the participant.
    fn warn_out_of_sequence(&self, operation: &str) {
        tracing::warn!(step = ?self.step, operation, "out-of-sequence call clamped");
    }
}

impl Default for SessionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn initialized() -> SessionOrchestrator {
        let mut orchestrator = SessionOrchestrator::new();
        orchestrator.initialize(&mut StdRng::seed_from_u64(1));
        orchestrator
    }

    #[test]
    fn test_initialize_twice_keeps_order() {
        let mut orchestrator = SessionOrchestrator::new();
        let mut rng = StdRng::seed_from_u64(11);
        orchestrator.initialize(&mut rng);
        let first = orchestrator.experience_order().unwrap().clone();
        orchestrator.initialize(&mut rng);
        assert_eq!(orchestrator.experience_order().unwrap(), &first);
    }

    #[test]
    fn test_initialize_does_not_reset_in_progress_step() {
        let mut orchestrator = initialized();
        orchestrator.submit_identity("Ann", "ann@example.com").unwrap();
        orchestrator.initialize(&mut StdRng::seed_from_u64(99));
        assert_eq!(
            orchestrator.current_step(),
            StepState::Intro { slot: Slot::FIRST }
        );
    }

    #[test]
    fn test_submit_identity_empty_name() {
        let mut orchestrator = initialized();
        let errors = orchestrator.submit_identity("", "a@b.com").unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.email.is_none());
        assert_eq!(orchestrator.current_step(), StepState::Welcome);
    }

    #[test]
    fn test_submit_identity_bad_email() {
        let mut orchestrator = initialized();
        let errors = orchestrator.submit_identity("Ann", "not-an-email").unwrap_err();
        assert!(errors.name.is_none());
        assert!(errors.email.is_some());
        assert_eq!(orchestrator.current_step(), StepState::Welcome);
    }

    #[test]
    fn test_submit_identity_success_reaches_first_intro() {
        let mut orchestrator = initialized();
        orchestrator.submit_identity("Ann", "ann@example.com").unwrap();
        assert_eq!(
            orchestrator.current_step(),
            StepState::Intro { slot: Slot::FIRST }
        );
        let identity = orchestrator.identity().unwrap();
        assert_eq!(identity.name, "Ann");
        assert_eq!(identity.email, "ann@example.com");
    }

    #[test]
    fn test_full_walkthrough_reaches_survey_then_thanks() {
        let mut orchestrator = initialized();
        orchestrator.submit_identity("Ann", "ann@example.com").unwrap();
        for _ in 0..3 {
            assert!(matches!(orchestrator.current_step(), StepState::Intro { .. }));
            orchestrator.start_experience();
            assert!(matches!(
                orchestrator.current_step(),
                StepState::Experience { .. }
            ));
            orchestrator.experience_completed();
        }
        assert_eq!(orchestrator.current_step(), StepState::Survey);
        orchestrator.survey_completed();
        assert_eq!(orchestrator.current_step(), StepState::Thanks);
    }

    #[test]
    fn test_advance_after_thanks_is_noop() {
        let mut orchestrator = initialized();
        orchestrator.submit_identity("Ann", "ann@example.com").unwrap();
        for _ in 0..6 {
            orchestrator.advance();
        }
        orchestrator.survey_completed();
        assert_eq!(orchestrator.current_step(), StepState::Thanks);
        assert_eq!(orchestrator.advance(), StepState::Thanks);
        assert_eq!(orchestrator.current_step(), StepState::Thanks);
    }

    #[test]
    fn test_advance_from_welcome_is_noop() {
        let mut orchestrator = initialized();
        assert_eq!(orchestrator.advance(), StepState::Welcome);
    }

    #[test]
    fn test_out_of_sequence_events_clamp() {
        let mut orchestrator = initialized();
        orchestrator.experience_completed();
        orchestrator.survey_completed();
        assert_eq!(orchestrator.current_step(), StepState::Welcome);
        orchestrator.submit_identity("Ann", "ann@example.com").unwrap();
        // A second identity submission after leaving Welcome is ignored.
        orchestrator.submit_identity("Bob", "bob@example.com").unwrap();
        assert_eq!(orchestrator.identity().unwrap().name, "Ann");
    }

    #[test]
    fn test_current_experience_follows_order() {
        let mut orchestrator = initialized();
        let order = orchestrator.experience_order().unwrap().clone();
        orchestrator.submit_identity("Ann", "ann@example.com").unwrap();
        for slot_index in 0..3 {
            assert_eq!(
                orchestrator.current_experience(),
                order.get(slot_index),
                "intro slot {slot_index}"
            );
            orchestrator.start_experience();
            assert_eq!(orchestrator.current_experience(), order.get(slot_index));
            orchestrator.experience_completed();
        }
        assert_eq!(orchestrator.current_experience(), None);
    }
}
