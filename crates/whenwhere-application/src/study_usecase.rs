//! Use case layer: one facade the presentation talks to.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use whenwhere_core::error::{Result, StudyError};
use whenwhere_core::experience::{ExperienceKind, ExperienceOrder};
use whenwhere_core::participant::{IdentityFieldErrors, ParticipantIdentity};
use whenwhere_core::script::RunnerInstance;
use whenwhere_core::session::{SessionOrchestrator, StepState};
use whenwhere_core::submission::{ResponseAggregator, SubmissionRecord, SubmissionSink};
use whenwhere_core::survey::SurveyResponses;

/// Drives one participant session end to end.
///
/// Owns the session orchestrator, the active runner for the current
/// experience slot, and the response aggregator. The presentation layer
/// calls these methods and renders whatever `current_step` says; it
/// never mutates session state directly.
pub struct StudyUseCase {
    orchestrator: SessionOrchestrator,
    aggregator: ResponseAggregator,
    runner: Option<RunnerInstance>,
}

impl StudyUseCase {
    pub fn new(sink: Arc<dyn SubmissionSink>) -> Self {
        Self {
            orchestrator: SessionOrchestrator::new(),
            aggregator: ResponseAggregator::new(sink),
            runner: None,
        }
    }

    /// Samples the experience order and puts the session at Welcome.
    /// Idempotent for an in-progress session.
    pub fn begin_session<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.orchestrator.initialize(rng);
    }

    pub fn current_step(&self) -> StepState {
        self.orchestrator.current_step()
    }

    pub fn current_experience(&self) -> Option<ExperienceKind> {
        self.orchestrator.current_experience()
    }

    pub fn experience_order(&self) -> Option<&ExperienceOrder> {
        self.orchestrator.experience_order()
    }

    pub fn identity(&self) -> Option<&ParticipantIdentity> {
        self.orchestrator.identity()
    }

    /// Welcome form submission. On success the session sits at the
    /// first intro screen; on failure the field errors come back for
    /// inline display.
    pub fn submit_identity(
        &mut self,
        name: &str,
        email: &str,
    ) -> std::result::Result<(), IdentityFieldErrors> {
        self.orchestrator.submit_identity(name, email)
    }

    /// Confirms the current intro screen and instantiates the runner
    /// for the experience in that slot.
    pub fn start_experience(&mut self) -> StepState {
        let step = self.orchestrator.start_experience();
        if matches!(step, StepState::Experience { .. }) {
            if let Some(kind) = self.orchestrator.current_experience() {
                debug!(%kind, "runner instantiated");
                self.runner = Some(RunnerInstance::for_kind(kind));
            }
        }
        step
    }

    /// The active runner, while an experience step is showing.
    pub fn runner(&mut self) -> Option<&mut RunnerInstance> {
        self.runner.as_mut()
    }

    /// Finishes the active runner and advances past the experience
    /// step. The runner's captured answers are logged for session
    /// debugging only; the survey is the analyzable instrument.
    pub fn complete_experience(&mut self) -> StepState {
        if let Some(runner) = self.runner.take() {
            let outcome = runner.finish();
            info!(
                kind = %outcome.kind,
                captured = outcome.captured_answers.len(),
                "experience finished"
            );
        }
        self.orchestrator.experience_completed()
    }

    /// Commits the survey: builds and persists the submission record,
    /// then moves the session to Thanks. Persistence failure inside the
    /// aggregator is logged and swallowed, so this only errors when the
    /// session is missing its identity or order, which the forward-only
    /// step machine rules out for any session that reached the survey.
    pub async fn submit_survey(&mut self, responses: SurveyResponses) -> Result<SubmissionRecord> {
        if self.orchestrator.current_step() != StepState::Survey {
            return Err(StudyError::invalid_transition(format!(
                "survey submitted at step {:?}",
                self.orchestrator.current_step()
            )));
        }
        let identity = self
            .orchestrator
            .identity()
            .cloned()
            .ok_or_else(|| StudyError::internal("survey reached without identity"))?;
        let order = self
            .orchestrator
            .experience_order()
            .cloned()
            .ok_or_else(|| StudyError::internal("survey reached without experience order"))?;

        let record = self.aggregator.finalize(identity, order, responses).await;
        self.orchestrator.survey_completed();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Mutex;

    struct MemorySink {
        records: Mutex<Vec<SubmissionRecord>>,
    }

    impl MemorySink {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SubmissionSink for MemorySink {
        async fn append(&self, record: &SubmissionRecord) -> Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn blank_responses() -> SurveyResponses {
        SurveyResponses {
            interface_ranking: vec![],
            interface_why: String::new(),
            pain_level: 0,
            time_match_value: None,
            what_matters_more: None,
            form_completion_likelihood: None,
            group_size: None,
            additional_thoughts: String::new(),
        }
    }

    #[tokio::test]
    async fn test_full_session_reaches_thanks_and_persists_once() {
        let sink = Arc::new(MemorySink::new());
        let mut usecase = StudyUseCase::new(sink.clone());
        usecase.begin_session(&mut StdRng::seed_from_u64(8));

        usecase.submit_identity("Ann", "ann@example.com").unwrap();
        let order = usecase.experience_order().unwrap().clone();

        for slot_index in 0..3 {
            let expected = order.get(slot_index).unwrap();
            assert_eq!(usecase.current_experience(), Some(expected));
            usecase.start_experience();
            assert_eq!(usecase.runner().unwrap().kind(), expected);
            usecase.complete_experience();
        }

        assert_eq!(usecase.current_step(), StepState::Survey);
        let record = usecase.submit_survey(blank_responses()).await.unwrap();
        assert_eq!(usecase.current_step(), StepState::Thanks);
        assert_eq!(record.identity.name, "Ann");
        assert_eq!(record.experience_order, order);

        let stored = sink.records.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, record.id);
    }

    #[tokio::test]
    async fn test_submit_survey_outside_survey_step_is_rejected() {
        let mut usecase = StudyUseCase::new(Arc::new(MemorySink::new()));
        usecase.begin_session(&mut StdRng::seed_from_u64(8));

        let err = usecase.submit_survey(blank_responses()).await.unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(usecase.current_step(), StepState::Welcome);
    }

    #[tokio::test]
    async fn test_runner_is_discarded_after_completion() {
        let mut usecase = StudyUseCase::new(Arc::new(MemorySink::new()));
        usecase.begin_session(&mut StdRng::seed_from_u64(8));
        usecase.submit_identity("Ann", "ann@example.com").unwrap();

        usecase.start_experience();
        assert!(usecase.runner().is_some());
        usecase.complete_experience();
        assert!(usecase.runner().is_none());
    }

    #[tokio::test]
    async fn test_identity_errors_keep_session_at_welcome() {
        let mut usecase = StudyUseCase::new(Arc::new(MemorySink::new()));
        usecase.begin_session(&mut StdRng::seed_from_u64(8));

        let errors = usecase.submit_identity(" ", "nope").unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
        assert_eq!(usecase.current_step(), StepState::Welcome);
    }
}
