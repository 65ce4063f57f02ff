//! Experience runners: one bounded, self-contained interaction each.
//!
//! Dispatch is a tagged variant over the three kinds with a single
//! `match` at the presentation boundary, not a runtime handler map.

mod chat;
mod form;
mod voice;

pub use chat::{ChatMessage, ChatRole, ChatRunner};
pub use form::FormRunner;
pub use voice::VoiceRunner;

use crate::experience::ExperienceKind;
use crate::script::preset;

/// What a finished runner hands back.
///
/// Captured answers are display-only within the runner's own session;
/// they are intentionally not merged into the survey responses (the
/// final survey is the analyzable instrument).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerOutcome {
    pub kind: ExperienceKind,
    pub captured_answers: Vec<String>,
}

/// The active runner for one experience slot, discarded after its
/// single completion signal.
#[derive(Debug)]
pub enum RunnerInstance {
    Form(FormRunner),
    Chat(ChatRunner),
    Voice(VoiceRunner),
}

impl RunnerInstance {
    /// Builds the runner for a kind from the default scripted content.
    pub fn for_kind(kind: ExperienceKind) -> Self {
        match kind {
            ExperienceKind::Form => RunnerInstance::Form(FormRunner::new(preset::form_sections())),
            ExperienceKind::Chatbot => {
                RunnerInstance::Chat(ChatRunner::new(preset::chat_script()))
            }
            ExperienceKind::Voice => {
                RunnerInstance::Voice(VoiceRunner::new(preset::voice_script()))
            }
        }
    }

    pub fn kind(&self) -> ExperienceKind {
        match self {
            RunnerInstance::Form(_) => ExperienceKind::Form,
            RunnerInstance::Chat(_) => ExperienceKind::Chatbot,
            RunnerInstance::Voice(_) => ExperienceKind::Voice,
        }
    }

    /// Consumes the runner, signalling completion exactly once.
    pub fn finish(self) -> RunnerOutcome {
        match self {
            RunnerInstance::Form(runner) => runner.finish(),
            RunnerInstance::Chat(runner) => runner.finish(),
            RunnerInstance::Voice(runner) => runner.finish(),
        }
    }
}
