//! Scripted chatbot runner.

use super::RunnerOutcome;
use crate::experience::ExperienceKind;
use crate::script::model::ChatPrompt;
use crate::script::preset::{CHAT_GREETING_DELAY, CHAT_TYPING_DELAY_MS};
use crate::script::scheduler::{LogicalScheduler, PlaybackEvent};
use rand::Rng;
use std::time::Duration;

/// One transcript entry in the chat experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    Bot,
    User,
}

/// Drives the fixed chat script to completion.
///
/// The bot "types" for a scheduled delay before each turn; participant
/// replies are accepted only while the bot is not typing. After the
/// final scripted turn is answered the runner is complete and the done
/// affordance can consume it. Captured replies are display-only; they
/// are never merged into the survey.
#[derive(Debug)]
pub struct ChatRunner {
    script: Vec<ChatPrompt>,
    transcript: Vec<ChatMessage>,
    current: usize,
    typing: bool,
    complete: bool,
}

impl ChatRunner {
    pub fn new(script: Vec<ChatPrompt>) -> Self {
        Self {
            script,
            transcript: Vec::new(),
            current: 0,
            typing: false,
            complete: false,
        }
    }

    /// Schedules the greeting turn.
    pub fn start(&mut self, scheduler: &mut LogicalScheduler) {
        self.typing = true;
        scheduler.schedule_in(CHAT_GREETING_DELAY, PlaybackEvent::BotMessage(0));
    }

    /// Applies a fired playback event; other event kinds are ignored.
    pub fn handle(&mut self, event: &PlaybackEvent) {
        if let PlaybackEvent::BotMessage(index) = event {
            if let Some(turn) = self.script.get(*index) {
                self.transcript.push(ChatMessage {
                    role: ChatRole::Bot,
                    text: turn.message.clone(),
                });
                self.typing = false;
            }
        }
    }

    /// Records a participant reply and schedules the next bot turn.
    ///
    /// Ignored while the bot is typing or after completion. Answering
    /// the final turn completes the runner without scheduling anything.
    pub fn reply<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        rng: &mut R,
        scheduler: &mut LogicalScheduler,
    ) {
        if self.typing || self.complete || text.trim().is_empty() {
            return;
        }
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            text: text.trim().to_string(),
        });

        let next = self.current + 1;
        if next >= self.script.len() {
            self.complete = true;
            return;
        }
        self.current = next;
        self.typing = true;
        let delay = Duration::from_millis(rng.gen_range(CHAT_TYPING_DELAY_MS));
        scheduler.schedule_in(delay, PlaybackEvent::BotMessage(next));
    }

    /// The current turn's quick replies, shown only while awaiting a
    /// participant reply.
    pub fn quick_replies(&self) -> Option<&[String]> {
        if self.typing || self.complete {
            return None;
        }
        self.script
            .get(self.current)
            .map(|turn| turn.quick_replies.as_slice())
    }

    /// Whether the current turn also offers free-text input.
    pub fn free_input(&self) -> Option<&str> {
        if self.typing || self.complete {
            return None;
        }
        let turn = self.script.get(self.current)?;
        turn.free_input
            .then(|| turn.input_placeholder.as_deref().unwrap_or("Type a message..."))
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Consumes the runner, signalling completion exactly once.
    pub fn finish(self) -> RunnerOutcome {
        RunnerOutcome {
            kind: ExperienceKind::Chatbot,
            captured_answers: self
                .transcript
                .into_iter()
                .filter(|m| m.role == ChatRole::User)
                .map(|m| m.text)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::preset::chat_script;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn drain(runner: &mut ChatRunner, scheduler: &mut LogicalScheduler) {
        for event in scheduler.advance(Duration::from_secs(10)) {
            runner.handle(&event);
        }
    }

    #[test]
    fn test_greeting_appears_after_delay() {
        let mut runner = ChatRunner::new(chat_script());
        let mut scheduler = LogicalScheduler::new();
        runner.start(&mut scheduler);
        assert!(runner.is_typing());
        assert!(runner.quick_replies().is_none());

        for event in scheduler.advance(CHAT_GREETING_DELAY) {
            runner.handle(&event);
        }
        assert!(!runner.is_typing());
        assert_eq!(runner.transcript().len(), 1);
        assert_eq!(runner.quick_replies().unwrap()[0], "Birthday dinner");
    }

    #[test]
    fn test_reply_while_typing_is_ignored() {
        let mut runner = ChatRunner::new(chat_script());
        let mut scheduler = LogicalScheduler::new();
        let mut rng = StdRng::seed_from_u64(1);
        runner.start(&mut scheduler);
        runner.reply("too eager", &mut rng, &mut scheduler);
        assert!(runner.transcript().is_empty());
    }

    #[test]
    fn test_full_conversation_completes_after_last_reply() {
        let mut runner = ChatRunner::new(chat_script());
        let mut scheduler = LogicalScheduler::new();
        let mut rng = StdRng::seed_from_u64(2);
        runner.start(&mut scheduler);
        drain(&mut runner, &mut scheduler);

        for turn in 0..10 {
            assert!(!runner.is_complete(), "not complete before turn {turn}");
            runner.reply(&format!("answer {turn}"), &mut rng, &mut scheduler);
            drain(&mut runner, &mut scheduler);
        }
        assert!(runner.is_complete());
        assert!(scheduler.is_idle());
        // 10 bot turns + 10 user replies.
        assert_eq!(runner.transcript().len(), 20);

        // Further replies are ignored once complete.
        runner.reply("extra", &mut rng, &mut scheduler);
        assert_eq!(runner.transcript().len(), 20);

        let outcome = runner.finish();
        assert_eq!(outcome.kind, ExperienceKind::Chatbot);
        assert_eq!(outcome.captured_answers.len(), 10);
    }

    #[test]
    fn test_free_input_only_where_scripted() {
        let mut runner = ChatRunner::new(chat_script());
        let mut scheduler = LogicalScheduler::new();
        let mut rng = StdRng::seed_from_u64(3);
        runner.start(&mut scheduler);
        drain(&mut runner, &mut scheduler);
        // Turn 0 offers free input.
        assert_eq!(runner.free_input(), Some("Or type your own..."));

        runner.reply("Birthday dinner", &mut rng, &mut scheduler);
        drain(&mut runner, &mut scheduler);
        // Turn 1 (meal kind) is quick-reply only.
        assert_eq!(runner.free_input(), None);
        assert!(runner.quick_replies().is_some());
    }
}
