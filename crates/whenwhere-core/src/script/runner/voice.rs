//! Scripted voice-playback runner.

use super::RunnerOutcome;
use crate::experience::ExperienceKind;
use crate::script::model::{Speaker, VoiceLine};
use crate::script::preset::VOICE_WRAPUP_DELAY;
use crate::script::scheduler::{LogicalScheduler, PlaybackEvent};

/// Plays the fixed voice transcript back on a timeline.
///
/// All lines are scheduled up front at their scripted offsets; a final
/// wrap-up event after the last line flips the runner to done, at which
/// point the done affordance can consume it. Nothing is captured from
/// the participant; the playback is watch-only.
#[derive(Debug)]
pub struct VoiceRunner {
    script: Vec<VoiceLine>,
    visible: usize,
    playing: bool,
    done: bool,
}

impl VoiceRunner {
    pub fn new(script: Vec<VoiceLine>) -> Self {
        Self {
            script,
            visible: 0,
            playing: false,
            done: false,
        }
    }

    /// Starts (or restarts) playback from the first line.
    ///
    /// Restart is only honored before the playback has finished once;
    /// a completed demo stays done.
    pub fn start(&mut self, scheduler: &mut LogicalScheduler) {
        if self.done {
            return;
        }
        scheduler.clear();
        self.visible = 0;
        self.playing = true;
        let start = scheduler.now();
        for (index, line) in self.script.iter().enumerate() {
            scheduler.schedule_at(start + line.delay, PlaybackEvent::VoiceLine(index));
        }
        if let Some(last) = self.script.last() {
            scheduler.schedule_at(
                start + last.delay + VOICE_WRAPUP_DELAY,
                PlaybackEvent::PlaybackFinished,
            );
        } else {
            self.playing = false;
            self.done = true;
        }
    }

    /// Applies a fired playback event; other event kinds are ignored.
    pub fn handle(&mut self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::VoiceLine(index) => {
                if *index < self.script.len() {
                    self.visible = index + 1;
                }
            }
            PlaybackEvent::PlaybackFinished => {
                self.playing = false;
                self.done = true;
            }
            PlaybackEvent::BotMessage(_) => {}
        }
    }

    /// Transcript lines revealed so far.
    pub fn visible_lines(&self) -> &[VoiceLine] {
        &self.script[..self.visible]
    }

    /// Who is "speaking" right now, for the status line.
    pub fn current_speaker(&self) -> Option<Speaker> {
        if !self.playing {
            return None;
        }
        self.script
            .get(self.visible.checked_sub(1)?)
            .map(|line| line.speaker)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Consumes the runner, signalling completion exactly once.
    pub fn finish(self) -> RunnerOutcome {
        RunnerOutcome {
            kind: ExperienceKind::Voice,
            captured_answers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::preset::voice_script;
    use std::time::Duration;

    #[test]
    fn test_lines_reveal_in_delay_order() {
        let mut runner = VoiceRunner::new(voice_script());
        let mut scheduler = LogicalScheduler::new();
        runner.start(&mut scheduler);
        assert!(runner.is_playing());

        for event in scheduler.advance(Duration::from_millis(0)) {
            runner.handle(&event);
        }
        assert_eq!(runner.visible_lines().len(), 1);
        assert_eq!(runner.current_speaker(), Some(Speaker::Assistant));

        for event in scheduler.advance(Duration::from_millis(3500)) {
            runner.handle(&event);
        }
        assert_eq!(runner.visible_lines().len(), 2);
        assert_eq!(runner.current_speaker(), Some(Speaker::User));
    }

    #[test]
    fn test_done_after_wrapup_pause() {
        let mut runner = VoiceRunner::new(voice_script());
        let mut scheduler = LogicalScheduler::new();
        runner.start(&mut scheduler);

        for event in scheduler.advance(Duration::from_millis(35_000)) {
            runner.handle(&event);
        }
        assert_eq!(runner.visible_lines().len(), 15);
        assert!(runner.is_playing());
        assert!(!runner.is_done());

        for event in scheduler.advance(VOICE_WRAPUP_DELAY) {
            runner.handle(&event);
        }
        assert!(!runner.is_playing());
        assert!(runner.is_done());
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_restart_replays_from_first_line() {
        let mut runner = VoiceRunner::new(voice_script());
        let mut scheduler = LogicalScheduler::new();
        runner.start(&mut scheduler);
        for event in scheduler.advance(Duration::from_millis(10_000)) {
            runner.handle(&event);
        }
        assert!(runner.visible_lines().len() > 2);

        runner.start(&mut scheduler);
        assert_eq!(runner.visible_lines().len(), 0);
        for event in scheduler.advance(Duration::from_millis(0)) {
            runner.handle(&event);
        }
        assert_eq!(runner.visible_lines().len(), 1);
    }

    #[test]
    fn test_restart_after_done_is_ignored() {
        let mut runner = VoiceRunner::new(voice_script());
        let mut scheduler = LogicalScheduler::new();
        runner.start(&mut scheduler);
        for event in scheduler.advance(Duration::from_secs(60)) {
            runner.handle(&event);
        }
        assert!(runner.is_done());

        runner.start(&mut scheduler);
        assert!(runner.is_done());
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_empty_script_is_immediately_done() {
        let mut runner = VoiceRunner::new(Vec::new());
        let mut scheduler = LogicalScheduler::new();
        runner.start(&mut scheduler);
        assert!(runner.is_done());
        assert!(scheduler.is_idle());
    }
}
