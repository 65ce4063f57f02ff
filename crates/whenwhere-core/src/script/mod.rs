//! Scripted experience content, playback scheduling, and runners.
//!
//! - `model`: content data types and slot derivation
//! - `preset`: the default scripts and copy
//! - `scheduler`: logical-clock playback scheduler
//! - `runner`: the three experience runner state machines

pub mod model;
pub mod preset;
pub mod runner;
pub mod scheduler;

pub use model::{ChatPrompt, FieldKind, FormField, FormSection, IntroCopy, MealType, Speaker, VoiceLine};
pub use runner::{ChatMessage, ChatRole, ChatRunner, FormRunner, RunnerInstance, RunnerOutcome, VoiceRunner};
pub use scheduler::{LogicalScheduler, PlaybackEvent};
