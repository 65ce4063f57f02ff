//! Domain core of the When & Where research walkthrough.
//!
//! One participant session runs Welcome -> three randomized experiences
//! (each with an intro screen) -> follow-up survey -> Thanks. This crate
//! owns the step state machine, validation, scripted runner state, and
//! submission aggregation; storage and presentation live in the
//! infrastructure and readline crates.

pub mod error;
pub mod experience;
pub mod participant;
pub mod script;
pub mod session;
pub mod submission;
pub mod survey;

// Re-export common error type
pub use error::StudyError;
