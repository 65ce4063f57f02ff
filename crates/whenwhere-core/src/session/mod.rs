//! Session domain module.
//!
//! - `step`: the linear step state machine (`StepState`, `Slot`)
//! - `event`: presentation-boundary events (`SessionEvent`)
//! - `orchestrator`: session-level state owner (`SessionOrchestrator`)

mod event;
mod orchestrator;
mod step;

pub use event::SessionEvent;
pub use orchestrator::SessionOrchestrator;
pub use step::{Slot, StepState};
