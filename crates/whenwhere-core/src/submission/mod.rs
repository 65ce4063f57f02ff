//! Submission domain module.
//!
//! - `record`: the write-once submission record
//! - `sink`: persistence boundary trait
//! - `clock`: injectable time source
//! - `aggregator`: builds and commits the record

mod aggregator;
mod clock;
mod record;
mod sink;

pub use aggregator::ResponseAggregator;
pub use clock::{Clock, SystemClock};
pub use record::SubmissionRecord;
pub use sink::SubmissionSink;
