//! Learning statistics for Stepwise.
//!
//! This module provides:
//! - Per-exercise tallies and session counters (`tally`)
//! - The end-of-lesson report (`report`)

pub mod report;
pub mod tally;

pub use report::{ReportOptions, SessionReport};
pub use tally::{Ending, ExerciseTally, MistakeKind, SessionStats};
