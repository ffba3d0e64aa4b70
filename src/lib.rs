//! Stepwise - an interactive two-digit subtraction tutor.
//!
//! Stepwise walks a learner through subtraction problems under one hundred,
//! tens first and units second, validating every step against the
//! learner's level and falling back to a worked explanation after two
//! mistakes.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod interaction;
pub mod lesson;
pub mod stats;

pub use config::Config;
pub use core::{
    explain, Exercise, ExerciseGenerator, ExplanationTrace, GenerationMode, Granularity, Level,
    Phase, Statement, Tag, Verdict,
};
pub use error::{Result, TutorError};
pub use interaction::{
    Choice, Interaction, Recognition, ScriptedInteraction, ScriptedResponse, TerminalInteraction,
};
pub use lesson::{Language, LessonSession, Phrasebook};
pub use stats::{Ending, ExerciseTally, MistakeKind, ReportOptions, SessionReport, SessionStats};

// CLI commands
pub use cli::{ExplainCommand, GenerateCommand, InitCommand, LessonCommand};
