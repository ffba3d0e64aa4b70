//! Core tutoring logic for Stepwise.
//!
//! This module contains the exercise state machine, the level-aware step
//! classifier, exercise generation, and worked-solution generation. Nothing
//! in here performs I/O.

pub mod exercise;
pub mod explain;
pub mod generator;
pub mod level;

pub use exercise::{Exercise, StepCheck, StepMove, Verdict, MAX_OPERAND, MIN_OPERAND};
pub use explain::{explain, ExplanationTrace, Statement};
pub use generator::{ExerciseGenerator, GenerationMode};
pub use level::{Granularity, Level, Phase, Tag};
