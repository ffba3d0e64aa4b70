//! Per-exercise bookkeeping and session counters.
//!
//! The lesson protocols only record what happened in an [`ExerciseTally`].
//! Mapping a finished tally onto the session-wide [`SessionStats`] happens
//! in one place, [`SessionStats::absorb`].

use serde::{Deserialize, Serialize};

use crate::core::{Granularity, Phase, Tag};

/// Whether a mistake was made while proposing a step or giving a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeKind {
    Step,
    Answer,
}

/// How an exercise ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ending", rename_all = "snake_case")]
pub enum Ending {
    /// The learner reached zero remaining without an explanation.
    Solved,
    /// The tutor explained the exercise.
    Explained {
        /// Phase of the attempt that ended the exercise.
        phase: Phase,
        /// Kind of the attempt that ended the exercise.
        kind: MistakeKind,
        /// The learner chose the explanation instead of retrying.
        asked_for_help: bool,
    },
}

/// Record of a single exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseTally {
    pub first_number: u32,
    pub second_number: u32,

    pub above_tens: bool,
    pub on_level_tens: bool,
    pub below_tens: bool,
    pub above_units: bool,
    pub on_level_units: bool,
    pub below_units: bool,

    pub mistakes_in_tens: u32,
    pub mistakes_in_units: u32,
    pub mistakes_in_step: u32,
    pub mistakes_in_answer: u32,

    /// Attempts where no number was recognized.
    pub not_heard: u32,
    /// Rejected attempts, including recognition failures.
    pub strikes: u32,
    /// Times the learner chose to retry.
    pub tried_again: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending: Option<Ending>,
}

impl ExerciseTally {
    /// Start a tally for `first - second`.
    pub fn new(first_number: u32, second_number: u32) -> Self {
        Self {
            first_number,
            second_number,
            ..Default::default()
        }
    }

    /// Record the classification of an accepted step.
    ///
    /// Tags that carry no granularity are ignored.
    pub fn record_step(&mut self, tag: Tag) {
        let (Some(phase), Some(granularity)) = (tag.phase(), tag.granularity()) else {
            return;
        };
        let flag = match (phase, granularity) {
            (Phase::Tens, Granularity::Above) => &mut self.above_tens,
            (Phase::Tens, Granularity::OnLevel) => &mut self.on_level_tens,
            (Phase::Tens, Granularity::Below) => &mut self.below_tens,
            (Phase::Units, Granularity::Above) => &mut self.above_units,
            (Phase::Units, Granularity::OnLevel) => &mut self.on_level_units,
            (Phase::Units, Granularity::Below) => &mut self.below_units,
        };
        *flag = true;
    }

    /// Record a wrong step or answer. Returns the strike count so far.
    pub fn record_mistake(&mut self, phase: Phase, kind: MistakeKind) -> u32 {
        match phase {
            Phase::Tens => self.mistakes_in_tens += 1,
            Phase::Units => self.mistakes_in_units += 1,
        }
        match kind {
            MistakeKind::Step => self.mistakes_in_step += 1,
            MistakeKind::Answer => self.mistakes_in_answer += 1,
        }
        self.strikes += 1;
        self.strikes
    }

    /// Record an attempt where no number was recognized. Returns the strike
    /// count so far.
    pub fn record_not_heard(&mut self) -> u32 {
        self.not_heard += 1;
        self.strikes += 1;
        self.strikes
    }

    pub fn record_retry(&mut self) {
        self.tried_again += 1;
    }

    /// Total mistakes made in the exercise.
    pub fn mistakes(&self) -> u32 {
        self.mistakes_in_step + self.mistakes_in_answer
    }

    /// Whether the exercise ended without an explanation.
    pub fn finished_correctly(&self) -> bool {
        matches!(self.ending, Some(Ending::Solved))
    }
}

/// Session-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub exercises_done: u32,
    pub finished_correctly: u32,
    pub finished_incorrectly: u32,

    pub asked_for_explanation: u32,
    pub tried_again: u32,

    pub mistakes_in_tens: u32,
    pub ended_in_tens: u32,
    pub mistakes_in_units: u32,
    pub ended_in_units: u32,

    pub mistakes_in_step: u32,
    pub ended_in_step: u32,
    pub mistakes_in_answer: u32,
    pub ended_in_answer: u32,

    pub not_heard: u32,

    /// Exercises with at least one step bigger than the level asks, per phase.
    pub bigger_steps_tens: u32,
    pub bigger_steps_units: u32,
    pub on_level_steps_tens: u32,
    pub on_level_steps_units: u32,
    pub smaller_steps_tens: u32,
    pub smaller_steps_units: u32,
}

impl SessionStats {
    /// Fold a finished exercise into the counters.
    pub fn absorb(&mut self, tally: &ExerciseTally) {
        self.exercises_done += 1;

        match tally.ending {
            Some(Ending::Solved) => self.finished_correctly += 1,
            Some(Ending::Explained {
                phase,
                kind,
                asked_for_help,
            }) => {
                self.finished_incorrectly += 1;
                if asked_for_help {
                    self.asked_for_explanation += 1;
                }
                match phase {
                    Phase::Tens => self.ended_in_tens += 1,
                    Phase::Units => self.ended_in_units += 1,
                }
                match kind {
                    MistakeKind::Step => self.ended_in_step += 1,
                    MistakeKind::Answer => self.ended_in_answer += 1,
                }
            }
            None => {
                tracing::warn!(
                    first = tally.first_number,
                    second = tally.second_number,
                    "absorbing an exercise without an ending"
                );
            }
        }

        self.tried_again += tally.tried_again;
        self.mistakes_in_tens += tally.mistakes_in_tens;
        self.mistakes_in_units += tally.mistakes_in_units;
        self.mistakes_in_step += tally.mistakes_in_step;
        self.mistakes_in_answer += tally.mistakes_in_answer;
        self.not_heard += tally.not_heard;

        self.bigger_steps_tens += u32::from(tally.above_tens);
        self.bigger_steps_units += u32::from(tally.above_units);
        self.on_level_steps_tens += u32::from(tally.on_level_tens);
        self.on_level_steps_units += u32::from(tally.on_level_units);
        self.smaller_steps_tens += u32::from(tally.below_tens);
        self.smaller_steps_units += u32::from(tally.below_units);
    }

    /// Share of exercises finished without an explanation.
    pub fn success_rate(&self) -> f64 {
        if self.exercises_done == 0 {
            0.0
        } else {
            self.finished_correctly as f64 / self.exercises_done as f64
        }
    }
}
