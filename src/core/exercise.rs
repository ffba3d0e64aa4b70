//! Exercise state and step/answer validation.
//!
//! An [`Exercise`] holds one two-digit subtraction `first - second` and the
//! running remainders while the learner works through it. The learner
//! alternates between proposing a step ([`Exercise::take_step`]) and
//! confirming the running total ([`Exercise::acceptable_answer`]).
//!
//! Validation is split in two pure parts:
//! - [`Exercise::check_step`] decides whether a step is arithmetically valid
//!   at this point and which kind of move it is ([`StepMove`]).
//! - [`StepMove::granularity`] classifies that move against a [`Level`].
//!
//! [`Exercise::acceptable_step`] composes both into a [`Verdict`].

use serde::{Deserialize, Serialize};

use crate::core::level::{Granularity, Level, Phase, Tag};
use crate::error::{Result, TutorError};

/// Smallest accepted operand.
pub const MIN_OPERAND: u32 = 10;

/// Largest accepted operand.
pub const MAX_OPERAND: u32 = 99;

/// Result of a step or answer validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the step or answer was accepted.
    pub accepted: bool,
    /// Classification or rejection reason.
    pub tag: Tag,
}

impl Verdict {
    /// An accepted verdict.
    pub fn accept(tag: Tag) -> Self {
        Self {
            accepted: true,
            tag,
        }
    }

    /// A rejected verdict.
    pub fn reject(tag: Tag) -> Self {
        Self {
            accepted: false,
            tag,
        }
    }
}

/// A valid kind of step at the current point of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMove {
    /// All tens of the subtrahend at once (first step only).
    AllTens,
    /// A single ten.
    SingleTen,
    /// The units of the running total, landing on a round ten.
    BridgeToTen,
    /// All remaining units at once.
    RemainingUnits {
        /// A bridge to the ten was possible and was skipped.
        skipped_bridge: bool,
    },
}

impl StepMove {
    /// Phase the move belongs to.
    pub fn phase(self) -> Phase {
        match self {
            StepMove::AllTens | StepMove::SingleTen => Phase::Tens,
            StepMove::BridgeToTen | StepMove::RemainingUnits { .. } => Phase::Units,
        }
    }

    /// Classify the move against the granularity a level expects.
    pub fn granularity(self, level: Level) -> Granularity {
        match self {
            StepMove::AllTens if level < Level::Three => Granularity::Above,
            StepMove::AllTens => Granularity::OnLevel,
            StepMove::SingleTen if level > Level::Two => Granularity::Below,
            StepMove::SingleTen => Granularity::OnLevel,
            StepMove::BridgeToTen if level == Level::Four => Granularity::Below,
            StepMove::BridgeToTen => Granularity::OnLevel,
            StepMove::RemainingUnits {
                skipped_bridge: true,
            } if level < Level::Four => Granularity::Above,
            StepMove::RemainingUnits { .. } => Granularity::OnLevel,
        }
    }
}

/// Arithmetic correctness of a proposed step, before level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCheck {
    /// Nothing is left to subtract.
    AlreadyDone,
    /// The step is valid here.
    Valid(StepMove),
    /// The step has the wrong size for the phase in progress.
    Invalid(Phase),
}

/// One subtraction problem and its running state.
///
/// Invariants:
/// - `current_second <= second_number`
/// - `current_first - current_second == first_number - second_number`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExercise")]
pub struct Exercise {
    first_number: u32,
    second_number: u32,
    current_first: u32,
    current_second: u32,
    /// A step was taken and its running total is not confirmed yet.
    step_accepted: bool,
    /// The last validated step was in the units phase.
    doing_units: bool,
}

/// Serialized form of an [`Exercise`], checked before it becomes one.
#[derive(Deserialize)]
struct RawExercise {
    first_number: u32,
    second_number: u32,
    current_first: u32,
    current_second: u32,
    step_accepted: bool,
    doing_units: bool,
}

impl TryFrom<RawExercise> for Exercise {
    type Error = TutorError;

    fn try_from(raw: RawExercise) -> Result<Self> {
        let fresh = Exercise::new(raw.first_number, raw.second_number)?;
        if raw.current_second > raw.second_number
            || raw.current_first + raw.second_number != raw.first_number + raw.current_second
        {
            return Err(TutorError::invalid_exercise(format!(
                "running state {} - {} does not belong to {} - {}",
                raw.current_first, raw.current_second, raw.first_number, raw.second_number
            )));
        }

        Ok(Self {
            current_first: raw.current_first,
            current_second: raw.current_second,
            step_accepted: raw.step_accepted,
            doing_units: raw.doing_units,
            ..fresh
        })
    }
}

impl Exercise {
    /// Create an exercise `first - second`.
    ///
    /// Both operands must be two-digit numbers and `first >= second`.
    pub fn new(first_number: u32, second_number: u32) -> Result<Self> {
        for n in [first_number, second_number] {
            if !(MIN_OPERAND..=MAX_OPERAND).contains(&n) {
                return Err(TutorError::invalid_exercise(format!(
                    "{} is not a two-digit number",
                    n
                )));
            }
        }
        if first_number < second_number {
            return Err(TutorError::invalid_exercise(format!(
                "{} is smaller than {}",
                first_number, second_number
            )));
        }

        Ok(Self::fresh(first_number, second_number))
    }

    /// Build an exercise from operands already known to be in the domain.
    pub(crate) fn fresh(first_number: u32, second_number: u32) -> Self {
        Self {
            first_number,
            second_number,
            current_first: first_number,
            current_second: second_number,
            step_accepted: false,
            doing_units: false,
        }
    }

    pub fn first_number(&self) -> u32 {
        self.first_number
    }

    pub fn second_number(&self) -> u32 {
        self.second_number
    }

    /// The running total.
    pub fn current_first(&self) -> u32 {
        self.current_first
    }

    /// What is still left to subtract.
    pub fn current_second(&self) -> u32 {
        self.current_second
    }

    /// Whether a step is waiting for its running total to be confirmed.
    pub fn step_pending(&self) -> bool {
        self.step_accepted
    }

    /// Whether the last validated step was in the units phase.
    pub fn doing_units(&self) -> bool {
        self.doing_units
    }

    /// The final answer.
    pub fn difference(&self) -> u32 {
        self.first_number - self.second_number
    }

    /// Whether subtracting the units crosses a ten (a borrow is required).
    pub fn needs_borrow(&self) -> bool {
        self.first_number % 10 < self.second_number % 10
    }

    /// Whether the whole subtrahend has been taken off.
    pub fn is_done(&self) -> bool {
        self.current_second == 0
    }

    /// Phase of the next step.
    pub fn current_phase(&self) -> Phase {
        if self.current_second >= 10 {
            Phase::Tens
        } else {
            Phase::Units
        }
    }

    fn is_first_step(&self) -> bool {
        self.current_second == self.second_number
    }

    /// Check whether a step is arithmetically valid at this point.
    pub fn check_step(&self, step_taken: u32) -> StepCheck {
        if self.current_second == 0 {
            return StepCheck::AlreadyDone;
        }

        let current_tens = self.current_second / 10;
        if current_tens != 0 {
            if self.is_first_step() && step_taken == current_tens * 10 {
                StepCheck::Valid(StepMove::AllTens)
            } else if step_taken == 10 {
                StepCheck::Valid(StepMove::SingleTen)
            } else {
                StepCheck::Invalid(Phase::Tens)
            }
        } else {
            let units_first = self.current_first % 10;
            let bridge_possible = units_first != 0 && self.current_second > units_first;
            if bridge_possible && step_taken == units_first {
                StepCheck::Valid(StepMove::BridgeToTen)
            } else if step_taken == self.current_second {
                StepCheck::Valid(StepMove::RemainingUnits {
                    skipped_bridge: bridge_possible,
                })
            } else {
                StepCheck::Invalid(Phase::Units)
            }
        }
    }

    /// Classify a proposed step without changing the exercise.
    pub fn acceptable_step(&self, step_taken: u32, level: Level) -> Verdict {
        match self.check_step(step_taken) {
            StepCheck::AlreadyDone => Verdict::reject(Tag::AlreadyDone),
            StepCheck::Valid(step_move) => Verdict::accept(Tag::classified(
                step_move.phase(),
                step_move.granularity(level),
            )),
            StepCheck::Invalid(phase) => Verdict::reject(Tag::incorrect(phase)),
        }
    }

    /// Take a step: subtract `step_taken` from both running numbers.
    ///
    /// Refused with [`Tag::StepAlreadyTaken`] while the previous step's
    /// running total is unconfirmed; the exercise is left untouched then.
    pub fn take_step(&mut self, step_taken: u32, level: Level) -> Verdict {
        if self.step_accepted {
            tracing::debug!(
                step = step_taken,
                "step already taken, confirm the running total first"
            );
            return Verdict::reject(Tag::StepAlreadyTaken);
        }

        let verdict = self.acceptable_step(step_taken, level);
        // Attribution for a later wrong answer; `already-done` counts as units.
        self.doing_units = verdict.tag.phase() != Some(Phase::Tens);

        if verdict.accepted {
            self.step_accepted = true;
            self.current_first -= step_taken;
            self.current_second -= step_taken;
        } else {
            tracing::debug!(step = step_taken, tag = %verdict.tag, "step rejected");
        }

        verdict
    }

    /// Check the learner's running total after a step.
    pub fn acceptable_answer(&mut self, answer_given: u32) -> Verdict {
        if self.step_accepted && answer_given == self.current_first {
            self.step_accepted = false;
            return Verdict::accept(Tag::Correct);
        }

        let phase = if self.doing_units {
            Phase::Units
        } else {
            Phase::Tens
        };
        tracing::debug!(answer = answer_given, expected = self.current_first, "wrong answer");
        Verdict::reject(Tag::incorrect(phase))
    }

    /// The subtrahend the tutor states itself in the guided protocol.
    ///
    /// One ten at a time, then the units of the running total to reach a
    /// round ten when a borrow is pending, then the remaining units.
    pub fn guided_step(&self) -> Option<u32> {
        if self.current_second == 0 {
            return None;
        }
        if self.current_second >= 10 {
            return Some(10);
        }
        let units_first = self.current_first % 10;
        if units_first != 0 && self.current_second > units_first {
            Some(units_first)
        } else {
            Some(self.current_second)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(first: u32, second: u32) -> Exercise {
        Exercise::new(first, second).unwrap()
    }

    #[test]
    fn test_new_initializes_remainders() {
        let ex = exercise(57, 23);
        assert_eq!(ex.current_first(), 57);
        assert_eq!(ex.current_second(), 23);
        assert!(!ex.step_pending());
        assert_eq!(ex.difference(), 34);
        assert!(!ex.needs_borrow());
    }

    #[test]
    fn test_deserialize_restores_running_state() {
        let mut ex = exercise(61, 34);
        ex.take_step(30, Level::Four);
        let json = serde_json::to_string(&ex).unwrap();

        let restored: Exercise = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ex);
        assert!(restored.step_pending());
    }

    #[test]
    fn test_deserialize_rejects_out_of_domain() {
        let reversed = r#"{"first_number":20,"second_number":50,"current_first":20,
            "current_second":50,"step_accepted":false,"doing_units":false}"#;
        assert!(serde_json::from_str::<Exercise>(reversed).is_err());

        let three_digits = r#"{"first_number":120,"second_number":50,"current_first":120,
            "current_second":50,"step_accepted":false,"doing_units":false}"#;
        assert!(serde_json::from_str::<Exercise>(three_digits).is_err());

        let drifted = r#"{"first_number":61,"second_number":34,"current_first":20,
            "current_second":4,"step_accepted":false,"doing_units":false}"#;
        let err = serde_json::from_str::<Exercise>(drifted).unwrap_err();
        assert!(err.to_string().contains("does not belong to 61 - 34"));

        let grown = r#"{"first_number":61,"second_number":34,"current_first":71,
            "current_second":44,"step_accepted":false,"doing_units":false}"#;
        assert!(serde_json::from_str::<Exercise>(grown).is_err());
    }

    #[test]
    fn test_new_rejects_out_of_domain() {
        assert!(Exercise::new(23, 57).is_err());
        assert!(Exercise::new(100, 23).is_err());
        assert!(Exercise::new(57, 9).is_err());
        assert!(Exercise::new(57, 57).is_ok());
    }

    #[test]
    fn test_level_one_scenario_without_borrow() {
        let mut ex = exercise(57, 23);

        let verdict = ex.take_step(20, Level::One);
        // All tens at once on the first step is bigger than level 1 asks for.
        assert_eq!(verdict, Verdict::accept(Tag::AboveTens));

        let mut ex = exercise(57, 23);
        assert_eq!(ex.take_step(10, Level::One), Verdict::accept(Tag::OnLevelTens));
        assert!(ex.acceptable_answer(47).accepted);
        assert_eq!(ex.take_step(10, Level::One), Verdict::accept(Tag::OnLevelTens));
        assert!(ex.acceptable_answer(37).accepted);
        assert_eq!(ex.current_first(), 37);

        assert_eq!(ex.take_step(3, Level::One), Verdict::accept(Tag::OnLevelUnits));
        assert!(ex.acceptable_answer(34).accepted);
        assert!(ex.is_done());
    }

    #[test]
    fn test_level_three_all_tens_then_units() {
        let mut ex = exercise(57, 23);
        assert_eq!(ex.take_step(20, Level::Three), Verdict::accept(Tag::OnLevelTens));
        assert_eq!(ex.current_first(), 37);
        assert!(ex.acceptable_answer(37).accepted);
        assert_eq!(ex.take_step(3, Level::Three), Verdict::accept(Tag::OnLevelUnits));
        assert!(ex.acceptable_answer(34).accepted);
        assert!(ex.is_done());
    }

    #[test]
    fn test_level_four_borrow_scenario() {
        let mut ex = exercise(61, 34);
        assert!(ex.needs_borrow());

        assert_eq!(ex.take_step(30, Level::Four), Verdict::accept(Tag::OnLevelTens));
        assert!(ex.acceptable_answer(31).accepted);

        assert_eq!(ex.take_step(4, Level::Four), Verdict::accept(Tag::OnLevelUnits));
        assert!(ex.acceptable_answer(27).accepted);
        assert!(ex.is_done());
    }

    #[test]
    fn test_borrow_split_classification() {
        let mut ex = exercise(61, 34);
        ex.take_step(30, Level::Two);
        ex.acceptable_answer(31);

        // Reaching the ten first is the level-2 way.
        assert_eq!(ex.acceptable_step(1, Level::Two), Verdict::accept(Tag::OnLevelUnits));
        // Level 4 expects all units at once, so the split is smaller.
        assert_eq!(ex.acceptable_step(1, Level::Four), Verdict::accept(Tag::BelowUnits));
        // Skipping the bridge is bigger than levels 1-3 expect.
        assert_eq!(ex.acceptable_step(4, Level::Two), Verdict::accept(Tag::AboveUnits));

        assert!(ex.take_step(1, Level::Two).accepted);
        assert!(ex.acceptable_answer(30).accepted);
        // From a round ten the rest is always on level.
        assert_eq!(ex.take_step(3, Level::Two), Verdict::accept(Tag::OnLevelUnits));
        assert!(ex.acceptable_answer(27).accepted);
    }

    #[test]
    fn test_single_ten_below_level_three() {
        let ex = exercise(61, 34);
        assert_eq!(ex.acceptable_step(10, Level::Three), Verdict::accept(Tag::BelowTens));
        assert_eq!(ex.acceptable_step(10, Level::Two), Verdict::accept(Tag::OnLevelTens));
        assert_eq!(ex.acceptable_step(30, Level::Two), Verdict::accept(Tag::AboveTens));
    }

    #[test]
    fn test_all_tens_only_on_first_step() {
        let mut ex = exercise(84, 32);
        ex.take_step(10, Level::Three);
        ex.acceptable_answer(74);
        // 20 tens remain, but taking them at once is only allowed as the first step.
        assert_eq!(ex.acceptable_step(20, Level::Three), Verdict::reject(Tag::IncorrectTens));
        assert_eq!(ex.acceptable_step(10, Level::Three), Verdict::accept(Tag::BelowTens));
    }

    #[test]
    fn test_incorrect_steps() {
        let mut ex = exercise(57, 23);
        assert_eq!(ex.take_step(7, Level::Two), Verdict::reject(Tag::IncorrectTens));
        assert!(!ex.doing_units());
        assert_eq!(ex.current_first(), 57);

        ex.take_step(20, Level::Two);
        ex.acceptable_answer(37);
        assert_eq!(ex.take_step(5, Level::Two), Verdict::reject(Tag::IncorrectUnits));
        assert!(ex.doing_units());
        assert_eq!(ex.current_first(), 37);
    }

    #[test]
    fn test_already_done() {
        let mut ex = exercise(57, 23);
        ex.take_step(20, Level::Three);
        ex.acceptable_answer(37);
        ex.take_step(3, Level::Three);
        ex.acceptable_answer(34);

        assert_eq!(ex.acceptable_step(0, Level::Three), Verdict::reject(Tag::AlreadyDone));
        assert_eq!(ex.take_step(3, Level::Three), Verdict::reject(Tag::AlreadyDone));
        assert_eq!(ex.current_first(), 34);
    }

    #[test]
    fn test_step_already_taken_leaves_state_unchanged() {
        let mut ex = exercise(57, 23);
        assert!(ex.take_step(20, Level::Three).accepted);
        let before = ex.clone();

        assert_eq!(
            ex.take_step(3, Level::Three),
            Verdict::reject(Tag::StepAlreadyTaken)
        );
        assert_eq!(ex, before);
    }

    #[test]
    fn test_answer_requires_pending_step() {
        let mut ex = exercise(57, 23);
        // 57 is the running total, but no step was taken.
        assert_eq!(ex.acceptable_answer(57), Verdict::reject(Tag::IncorrectTens));
    }

    #[test]
    fn test_wrong_answer_attribution() {
        let mut ex = exercise(57, 23);
        ex.take_step(20, Level::Three);
        assert_eq!(ex.acceptable_answer(36), Verdict::reject(Tag::IncorrectTens));
        // A wrong answer keeps the step pending so it can be retried.
        assert!(ex.step_pending());
        assert!(ex.acceptable_answer(37).accepted);

        ex.take_step(3, Level::Three);
        assert_eq!(ex.acceptable_answer(33), Verdict::reject(Tag::IncorrectUnits));
    }

    #[test]
    fn test_guided_steps_with_borrow() {
        let mut ex = exercise(61, 34);
        let mut steps = Vec::new();
        while let Some(step) = ex.guided_step() {
            steps.push(step);
            assert!(ex.take_step(step, Level::One).accepted);
            let total = ex.current_first();
            assert!(ex.acceptable_answer(total).accepted);
        }
        assert_eq!(steps, vec![10, 10, 10, 1, 3]);
        assert_eq!(ex.current_first(), 27);
    }

    #[test]
    fn test_guided_steps_without_borrow() {
        let mut ex = exercise(57, 23);
        let mut steps = Vec::new();
        while let Some(step) = ex.guided_step() {
            steps.push(step);
            ex.take_step(step, Level::One);
            let total = ex.current_first();
            ex.acceptable_answer(total);
        }
        assert_eq!(steps, vec![10, 10, 3]);
    }

    #[test]
    fn test_current_phase() {
        let mut ex = exercise(57, 23);
        assert_eq!(ex.current_phase(), Phase::Tens);
        ex.take_step(20, Level::Three);
        assert_eq!(ex.current_phase(), Phase::Units);
    }

    // =========================================================================
    // Property-based tests
    // =========================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_level() -> impl Strategy<Value = Level> {
            prop_oneof![
                Just(Level::One),
                Just(Level::Two),
                Just(Level::Three),
                Just(Level::Four),
            ]
        }

        fn arb_exercise() -> impl Strategy<Value = Exercise> {
            (10u32..=99, 10u32..=99).prop_map(|(a, b)| Exercise::new(a.max(b), a.min(b)).unwrap())
        }

        proptest! {
            // Property: the difference is conserved across any sequence of steps
            #[test]
            fn prop_difference_conserved(
                mut ex in arb_exercise(),
                level in arb_level(),
                steps in prop::collection::vec(0u32..40, 0..20),
            ) {
                let difference = ex.difference();
                for step in steps {
                    if ex.take_step(step, level).accepted {
                        let total = ex.current_first();
                        prop_assert!(ex.acceptable_answer(total).accepted);
                    }
                    prop_assert_eq!(ex.current_first() - ex.current_second(), difference);
                    prop_assert!(ex.current_second() <= ex.second_number());
                }
            }

            // Property: classifying a step never mutates the exercise
            #[test]
            fn prop_acceptable_step_is_pure(
                ex in arb_exercise(),
                level in arb_level(),
                step in 0u32..100,
            ) {
                let before = ex.clone();
                let _ = ex.acceptable_step(step, level);
                prop_assert_eq!(ex, before);
            }

            // Property: a second step before confirming the first changes nothing
            #[test]
            fn prop_second_step_refused(
                mut ex in arb_exercise(),
                level in arb_level(),
                step in 0u32..100,
            ) {
                if ex.take_step(10, level).accepted {
                    let before = ex.clone();
                    let verdict = ex.take_step(step, level);
                    prop_assert_eq!(verdict, Verdict::reject(Tag::StepAlreadyTaken));
                    prop_assert_eq!(ex, before);
                }
            }

            // Property: the guided path always reaches the difference
            #[test]
            fn prop_guided_path_completes(mut ex in arb_exercise()) {
                while let Some(step) = ex.guided_step() {
                    prop_assert!(ex.take_step(step, Level::One).accepted);
                    let total = ex.current_first();
                    prop_assert!(ex.acceptable_answer(total).accepted);
                }
                prop_assert!(ex.is_done());
                prop_assert_eq!(ex.current_first(), ex.difference());
            }
        }
    }
}
