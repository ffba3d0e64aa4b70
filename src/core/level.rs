//! Difficulty levels and the classification vocabulary for steps.
//!
//! A [`Level`] fixes the step granularity the learner is expected to use.
//! Every validation returns a [`Tag`], which is either a rejection reason
//! or a level-relative classification of an accepted step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TutorError;

/// Per-session difficulty level.
///
/// | Level | Tens | Units |
/// |---|---|---|
/// | 1 | tutor states each ten | tutor states units, split at the ten |
/// | 2 | one ten at a time | split at the ten |
/// | 3 | all tens at once | split at the ten |
/// | 4 | all tens at once | all units at once |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum Level {
    #[default]
    One,
    Two,
    Three,
    Four,
}

impl Level {
    /// All levels in increasing difficulty.
    pub const ALL: [Level; 4] = [Level::One, Level::Two, Level::Three, Level::Four];

    /// The numeric level, 1-4.
    pub fn number(self) -> u32 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
            Level::Four => 4,
        }
    }

    /// Whether the tutor narrates every subtrahend itself (level 1).
    pub fn is_guided(self) -> bool {
        self == Level::One
    }
}

impl TryFrom<u32> for Level {
    type Error = TutorError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            4 => Ok(Level::Four),
            other => Err(TutorError::invalid_level(other)),
        }
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.number()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Which part of the subtrahend is being removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Tens,
    Units,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Tens => write!(f, "tens"),
            Phase::Units => write!(f, "units"),
        }
    }
}

/// How an accepted step compares to the granularity the level asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// A bigger step than the level expects.
    Above,
    /// Exactly the expected step size.
    OnLevel,
    /// A smaller step than the level expects.
    Below,
}

/// Outcome tag of a step or answer validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    AboveTens,
    OnLevelTens,
    BelowTens,
    AboveUnits,
    OnLevelUnits,
    BelowUnits,
    IncorrectTens,
    IncorrectUnits,
    StepAlreadyTaken,
    AlreadyDone,
    Correct,
}

impl Tag {
    /// Tag of an accepted step in the given phase and granularity.
    pub fn classified(phase: Phase, granularity: Granularity) -> Self {
        match (phase, granularity) {
            (Phase::Tens, Granularity::Above) => Tag::AboveTens,
            (Phase::Tens, Granularity::OnLevel) => Tag::OnLevelTens,
            (Phase::Tens, Granularity::Below) => Tag::BelowTens,
            (Phase::Units, Granularity::Above) => Tag::AboveUnits,
            (Phase::Units, Granularity::OnLevel) => Tag::OnLevelUnits,
            (Phase::Units, Granularity::Below) => Tag::BelowUnits,
        }
    }

    /// Tag of a wrong step or answer attributed to the given phase.
    pub fn incorrect(phase: Phase) -> Self {
        match phase {
            Phase::Tens => Tag::IncorrectTens,
            Phase::Units => Tag::IncorrectUnits,
        }
    }

    /// The phase this tag refers to, if any.
    pub fn phase(self) -> Option<Phase> {
        match self {
            Tag::AboveTens | Tag::OnLevelTens | Tag::BelowTens | Tag::IncorrectTens => {
                Some(Phase::Tens)
            }
            Tag::AboveUnits | Tag::OnLevelUnits | Tag::BelowUnits | Tag::IncorrectUnits => {
                Some(Phase::Units)
            }
            Tag::StepAlreadyTaken | Tag::AlreadyDone | Tag::Correct => None,
        }
    }

    /// The level classification carried by an accepted-step tag.
    pub fn granularity(self) -> Option<Granularity> {
        match self {
            Tag::AboveTens | Tag::AboveUnits => Some(Granularity::Above),
            Tag::OnLevelTens | Tag::OnLevelUnits => Some(Granularity::OnLevel),
            Tag::BelowTens | Tag::BelowUnits => Some(Granularity::Below),
            _ => None,
        }
    }

    /// Whether this tag marks a wrong step or answer.
    pub fn is_incorrect(self) -> bool {
        matches!(self, Tag::IncorrectTens | Tag::IncorrectUnits)
    }

    /// The kebab-case name of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::AboveTens => "above-tens",
            Tag::OnLevelTens => "on-level-tens",
            Tag::BelowTens => "below-tens",
            Tag::AboveUnits => "above-units",
            Tag::OnLevelUnits => "on-level-units",
            Tag::BelowUnits => "below-units",
            Tag::IncorrectTens => "incorrect-tens",
            Tag::IncorrectUnits => "incorrect-units",
            Tag::StepAlreadyTaken => "step-already-taken",
            Tag::AlreadyDone => "already-done",
            Tag::Correct => "correct",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_try_from() {
        assert_eq!(Level::try_from(1).unwrap(), Level::One);
        assert_eq!(Level::try_from(4).unwrap(), Level::Four);
        assert!(Level::try_from(0).is_err());
        assert!(Level::try_from(5).is_err());
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::One < Level::Two);
        assert!(Level::Three < Level::Four);
        assert!(Level::One.is_guided());
        assert!(!Level::Two.is_guided());
    }

    #[test]
    fn test_level_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Level::Three).unwrap(), "3");
        let level: Level = serde_json::from_str("2").unwrap();
        assert_eq!(level, Level::Two);
        assert!(serde_json::from_str::<Level>("9").is_err());
    }

    #[test]
    fn test_tag_classified() {
        assert_eq!(
            Tag::classified(Phase::Tens, Granularity::Above),
            Tag::AboveTens
        );
        assert_eq!(
            Tag::classified(Phase::Units, Granularity::Below),
            Tag::BelowUnits
        );
        assert_eq!(Tag::incorrect(Phase::Units), Tag::IncorrectUnits);
    }

    #[test]
    fn test_tag_phase_and_granularity() {
        assert_eq!(Tag::OnLevelTens.phase(), Some(Phase::Tens));
        assert_eq!(Tag::IncorrectUnits.phase(), Some(Phase::Units));
        assert_eq!(Tag::AlreadyDone.phase(), None);
        assert_eq!(Tag::BelowUnits.granularity(), Some(Granularity::Below));
        assert_eq!(Tag::IncorrectTens.granularity(), None);
        assert!(Tag::IncorrectTens.is_incorrect());
        assert!(!Tag::StepAlreadyTaken.is_incorrect());
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(Tag::OnLevelUnits.to_string(), "on-level-units");
        assert_eq!(Tag::StepAlreadyTaken.to_string(), "step-already-taken");
        assert_eq!(
            serde_json::to_string(&Tag::AlreadyDone).unwrap(),
            "\"already-done\""
        );
    }
}
