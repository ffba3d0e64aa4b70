//! Worked solutions.
//!
//! [`explain`] replays the canonical solution path of an exercise for a
//! level, independent of what the learner did. The trace is a list of
//! language-neutral [`Statement`]s; the lesson's phrasebook renders them.

use serde::{Deserialize, Serialize};

use crate::core::level::Level;

/// One narrated line of a worked solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// Names the problem.
    Intro { first: u32, second: u32 },
    /// Announces the first single ten.
    FirstTen,
    /// Announces another single ten.
    AnotherTen,
    /// Announces all tens in one go.
    AllTens { tens: u32 },
    /// Tens are done, units follow (split-capable levels).
    TensDone { units: u32 },
    /// Tens are done, all units follow in one go.
    AllUnits { units: u32 },
    /// Announces the jump from `from` down to the round ten.
    JumpToTen { from: u32, amount: u32 },
    /// After the jump, `remaining` of the `units` are still to go.
    RestOfUnits {
        units: u32,
        taken: u32,
        remaining: u32,
    },
    /// `from - amount = result`.
    Subtract { from: u32, amount: u32, result: u32 },
    /// The final answer.
    Answer { result: u32 },
}

/// The ordered statements of one explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationTrace {
    pub level: Level,
    pub first: u32,
    pub second: u32,
    pub statements: Vec<Statement>,
}

impl ExplanationTrace {
    /// The answer the explanation arrives at.
    pub fn answer(&self) -> Option<u32> {
        match self.statements.last() {
            Some(Statement::Answer { result }) => Some(*result),
            _ => None,
        }
    }
}

/// Tracks the running total while statements are appended.
struct Narration {
    total: u32,
    statements: Vec<Statement>,
}

impl Narration {
    fn subtract(&mut self, amount: u32) {
        let result = self.total - amount;
        self.statements.push(Statement::Subtract {
            from: self.total,
            amount,
            result,
        });
        self.total = result;
    }

    fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Units with a split at the ten when a borrow is needed.
    fn split_units(&mut self, units: u32, over: bool) {
        if over && self.total % 10 != 0 {
            let to_ten = self.total % 10;
            let remaining = units - to_ten;
            self.push(Statement::JumpToTen {
                from: self.total,
                amount: to_ten,
            });
            self.subtract(to_ten);
            self.push(Statement::RestOfUnits {
                units,
                taken: to_ten,
                remaining,
            });
            self.subtract(remaining);
        } else {
            self.subtract(units);
        }
    }
}

/// Build the worked solution of `first - second` for a level.
///
/// Expects `first >= second` with `second >= 10`, as [`Exercise`] enforces.
///
/// # Panics
///
/// Panics if `first < second`. Validate untrusted input with
/// [`Exercise::new`] first.
///
/// [`Exercise`]: crate::core::Exercise
/// [`Exercise::new`]: crate::core::Exercise::new
pub fn explain(level: Level, first: u32, second: u32) -> ExplanationTrace {
    assert!(
        first >= second,
        "cannot explain {} minus {}: the result would be negative",
        first,
        second
    );
    let over = first % 10 < second % 10;
    let units = second % 10;
    let tens = second / 10;

    let mut narration = Narration {
        total: first,
        statements: vec![Statement::Intro { first, second }],
    };

    match level {
        Level::One | Level::Two => {
            for i in 0..tens {
                narration.push(if i == 0 {
                    Statement::FirstTen
                } else {
                    Statement::AnotherTen
                });
                narration.subtract(10);
            }
            if units > 0 {
                narration.push(Statement::TensDone { units });
                narration.split_units(units, over);
            }
        }
        Level::Three => {
            narration.push(Statement::AllTens { tens: tens * 10 });
            narration.subtract(tens * 10);
            if units > 0 {
                narration.push(Statement::TensDone { units });
                narration.split_units(units, over);
            }
        }
        Level::Four => {
            narration.push(Statement::AllTens { tens: tens * 10 });
            narration.subtract(tens * 10);
            if units > 0 {
                narration.push(Statement::AllUnits { units });
                narration.subtract(units);
            }
        }
    }

    let result = narration.total;
    narration.push(Statement::Answer { result });

    ExplanationTrace {
        level,
        first,
        second,
        statements: narration.statements,
    }
}
