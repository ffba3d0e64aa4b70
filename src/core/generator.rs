//! Random exercise generation.
//!
//! Problems are assembled from two random tens and two random units so the
//! units digits can be arranged to force (or avoid) a borrow.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::exercise::Exercise;

/// Whether the next exercise crosses a ten when subtracting the units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// The first number's units digit is smaller: a borrow is required.
    Over,
    /// No borrow.
    Plain,
}

impl GenerationMode {
    /// Harder problems after a solved exercise, easier after an explained one.
    pub fn after(previous_correct: bool) -> Self {
        if previous_correct {
            GenerationMode::Over
        } else {
            GenerationMode::Plain
        }
    }

    pub fn is_over(self) -> bool {
        self == GenerationMode::Over
    }
}

/// Generates exercises from a random source.
#[derive(Debug)]
pub struct ExerciseGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> ExerciseGenerator<R> {
    /// Create a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Access the underlying random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    fn draw_tens(&mut self) -> u32 {
        self.rng.gen_range(2..=9) * 10
    }

    /// Generate an exercise in the given mode.
    pub fn generate(&mut self, mode: GenerationMode) -> Exercise {
        let (first, second) = match mode {
            GenerationMode::Over => self.draw_over(),
            GenerationMode::Plain => self.draw_plain(),
        };

        tracing::debug!(first, second, ?mode, "generated exercise");
        Exercise::fresh(first, second)
    }

    fn draw_over(&mut self) -> (u32, u32) {
        let tens_a = self.draw_tens();
        let mut tens_b = self.draw_tens();
        while tens_a == tens_b {
            tens_b = self.draw_tens();
        }

        let units_a = self.rng.gen_range(1..=8);
        let mut units_b = self.rng.gen_range(1..=8);
        while units_a == units_b {
            units_b = self.rng.gen_range(1..=8);
        }

        (
            tens_a.max(tens_b) + units_a.min(units_b),
            tens_a.min(tens_b) + units_a.max(units_b),
        )
    }

    fn draw_plain(&mut self) -> (u32, u32) {
        loop {
            let tens_a = self.draw_tens();
            let tens_b = self.draw_tens();
            let mut units_a = self.rng.gen_range(1..=9);
            let mut units_b = self.rng.gen_range(1..=9);

            // Keep the first number below 99.
            if tens_a.max(tens_b) == 90 {
                while units_a.max(units_b) == 9 || units_a == units_b {
                    units_a = self.rng.gen_range(1..=9);
                    units_b = self.rng.gen_range(1..=9);
                }
            }

            let first = tens_a.max(tens_b) + units_a.max(units_b);
            let second = tens_a.min(tens_b) + units_a.min(units_b);
            // A zero difference is no exercise.
            if first > second {
                return (first, second);
            }
        }
    }
}
