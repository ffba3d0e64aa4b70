//! Generate command for Stepwise.
//!
//! Prints generated problems without playing them, e.g. for worksheets.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::core::{ExerciseGenerator, GenerationMode};

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// A generated problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedProblem {
    pub first: u32,
    pub second: u32,
    pub answer: u32,
    pub needs_borrow: bool,
}

/// Output format for the generate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub mode: GenerationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub problems: Vec<GeneratedProblem>,
}

/// The generate command implementation.
pub struct GenerateCommand {
    mode: GenerationMode,
    count: usize,
    seed: Option<u64>,
}

impl GenerateCommand {
    pub fn new(mode: GenerationMode, count: usize, seed: Option<u64>) -> Self {
        Self { mode, count, seed }
    }

    /// Run the generate command.
    pub fn run(&self) -> GenerateOutput {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut generator = ExerciseGenerator::new(rng);

        let problems = (0..self.count)
            .map(|_| {
                let exercise = generator.generate(self.mode);
                GeneratedProblem {
                    first: exercise.first_number(),
                    second: exercise.second_number(),
                    answer: exercise.difference(),
                    needs_borrow: exercise.needs_borrow(),
                }
            })
            .collect();

        GenerateOutput {
            mode: self.mode,
            seed: self.seed,
            problems,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &GenerateOutput, options: &GenerateOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            output
                .problems
                .iter()
                .map(|p| format!("{} - {} =", p.first, p.second))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}
