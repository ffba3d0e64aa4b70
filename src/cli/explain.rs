//! Explain command for Stepwise.
//!
//! Prints the worked solution of a given problem at a given level.

use serde::{Deserialize, Serialize};

use crate::core::{explain, Exercise, Level, Statement};
use crate::lesson::{Language, Phrasebook};

/// Options for the explain command.
#[derive(Debug, Clone, Default)]
pub struct ExplainOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the explain command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainOutput {
    pub success: bool,
    pub level: Level,
    pub first: u32,
    pub second: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<u32>,
    /// Language-neutral statements of the solution.
    pub statements: Vec<Statement>,
    /// The rendered, spoken form of each statement.
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The explain command implementation.
pub struct ExplainCommand {
    level: Level,
    first: u32,
    second: u32,
    phrases: Phrasebook,
}

impl ExplainCommand {
    pub fn new(level: Level, first: u32, second: u32, language: Language) -> Self {
        Self {
            level,
            first,
            second,
            phrases: Phrasebook::new(language),
        }
    }

    /// Run the explain command.
    pub fn run(&self) -> ExplainOutput {
        if let Err(e) = Exercise::new(self.first, self.second) {
            return ExplainOutput {
                success: false,
                level: self.level,
                first: self.first,
                second: self.second,
                answer: None,
                statements: Vec::new(),
                lines: Vec::new(),
                error: Some(e.to_string()),
            };
        }

        let trace = explain(self.level, self.first, self.second);
        let lines = trace
            .statements
            .iter()
            .map(|s| self.phrases.statement(s))
            .collect();

        ExplainOutput {
            success: true,
            level: self.level,
            first: self.first,
            second: self.second,
            answer: trace.answer(),
            lines,
            statements: trace.statements,
            error: None,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ExplainOutput, options: &ExplainOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        if !output.success {
            return format!(
                "Explain failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }
        output.lines.join("\n")
    }
}
