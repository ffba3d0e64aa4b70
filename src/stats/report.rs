//! End-of-lesson report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Level;
use crate::lesson::Language;
use crate::stats::tally::{ExerciseTally, SessionStats};

/// Options for rendering a report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Summary of a finished lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub level: Level,
    pub language: Language,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub stats: SessionStats,
    /// Per-exercise tallies in the order they were played.
    #[serde(default)]
    pub exercises: Vec<ExerciseTally>,
}

impl SessionReport {
    /// Wall-clock length of the lesson in whole seconds.
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds().max(0)
    }

    /// Format the report based on options.
    pub fn format(&self, options: &ReportOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable()
        }
    }

    fn format_human_readable(&self) -> String {
        let s = &self.stats;
        let mut lines = Vec::new();

        lines.push("=== Lesson Report ===\n".to_string());
        lines.push(format!(
            "Level {} | Language {} | {}m {}s",
            self.level,
            self.language,
            self.duration_seconds() / 60,
            self.duration_seconds() % 60
        ));
        lines.push(format!(
            "Started {}\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        lines.push("Exercises".to_string());
        lines.push(format!(
            "   Done: {} | Finished correctly: {} | Explained: {}",
            s.exercises_done, s.finished_correctly, s.finished_incorrectly
        ));
        lines.push(format!(
            "   Success rate: {:.1}%",
            s.success_rate() * 100.0
        ));
        lines.push(format!(
            "   Asked for explanation: {} | Tried again: {}\n",
            s.asked_for_explanation, s.tried_again
        ));

        lines.push("Mistakes (made / ended the exercise)".to_string());
        lines.push(format!(
            "   Tens: {} / {} | Units: {} / {}",
            s.mistakes_in_tens, s.ended_in_tens, s.mistakes_in_units, s.ended_in_units
        ));
        lines.push(format!(
            "   Steps: {} / {} | Answers: {} / {}",
            s.mistakes_in_step, s.ended_in_step, s.mistakes_in_answer, s.ended_in_answer
        ));
        lines.push(format!("   Not heard: {}\n", s.not_heard));

        lines.push("Step sizes (exercises)".to_string());
        lines.push(format!(
            "   Tens:  bigger {} | on level {} | smaller {}",
            s.bigger_steps_tens, s.on_level_steps_tens, s.smaller_steps_tens
        ));
        lines.push(format!(
            "   Units: bigger {} | on level {} | smaller {}",
            s.bigger_steps_units, s.on_level_steps_units, s.smaller_steps_units
        ));

        if !self.exercises.is_empty() {
            lines.push(String::new());
            lines.push("Sums".to_string());
            for tally in &self.exercises {
                let outcome = if tally.finished_correctly() {
                    "solved"
                } else {
                    "explained"
                };
                let mistakes = match tally.mistakes() {
                    1 => "1 mistake".to_string(),
                    n => format!("{} mistakes", n),
                };
                lines.push(format!(
                    "   {} - {}: {} ({})",
                    tally.first_number, tally.second_number, outcome, mistakes
                ));
            }
        }

        lines.push(String::new());
        lines.join("\n")
    }
}
