//! Lesson command for Stepwise.
//!
//! Runs a full lesson against an interaction and reports the session.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::Result;
use crate::interaction::Interaction;
use crate::lesson::LessonSession;
use crate::stats::{ReportOptions, SessionReport};

/// The lesson command implementation.
pub struct LessonCommand {
    config: Config,
}

impl LessonCommand {
    /// Create a lesson command from the effective configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn rng(&self) -> StdRng {
        match self.config.generator.seed {
            Some(seed) => {
                tracing::debug!(seed, "using fixed seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        }
    }

    /// Run a lesson from introduction to conclusion.
    pub fn run<I: Interaction + ?Sized>(&self, interaction: &mut I) -> Result<SessionReport> {
        let mut session = LessonSession::new(self.config.session.clone(), self.rng());
        session.run(interaction)?;
        session.finish(interaction)
    }

    /// Format the session report based on options.
    pub fn format_output(&self, report: &SessionReport, options: &ReportOptions) -> String {
        report.format(options)
    }
}
