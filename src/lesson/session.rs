//! The lesson session.
//!
//! A [`LessonSession`] owns everything one lesson needs: the generator,
//! the session counters and the result of the previous exercise. It is
//! created at the start of a lesson, driven by [`LessonSession::run`] and
//! torn down by [`LessonSession::finish`], which yields the report.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::SessionConfig;
use crate::core::{Exercise, ExerciseGenerator, GenerationMode};
use crate::error::Result;
use crate::interaction::Interaction;
use crate::lesson::phrases::Phrasebook;
use crate::lesson::protocol::Tutor;
use crate::stats::{ExerciseTally, SessionReport, SessionStats};

/// Below this much remaining budget no "next sum" line is said.
const NEXT_SUM_MARGIN: Duration = Duration::from_secs(4);

/// One lesson from introduction to conclusion.
pub struct LessonSession<R: Rng> {
    settings: SessionConfig,
    phrases: Phrasebook,
    generator: ExerciseGenerator<R>,
    stats: SessionStats,
    exercises: Vec<ExerciseTally>,
    previous_correct: bool,
    started_at: DateTime<Utc>,
}

impl<R: Rng> LessonSession<R> {
    /// Create a session. The first exercise requires a borrow.
    pub fn new(settings: SessionConfig, rng: R) -> Self {
        Self {
            phrases: Phrasebook::new(settings.language),
            settings,
            generator: ExerciseGenerator::new(rng),
            stats: SessionStats::default(),
            exercises: Vec::new(),
            previous_correct: true,
            started_at: Utc::now(),
        }
    }

    pub fn settings(&self) -> &SessionConfig {
        &self.settings
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Tallies of the exercises played so far.
    pub fn exercises(&self) -> &[ExerciseTally] {
        &self.exercises
    }

    /// Mode of the next generated exercise.
    pub fn next_mode(&self) -> GenerationMode {
        GenerationMode::after(self.previous_correct)
    }

    fn exercise_limit_reached(&self) -> bool {
        self.settings
            .max_exercises
            .is_some_and(|max| self.stats.exercises_done >= max)
    }

    /// Play the introduction, wait for the learner, then play exercises
    /// until the budget runs out.
    pub fn run<I: Interaction + ?Sized>(&mut self, interaction: &mut I) -> Result<()> {
        tracing::info!(
            level = %self.settings.level,
            language = %self.settings.language,
            duration_seconds = self.settings.duration_seconds,
            "lesson started"
        );

        for line in self
            .phrases
            .introduction(self.settings.level, self.settings.minutes())
        {
            interaction.say(&line)?;
        }
        interaction.wait_for_start()?;
        interaction.say(self.phrases.first_exercise())?;

        let budget = Duration::from_secs(self.settings.duration_seconds);
        let clock = Instant::now();

        while clock.elapsed() < budget && !self.exercise_limit_reached() {
            let exercise = self.generator.generate(self.next_mode());
            self.play_exercise(interaction, exercise)?;

            let more_time = budget.saturating_sub(clock.elapsed()) > NEXT_SUM_MARGIN;
            if more_time && !self.exercise_limit_reached() {
                let line = self.phrases.next_sum(self.generator.rng_mut());
                interaction.say(line)?;
            }
        }

        Ok(())
    }

    /// Announce and play a single exercise, then fold it into the counters.
    pub fn play_exercise<I: Interaction + ?Sized>(
        &mut self,
        interaction: &mut I,
        exercise: Exercise,
    ) -> Result<&ExerciseTally> {
        let announcement = self
            .phrases
            .announce(exercise.first_number(), exercise.second_number());
        interaction.say(&announcement)?;

        let tally = Tutor::new(
            self.settings.level,
            self.phrases,
            interaction,
            self.generator.rng_mut(),
        )
        .play(exercise)?;

        self.previous_correct = tally.finished_correctly();
        self.stats.absorb(&tally);
        tracing::debug!(
            exercises_done = self.stats.exercises_done,
            finished_correctly = self.stats.finished_correctly,
            "session counters updated"
        );

        let index = self.exercises.len();
        self.exercises.push(tally);
        Ok(&self.exercises[index])
    }

    /// Play the conclusion and close the session.
    pub fn finish<I: Interaction + ?Sized>(self, interaction: &mut I) -> Result<SessionReport> {
        interaction.say(self.phrases.conclusion())?;

        let report = SessionReport {
            level: self.settings.level,
            language: self.settings.language,
            started_at: self.started_at,
            finished_at: Utc::now(),
            stats: self.stats,
            exercises: self.exercises,
        };
        tracing::info!(
            exercises_done = report.stats.exercises_done,
            finished_correctly = report.stats.finished_correctly,
            finished_incorrectly = report.stats.finished_incorrectly,
            "lesson finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;
    use crate::interaction::{Choice, ScriptedInteraction, ScriptedResponse};
    use crate::lesson::Language;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings(level: Level, max_exercises: Option<u32>) -> SessionConfig {
        SessionConfig {
            level,
            duration_seconds: 3600,
            language: Language::English,
            max_exercises,
        }
    }

    fn session(level: Level) -> LessonSession<StdRng> {
        LessonSession::new(settings(level, None), StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_first_exercise_is_over() {
        let session = session(Level::Two);
        assert_eq!(session.next_mode(), GenerationMode::Over);
    }

    #[test]
    fn test_explained_exercise_makes_next_plain() {
        let mut session = session(Level::Three);
        let mut script = ScriptedInteraction::new([
            ScriptedResponse::Number(1),
            ScriptedResponse::Choice(Choice::Retry),
            ScriptedResponse::Number(2),
        ]);

        let tally = session
            .play_exercise(&mut script, Exercise::new(61, 34).unwrap())
            .unwrap();
        assert!(!tally.finished_correctly());
        assert_eq!(session.next_mode(), GenerationMode::Plain);
        assert_eq!(session.stats().finished_incorrectly, 1);
        assert_eq!(session.stats().ended_in_step, 1);
        assert!(script.said("The sum we are going to do now is 61 minus 34."));
    }

    #[test]
    fn test_solved_exercise_makes_next_over() {
        let mut session = session(Level::Four);
        let mut script = ScriptedInteraction::numbers([30, 31, 4, 27, 20, 37, 3, 34]);

        session
            .play_exercise(&mut script, Exercise::new(61, 34).unwrap())
            .unwrap();
        session
            .play_exercise(&mut script, Exercise::new(57, 23).unwrap())
            .unwrap();

        assert_eq!(session.next_mode(), GenerationMode::Over);
        assert_eq!(session.stats().exercises_done, 2);
        assert_eq!(session.stats().finished_correctly, 2);
        assert_eq!(session.stats().on_level_steps_tens, 2);
        assert_eq!(session.exercises().len(), 2);
    }

    #[test]
    fn test_run_stops_at_max_exercises() {
        let mut session = LessonSession::new(
            settings(Level::Two, Some(1)),
            StdRng::seed_from_u64(5),
        );
        // Asking for the explanation straight away needs no knowledge of
        // the generated numbers.
        let mut script = ScriptedInteraction::new([
            ScriptedResponse::NotRecognized,
            ScriptedResponse::Choice(Choice::Explain),
        ]);

        session.run(&mut script).unwrap();
        assert_eq!(session.stats().exercises_done, 1);
        assert_eq!(session.stats().asked_for_explanation, 1);
        assert_eq!(session.stats().not_heard, 1);
        assert!(script.said("here comes the first exercise"));
        assert!(!script.said("another sum") && !script.said("next sum"));

        let report = session.finish(&mut script).unwrap();
        assert_eq!(report.stats.exercises_done, 1);
        assert!(script.said("Our maths lesson is over!"));
    }

    #[test]
    fn test_zero_budget_plays_no_exercise() {
        let mut config = settings(Level::One, None);
        config.duration_seconds = 0;
        let mut session = LessonSession::new(config, StdRng::seed_from_u64(5));
        let mut script = ScriptedInteraction::default();

        session.run(&mut script).unwrap();
        assert_eq!(session.stats().exercises_done, 0);
        assert!(!script.said("The sum we are going to do now"));
    }
}
