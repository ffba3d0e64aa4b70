//! Per-exercise dialogue.
//!
//! Level 1 is guided: the tutor states every subtrahend and the learner
//! gives the running total. Levels 2-4 ask the learner for each step and
//! then for the running total. All levels share the two-strikes policy:
//! after the first rejected attempt the learner may retry or ask for the
//! explanation, the second rejected attempt ends the exercise with the
//! explanation.

use rand::Rng;

use crate::core::{explain, Exercise, Level, Phase};
use crate::error::{Result, TutorError};
use crate::interaction::{Choice, Interaction, Recognition};
use crate::lesson::phrases::Phrasebook;
use crate::stats::{Ending, ExerciseTally, MistakeKind};

/// Rejected attempts allowed per exercise before the tutor explains.
pub const MAX_STRIKES: u32 = 2;

/// A rejected attempt and where the exercise stood before it.
#[derive(Debug, Clone, Copy)]
struct Miss {
    /// The number the learner gave; `None` when nothing was recognized.
    heard: Option<u32>,
    phase: Phase,
    kind: MistakeKind,
    remaining: u32,
    position: u32,
}

enum Flow {
    Retry,
    Ended,
}

/// Plays exercises against an interaction collaborator.
pub struct Tutor<'a, I: ?Sized, R: ?Sized> {
    level: Level,
    phrases: Phrasebook,
    interaction: &'a mut I,
    rng: &'a mut R,
}

impl<'a, I, R> Tutor<'a, I, R>
where
    I: Interaction + ?Sized,
    R: Rng + ?Sized,
{
    pub fn new(level: Level, phrases: Phrasebook, interaction: &'a mut I, rng: &'a mut R) -> Self {
        Self {
            level,
            phrases,
            interaction,
            rng,
        }
    }

    /// Play one exercise to its end and return its tally.
    pub fn play(&mut self, mut exercise: Exercise) -> Result<ExerciseTally> {
        let mut tally = ExerciseTally::new(exercise.first_number(), exercise.second_number());
        tracing::info!(
            first = exercise.first_number(),
            second = exercise.second_number(),
            level = %self.level,
            "exercise started"
        );

        let solved = if self.level.is_guided() {
            self.play_guided(&mut exercise, &mut tally)?
        } else {
            self.play_stepwise(&mut exercise, &mut tally)?
        };

        if solved {
            tally.ending = Some(Ending::Solved);
            let praise = self.phrases.praise(self.rng);
            self.interaction.say(praise)?;
        }

        tracing::info!(
            first = tally.first_number,
            second = tally.second_number,
            mistakes = tally.mistakes(),
            solved,
            "exercise finished"
        );
        Ok(tally)
    }

    fn play_guided(&mut self, exercise: &mut Exercise, tally: &mut ExerciseTally) -> Result<bool> {
        let opening = self
            .phrases
            .guided_opening(exercise.first_number(), exercise.second_number());
        self.interaction.say(&opening)?;

        while let Some(step) = exercise.guided_step() {
            let (position, remaining) = (exercise.current_first(), exercise.current_second());
            let verdict = exercise.take_step(step, self.level);
            if !verdict.accepted {
                return Err(TutorError::invalid_exercise(format!(
                    "guided step {} refused at {}: {}",
                    step, position, verdict.tag
                )));
            }

            loop {
                let prompt = self.phrases.what_is(position, step);
                self.interaction.say(&prompt)?;
                let miss = match self.listen_number()? {
                    Recognition::Number(answer) => {
                        let verdict = exercise.acceptable_answer(answer);
                        if verdict.accepted {
                            break;
                        }
                        Miss {
                            heard: Some(answer),
                            phase: verdict.tag.phase().unwrap_or(Phase::Units),
                            kind: MistakeKind::Answer,
                            remaining,
                            position,
                        }
                    }
                    Recognition::NotRecognized => Miss {
                        heard: None,
                        phase: answer_phase(exercise),
                        kind: MistakeKind::Answer,
                        remaining,
                        position,
                    },
                };
                if let Flow::Ended = self.reject(exercise, tally, miss)? {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    fn play_stepwise(&mut self, exercise: &mut Exercise, tally: &mut ExerciseTally) -> Result<bool> {
        while !exercise.is_done() {
            let (position, remaining) = (exercise.current_first(), exercise.current_second());

            loop {
                self.interaction.say(self.phrases.ask_step())?;
                let miss = match self.listen_number()? {
                    Recognition::Number(step) => {
                        let verdict = exercise.take_step(step, self.level);
                        if verdict.accepted {
                            tally.record_step(verdict.tag);
                            break;
                        }
                        Miss {
                            heard: Some(step),
                            phase: verdict
                                .tag
                                .phase()
                                .unwrap_or_else(|| exercise.current_phase()),
                            kind: MistakeKind::Step,
                            remaining,
                            position,
                        }
                    }
                    Recognition::NotRecognized => Miss {
                        heard: None,
                        phase: exercise.current_phase(),
                        kind: MistakeKind::Step,
                        remaining,
                        position,
                    },
                };
                if let Flow::Ended = self.reject(exercise, tally, miss)? {
                    return Ok(false);
                }
            }

            loop {
                self.interaction.say(self.phrases.ask_total())?;
                let miss = match self.listen_number()? {
                    Recognition::Number(answer) => {
                        let verdict = exercise.acceptable_answer(answer);
                        if verdict.accepted {
                            break;
                        }
                        Miss {
                            heard: Some(answer),
                            phase: verdict.tag.phase().unwrap_or(Phase::Units),
                            kind: MistakeKind::Answer,
                            remaining,
                            position,
                        }
                    }
                    Recognition::NotRecognized => Miss {
                        heard: None,
                        phase: answer_phase(exercise),
                        kind: MistakeKind::Answer,
                        remaining,
                        position,
                    },
                };
                if let Flow::Ended = self.reject(exercise, tally, miss)? {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Apply the two-strikes policy to a rejected attempt.
    fn reject(&mut self, exercise: &Exercise, tally: &mut ExerciseTally, miss: Miss) -> Result<Flow> {
        let strikes = match miss.heard {
            Some(number) => {
                let heard = self.phrases.heard(number);
                self.interaction.say(&heard)?;
                let encouragement = self.phrases.encouragement(self.rng);
                self.interaction.say(encouragement)?;
                tally.record_mistake(miss.phase, miss.kind)
            }
            None => {
                self.interaction.say(self.phrases.not_heard())?;
                tally.record_not_heard()
            }
        };
        tracing::debug!(
            heard = ?miss.heard,
            phase = %miss.phase,
            kind = ?miss.kind,
            strikes,
            "attempt rejected"
        );

        if strikes >= MAX_STRIKES {
            self.explain(exercise, tally, miss, false)?;
            return Ok(Flow::Ended);
        }

        match self.listen_choice()? {
            Choice::Explain => {
                self.explain(exercise, tally, miss, true)?;
                Ok(Flow::Ended)
            }
            Choice::Retry => {
                tally.record_retry();
                let restated = self.phrases.restate(
                    exercise.first_number(),
                    exercise.second_number(),
                    miss.remaining,
                    miss.position,
                );
                self.interaction.say(&restated)?;
                Ok(Flow::Retry)
            }
        }
    }

    fn explain(
        &mut self,
        exercise: &Exercise,
        tally: &mut ExerciseTally,
        miss: Miss,
        asked_for_help: bool,
    ) -> Result<()> {
        let trace = explain(self.level, exercise.first_number(), exercise.second_number());
        let text = self.phrases.explanation(&trace);
        self.interaction.say(&text)?;
        tally.ending = Some(Ending::Explained {
            phase: miss.phase,
            kind: miss.kind,
            asked_for_help,
        });
        Ok(())
    }

    fn listen_number(&mut self) -> Result<Recognition> {
        self.interaction.signal_ready_for_input();
        let heard = self.interaction.listen_for_number();
        self.interaction.signal_busy();
        heard
    }

    fn listen_choice(&mut self) -> Result<Choice> {
        self.interaction.say(self.phrases.choice_offer())?;
        self.interaction.signal_ready_for_input();
        let choice = self.interaction.listen_for_choice();
        self.interaction.signal_busy();
        choice
    }
}

/// Phase a running-total mistake is attributed to.
fn answer_phase(exercise: &Exercise) -> Phase {
    if exercise.doing_units() {
        Phase::Units
    } else {
        Phase::Tens
    }
}
