//! End-to-end lessons driven through the public API.

use rand::rngs::StdRng;
use rand::SeedableRng;

use stepwise::config::{GeneratorConfig, SessionConfig};
use stepwise::{
    explain, Choice, Config, Ending, Exercise, Language, LessonCommand, LessonSession, Level,
    ScriptedInteraction, ScriptedResponse, Statement, Tag,
};

fn settings(level: Level) -> SessionConfig {
    SessionConfig {
        level,
        duration_seconds: 600,
        language: Language::English,
        max_exercises: Some(3),
    }
}

#[test]
fn guided_level_one_solves_57_minus_23() {
    let mut session = LessonSession::new(settings(Level::One), StdRng::seed_from_u64(1));
    let mut script = ScriptedInteraction::numbers([47, 37, 34]);

    let tally = session
        .play_exercise(&mut script, Exercise::new(57, 23).unwrap())
        .unwrap();

    assert_eq!(tally.ending, Some(Ending::Solved));
    assert_eq!(tally.mistakes(), 0);
    assert!(script.said("What is 57 minus 10?"));
    assert!(script.said("What is 37 minus 3?"));
    assert_eq!(script.remaining(), 0);
}

#[test]
fn two_wrong_steps_explain_once() {
    let mut session = LessonSession::new(settings(Level::Two), StdRng::seed_from_u64(2));
    let mut script = ScriptedInteraction::new([
        ScriptedResponse::Number(5),
        ScriptedResponse::Choice(Choice::Retry),
        ScriptedResponse::Number(5),
    ]);

    let tally = session
        .play_exercise(&mut script, Exercise::new(61, 34).unwrap())
        .unwrap();

    assert!(!tally.finished_correctly());
    let explanations = script
        .spoken()
        .iter()
        .filter(|line| line.contains("This is how I solved 61 minus 34"))
        .count();
    assert_eq!(explanations, 1);
    assert_eq!(session.stats().finished_incorrectly, 1);
    assert_eq!(session.stats().mistakes_in_step, 2);
    assert_eq!(session.stats().ended_in_tens, 1);
}

#[test]
fn validators_follow_the_worked_solution() {
    let mut exercise = Exercise::new(61, 34).unwrap();
    assert_eq!(exercise.take_step(30, Level::Four).tag, Tag::OnLevelTens);
    assert_eq!(exercise.take_step(4, Level::Four).tag, Tag::StepAlreadyTaken);
    assert!(exercise.acceptable_answer(31).accepted);
    assert_eq!(exercise.take_step(4, Level::Four).tag, Tag::OnLevelUnits);
    assert!(exercise.acceptable_answer(27).accepted);
    assert!(exercise.is_done());

    let trace = explain(Level::Four, 61, 34);
    assert_eq!(trace.statements.last(), Some(&Statement::Answer { result: 27 }));
}

#[test]
fn seeded_lessons_are_reproducible() {
    let config = Config {
        session: SessionConfig {
            max_exercises: Some(2),
            ..settings(Level::Three)
        },
        generator: GeneratorConfig { seed: Some(99) },
        ..Config::default()
    };
    let script = || {
        ScriptedInteraction::new([
            ScriptedResponse::NotRecognized,
            ScriptedResponse::Choice(Choice::Explain),
            ScriptedResponse::NotRecognized,
            ScriptedResponse::Choice(Choice::Explain),
        ])
    };

    let mut first = script();
    let mut second = script();
    let a = LessonCommand::new(config.clone()).run(&mut first).unwrap();
    let b = LessonCommand::new(config).run(&mut second).unwrap();

    assert_eq!(first.spoken(), second.spoken());
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.stats.not_heard, 2);
    assert_eq!(a.stats.asked_for_explanation, 2);
}
