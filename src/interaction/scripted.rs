//! Scripted interaction for testing.
//!
//! Replays a fixed queue of learner responses and records everything the
//! tutor says, so lesson protocols can be asserted end to end.

use std::collections::VecDeque;

use crate::error::{Result, TutorError};
use crate::interaction::{Choice, Interaction, Recognition};

/// One canned learner response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedResponse {
    Number(u32),
    NotRecognized,
    Choice(Choice),
}

/// Interaction that replays canned responses.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    responses: VecDeque<ScriptedResponse>,
    spoken: Vec<String>,
    ready_signals: usize,
    busy_signals: usize,
}

impl ScriptedInteraction {
    /// Create an interaction that will answer with `responses` in order.
    pub fn new(responses: impl IntoIterator<Item = ScriptedResponse>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Convenience constructor for a script of numbers only.
    pub fn numbers(numbers: impl IntoIterator<Item = u32>) -> Self {
        Self::new(numbers.into_iter().map(ScriptedResponse::Number))
    }

    /// Append a response to the script.
    pub fn push(&mut self, response: ScriptedResponse) {
        self.responses.push_back(response);
    }

    /// Everything the tutor said, in order.
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    /// Whether any spoken line contains `needle`.
    pub fn said(&self, needle: &str) -> bool {
        self.spoken.iter().any(|line| line.contains(needle))
    }

    /// Responses not consumed yet.
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }

    /// Number of times input was signalled ready.
    pub fn ready_signals(&self) -> usize {
        self.ready_signals
    }

    /// Number of times input was signalled busy.
    pub fn busy_signals(&self) -> usize {
        self.busy_signals
    }

    fn next(&mut self) -> Result<ScriptedResponse> {
        self.responses
            .pop_front()
            .ok_or_else(|| TutorError::interaction("script exhausted"))
    }
}

impl Interaction for ScriptedInteraction {
    fn say(&mut self, text: &str) -> Result<()> {
        self.spoken.push(text.to_string());
        Ok(())
    }

    fn listen_for_number(&mut self) -> Result<Recognition> {
        match self.next()? {
            ScriptedResponse::Number(n) => Ok(Recognition::Number(n)),
            ScriptedResponse::NotRecognized => Ok(Recognition::NotRecognized),
            ScriptedResponse::Choice(choice) => Err(TutorError::interaction(format!(
                "expected a number, script has {:?}",
                choice
            ))),
        }
    }

    fn listen_for_choice(&mut self) -> Result<Choice> {
        match self.next()? {
            ScriptedResponse::Choice(choice) => Ok(choice),
            other => Err(TutorError::interaction(format!(
                "expected a choice, script has {:?}",
                other
            ))),
        }
    }

    fn signal_ready_for_input(&mut self) {
        self.ready_signals += 1;
    }

    fn signal_busy(&mut self) {
        self.busy_signals += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let mut interaction = ScriptedInteraction::new([
            ScriptedResponse::Number(47),
            ScriptedResponse::NotRecognized,
            ScriptedResponse::Choice(Choice::Retry),
        ]);

        assert_eq!(
            interaction.listen_for_number().unwrap(),
            Recognition::Number(47)
        );
        assert_eq!(
            interaction.listen_for_number().unwrap(),
            Recognition::NotRecognized
        );
        assert_eq!(interaction.listen_for_choice().unwrap(), Choice::Retry);
        assert_eq!(interaction.remaining(), 0);
    }

    #[test]
    fn test_exhausted_script_is_an_error() {
        let mut interaction = ScriptedInteraction::default();
        assert!(interaction.listen_for_number().is_err());
    }

    #[test]
    fn test_mismatched_response_is_an_error() {
        let mut interaction = ScriptedInteraction::numbers([3]);
        assert!(interaction.listen_for_choice().is_err());
    }

    #[test]
    fn test_records_speech_and_signals() {
        let mut interaction = ScriptedInteraction::default();
        interaction.say("What is 57 minus 10?").unwrap();
        interaction.signal_ready_for_input();
        interaction.signal_busy();

        assert!(interaction.said("57 minus 10"));
        assert_eq!(interaction.spoken().len(), 1);
        assert_eq!(interaction.ready_signals(), 1);
        assert_eq!(interaction.busy_signals(), 1);
    }
}
