//! Interaction traits for Stepwise.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Result of listening for a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recognition {
    /// A number was recognized.
    Number(u32),
    /// Nothing usable was heard (timeout, silence, or not a number).
    NotRecognized,
}

/// The learner's choice after a first mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    /// Try the same sub-step again.
    Retry,
    /// Hear the worked solution now.
    Explain,
}

/// Blocking request/response contract with the speech and sensor layer.
///
/// Errors are infrastructure failures (a closed input, a broken device).
/// A number that could not be recognized is not an error; it is
/// [`Recognition::NotRecognized`].
pub trait Interaction {
    /// Say a line; returns once it has been spoken.
    fn say(&mut self, text: &str) -> Result<()>;

    /// Wait for a spoken or typed number.
    fn listen_for_number(&mut self) -> Result<Recognition>;

    /// Wait for one of the two choice triggers.
    fn listen_for_choice(&mut self) -> Result<Choice>;

    /// Show that input is being accepted now.
    fn signal_ready_for_input(&mut self);

    /// Show that input is no longer being accepted.
    fn signal_busy(&mut self);

    /// Wait until the learner is ready to begin.
    fn wait_for_start(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: Interaction + ?Sized> Interaction for &mut T {
    fn say(&mut self, text: &str) -> Result<()> {
        (**self).say(text)
    }

    fn listen_for_number(&mut self) -> Result<Recognition> {
        (**self).listen_for_number()
    }

    fn listen_for_choice(&mut self) -> Result<Choice> {
        (**self).listen_for_choice()
    }

    fn signal_ready_for_input(&mut self) {
        (**self).signal_ready_for_input()
    }

    fn signal_busy(&mut self) {
        (**self).signal_busy()
    }

    fn wait_for_start(&mut self) -> Result<()> {
        (**self).wait_for_start()
    }
}
