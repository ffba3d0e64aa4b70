//! Terminal interaction.
//!
//! Lines are printed instead of spoken, numbers are typed, and the two
//! physical choice triggers become `r` (retry) and `e` (explain).

use std::io::{BufRead, Write};

use crate::error::{Result, TutorError};
use crate::interaction::{Choice, Interaction, Recognition};

/// Interaction over a line-based reader and writer.
#[derive(Debug)]
pub struct TerminalInteraction<R, W> {
    input: R,
    output: W,
    ready: bool,
}

impl<R: BufRead, W: Write> TerminalInteraction<R, W> {
    /// Create a terminal interaction over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            ready: false,
        }
    }

    /// Consume the interaction and return the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String> {
        if self.ready {
            write!(self.output, "> ")?;
        }
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(TutorError::interaction("input closed"));
        }
        Ok(line.trim().to_string())
    }
}

/// Parse a typed choice.
fn parse_choice(input: &str) -> Option<Choice> {
    match input.to_lowercase().as_str() {
        "r" | "retry" | "again" | "opnieuw" => Some(Choice::Retry),
        "e" | "explain" | "help" | "uitleg" => Some(Choice::Explain),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Interaction for TerminalInteraction<R, W> {
    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn listen_for_number(&mut self) -> Result<Recognition> {
        let line = self.read_line()?;
        match line.parse::<u32>() {
            Ok(n) => Ok(Recognition::Number(n)),
            Err(_) => {
                tracing::debug!(input = %line, "no number recognized");
                Ok(Recognition::NotRecognized)
            }
        }
    }

    fn listen_for_choice(&mut self) -> Result<Choice> {
        loop {
            let line = self.read_line()?;
            if let Some(choice) = parse_choice(&line) {
                return Ok(choice);
            }
            writeln!(self.output, "[r] retry  [e] explain")?;
        }
    }

    fn signal_ready_for_input(&mut self) {
        self.ready = true;
    }

    fn signal_busy(&mut self) {
        self.ready = false;
    }

    fn wait_for_start(&mut self) -> Result<()> {
        writeln!(self.output, "[press Enter to start]")?;
        self.read_line().map(|_| ())
    }
}
