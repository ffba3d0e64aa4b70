//! The interaction collaborator the lesson talks through.
//!
//! The tutoring core only needs a few blocking operations: say a line,
//! listen for a number, listen for the retry/explain choice, and toggle an
//! input-ready signal. `TerminalInteraction` drives a lesson over a text
//! terminal; `ScriptedInteraction` replays canned responses for tests.

pub mod scripted;
pub mod terminal;
pub mod traits;

pub use scripted::{ScriptedInteraction, ScriptedResponse};
pub use terminal::TerminalInteraction;
pub use traits::{Choice, Interaction, Recognition};
