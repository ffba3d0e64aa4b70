//! Lesson orchestration.
//!
//! A [`LessonSession`] runs a timed lesson against an
//! [`Interaction`](crate::interaction::Interaction): introduction, a loop of
//! generated exercises played by the level's protocol, and a conclusion.

pub mod phrases;
pub mod protocol;
pub mod session;

pub use phrases::{Language, Phrasebook};
pub use protocol::{Tutor, MAX_STRIKES};
pub use session::LessonSession;
