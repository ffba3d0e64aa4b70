//! CLI commands for Stepwise.
//!
//! - **Lesson**: lesson (interactive tutoring session)
//! - **Utility commands**: explain, generate, init

pub mod explain;
pub mod generate;
pub mod init;
pub mod lesson;

pub use explain::ExplainCommand;
pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use lesson::LessonCommand;
