//! Unified error types for Stepwise.
//!
//! Arithmetic classification never produces errors: a wrong step or answer
//! is a normal [`Verdict`](crate::core::Verdict). The errors here cover the
//! infrastructure around the tutor (config files, the interaction
//! collaborator, invalid problem input).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Stepwise operations.
#[derive(Error, Debug)]
pub enum TutorError {
    /// I/O errors from config or crash-log files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// A problem outside the two-digit subtraction domain.
    #[error("invalid exercise: {message}")]
    InvalidExercise { message: String },

    /// A level outside 1-4.
    #[error("invalid level: {value} (expected 1-4)")]
    InvalidLevel { value: u32 },

    /// The interaction collaborator failed or its input closed.
    #[error("interaction error: {message}")]
    Interaction { message: String },
}

/// A specialized Result type for Stepwise operations.
pub type Result<T> = std::result::Result<T, TutorError>;

impl TutorError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid exercise error.
    pub fn invalid_exercise(message: impl Into<String>) -> Self {
        Self::InvalidExercise {
            message: message.into(),
        }
    }

    /// Create an invalid level error.
    pub fn invalid_level(value: u32) -> Self {
        Self::InvalidLevel { value }
    }

    /// Create an interaction error.
    pub fn interaction(message: impl Into<String>) -> Self {
        Self::Interaction {
            message: message.into(),
        }
    }
}

impl From<io::Error> for TutorError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling on non-critical paths.
///
/// Logs the error as a warning and substitutes a safe value, so a broken
/// config file never keeps a learner from starting a lesson.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }
}

/// Exit codes for the Stepwise CLI.
pub mod exit_codes {
    /// The command completed.
    pub const SUCCESS: i32 = 0;

    /// The command failed with an error.
    pub const FAILURE: i32 = 1;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = TutorError::storage(
            "/tmp/config.toml",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("storage error"));
        assert!(err.to_string().contains("/tmp/config.toml"));
    }

    #[test]
    fn test_config_error_display() {
        let err = TutorError::config("invalid TOML");
        assert_eq!(err.to_string(), "config error: invalid TOML");
    }

    #[test]
    fn test_serde_error_display() {
        let err = TutorError::serde("unsupported type");
        assert_eq!(err.to_string(), "serialization error: unsupported type");
    }

    #[test]
    fn test_invalid_exercise_display() {
        let err = TutorError::invalid_exercise("23 is smaller than 57");
        assert_eq!(err.to_string(), "invalid exercise: 23 is smaller than 57");
    }

    #[test]
    fn test_invalid_level_display() {
        let err = TutorError::invalid_level(7);
        assert_eq!(err.to_string(), "invalid level: 7 (expected 1-4)");
    }

    #[test]
    fn test_interaction_error_display() {
        let err = TutorError::interaction("input closed");
        assert_eq!(err.to_string(), "interaction error: input closed");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: TutorError = io_err.into();
        assert!(matches!(err, TutorError::Storage { .. }));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: TutorError = json_err.into();
        assert!(matches!(err, TutorError::Serde { .. }));
    }

    #[test]
    fn test_fail_open_default() {
        let result: Result<Vec<String>> = Err(TutorError::config("test"));
        let value = result.fail_open_default("test context");
        assert!(value.is_empty());
    }

    #[test]
    fn test_fail_open_success() {
        let result: Result<u32> = Ok(100);
        assert_eq!(result.fail_open_default("test context"), 100);
    }
}
