//! Configuration loading for Stepwise.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.stepwise/config.toml`)
//! 3. User config (`~/.stepwise/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. A lesson runs with sensible defaults
//! when no config exists. Command-line flags are applied on top by the
//! binary.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::Level;
use crate::error::{FailOpen, Result, TutorError};
use crate::lesson::Language;

/// Main configuration struct for Stepwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Lesson settings.
    pub session: SessionConfig,
    /// Exercise generation settings.
    pub generator: GeneratorConfig,
    /// Diagnostics settings.
    pub logging: LoggingConfig,
}

/// Lesson settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Step granularity the learner is expected to use.
    pub level: Level,
    /// Wall-clock budget of a lesson. Checked between exercises only.
    pub duration_seconds: u64,
    /// Narration language.
    pub language: Language,
    /// Stop after this many exercises even if time remains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_exercises: Option<u32>,
}

/// Default lesson length: 20 minutes.
pub const DEFAULT_DURATION_SECONDS: u64 = 1200;

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: Level::One,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            language: Language::English,
            max_exercises: None,
        }
    }
}

impl SessionConfig {
    /// Whole minutes of the budget, as announced in the introduction.
    pub fn minutes(&self) -> u64 {
        self.duration_seconds / 60
    }
}

/// Exercise generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible lessons. Random when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Project config (`.stepwise/config.toml` in cwd)
    /// 3. User config (`~/.stepwise/config.toml`)
    /// 4. Defaults
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `~/.stepwise/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = stepwise_home()?;
        Self::load_optional(&home.join("config.toml"))
    }

    /// Load project config from `.stepwise/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        Self::load_optional(&project_config_path(cwd))
    }

    /// A missing file is silent; an unreadable or invalid one is logged.
    fn load_optional(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        Self::load_from_file(path)
            .map(Some)
            .fail_open_default("loading config file")
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| TutorError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| TutorError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // STEPWISE_LEVEL
        if let Ok(val) = env::var("STEPWISE_LEVEL") {
            match val.parse::<u32>().map(Level::try_from) {
                Ok(Ok(level)) => self.session.level = level,
                _ => eprintln!(
                    "Warning: Invalid STEPWISE_LEVEL value '{}'. \
                    Valid values: 1-4. Using '{}'.",
                    val, self.session.level
                ),
            }
        }

        // STEPWISE_DURATION_SECONDS
        if let Ok(val) = env::var("STEPWISE_DURATION_SECONDS") {
            match val.parse::<u64>() {
                Ok(n) => self.session.duration_seconds = n,
                Err(_) => eprintln!(
                    "Warning: Invalid STEPWISE_DURATION_SECONDS value '{}'. \
                    Expected a positive integer. Using '{}'.",
                    val, self.session.duration_seconds
                ),
            }
        }

        // STEPWISE_LANGUAGE
        if let Ok(val) = env::var("STEPWISE_LANGUAGE") {
            match val.parse::<Language>() {
                Ok(language) => self.session.language = language,
                Err(_) => eprintln!(
                    "Warning: Invalid STEPWISE_LANGUAGE value '{}'. \
                    Valid values: en, nl. Using '{}'.",
                    val, self.session.language
                ),
            }
        }

        // STEPWISE_MAX_EXERCISES
        if let Ok(val) = env::var("STEPWISE_MAX_EXERCISES") {
            match val.parse::<u32>() {
                Ok(n) if n > 0 => self.session.max_exercises = Some(n),
                _ => eprintln!(
                    "Warning: Invalid STEPWISE_MAX_EXERCISES value '{}'. \
                    Expected a positive integer. Ignoring.",
                    val
                ),
            }
        }

        // STEPWISE_SEED
        if let Ok(val) = env::var("STEPWISE_SEED") {
            match val.parse::<u64>() {
                Ok(n) => self.generator.seed = Some(n),
                Err(_) => eprintln!(
                    "Warning: Invalid STEPWISE_SEED value '{}'. \
                    Expected an unsigned integer. Ignoring.",
                    val
                ),
            }
        }
    }

    /// Merge another config into this one, field by field.
    ///
    /// A field of `other` wins when it differs from the default. A layer
    /// cannot reset a lower layer's customization back to the default
    /// value; it only has to name what it customizes.
    fn merge(mut self, other: Config) -> Self {
        let default_session = SessionConfig::default();
        if other.session.level != default_session.level {
            self.session.level = other.session.level;
        }
        if other.session.duration_seconds != default_session.duration_seconds {
            self.session.duration_seconds = other.session.duration_seconds;
        }
        if other.session.language != default_session.language {
            self.session.language = other.session.language;
        }
        if other.session.max_exercises.is_some() {
            self.session.max_exercises = other.session.max_exercises;
        }

        if other.generator.seed.is_some() {
            self.generator.seed = other.generator.seed;
        }

        if other.logging.filter != LoggingConfig::default().filter {
            self.logging.filter = other.logging.filter;
        }

        self
    }

    /// Save configuration to the project config file.
    ///
    /// Writes to `.stepwise/config.toml` in the given directory, creating
    /// the directory if needed. Writes a temp file and renames it.
    pub fn save_project(&self, cwd: &Path) -> Result<()> {
        let dir = project_dir(cwd);

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| TutorError::storage(&dir, e))?;
        }

        let config_path = dir.join("config.toml");
        let content = toml::to_string_pretty(self).map_err(|e| TutorError::serde(e.to_string()))?;

        let temp_path = dir.join(".config.toml.tmp");
        fs::write(&temp_path, &content).map_err(|e| TutorError::storage(&temp_path, e))?;

        let file = fs::File::open(&temp_path).map_err(|e| TutorError::storage(&temp_path, e))?;
        file.sync_all()
            .map_err(|e| TutorError::storage(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &config_path).map_err(|e| TutorError::storage(&config_path, e))?;

        tracing::debug!(path = %config_path.display(), "saved project config");
        Ok(())
    }
}

/// Get the Stepwise home directory.
///
/// `STEPWISE_HOME` when set and non-empty, otherwise `~/.stepwise`.
pub fn stepwise_home() -> Option<PathBuf> {
    match env::var("STEPWISE_HOME") {
        Ok(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => dirs::home_dir().map(|home| home.join(".stepwise")),
    }
}

/// The project `.stepwise/` directory under `cwd`.
pub fn project_dir(cwd: &Path) -> PathBuf {
    cwd.join(".stepwise")
}

/// The project config file under `cwd`.
pub fn project_config_path(cwd: &Path) -> PathBuf {
    project_dir(cwd).join("config.toml")
}

/// Where the panic hook writes crash reports.
///
/// Returns `<stepwise_home>/crash.log`.
pub fn crash_log_path() -> Option<PathBuf> {
    stepwise_home().map(|h| h.join("crash.log"))
}
