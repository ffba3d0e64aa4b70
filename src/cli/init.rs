//! Init command for Stepwise.
//!
//! Writes the project configuration file and creates the user home.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{project_config_path, stepwise_home, Config};

/// Options for the init command.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Overwrite an existing project config.
    pub force: bool,
}

/// Output format for the init command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitOutput {
    /// Whether initialization was successful.
    pub success: bool,
    /// Files and directories created.
    pub created: Vec<String>,
    /// Files that already existed (skipped).
    pub skipped: Vec<String>,
    /// Error message if initialization failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InitOutput {
    pub fn success(created: Vec<String>, skipped: Vec<String>) -> Self {
        Self {
            success: true,
            created,
            skipped,
            error: None,
        }
    }

    /// A failure that still reports what was created before it.
    pub fn failure(error: impl Into<String>, created: Vec<String>, skipped: Vec<String>) -> Self {
        Self {
            success: false,
            created,
            skipped,
            error: Some(error.into()),
        }
    }
}

/// The init command implementation.
pub struct InitCommand {
    cwd: PathBuf,
    config: Config,
}

impl InitCommand {
    /// Create an init command that writes `config` under `cwd`.
    pub fn new(cwd: impl AsRef<Path>, config: Config) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            config,
        }
    }

    /// Run the init command.
    pub fn run(&self, options: &InitOptions) -> InitOutput {
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        let config_path = project_config_path(&self.cwd);
        if config_path.exists() && !options.force {
            skipped.push(config_path.display().to_string());
        } else if let Err(e) = self.config.save_project(&self.cwd) {
            return InitOutput::failure(e.to_string(), created, skipped);
        } else {
            created.push(config_path.display().to_string());
        }

        if let Some(home) = stepwise_home() {
            if home.is_dir() {
                skipped.push(home.display().to_string());
            } else if let Err(e) = fs::create_dir_all(&home) {
                return InitOutput::failure(
                    format!("Failed to create directory {}: {}", home.display(), e),
                    created,
                    skipped,
                );
            } else {
                created.push(home.display().to_string());
            }
        }

        InitOutput::success(created, skipped)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &InitOutput, options: &InitOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &InitOutput) -> String {
        if !output.success {
            return format!(
                "Init failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut lines = Vec::new();
        for path in &output.created {
            lines.push(format!("Created {}", path));
        }
        for path in &output.skipped {
            lines.push(format!("Exists  {} (use --force to overwrite the config)", path));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    fn with_home<T>(f: impl FnOnce(&TempDir) -> T) -> T {
        let home = TempDir::new().unwrap();
        env::set_var("STEPWISE_HOME", home.path().join("home"));
        let result = f(&home);
        env::remove_var("STEPWISE_HOME");
        result
    }

    #[test]
    #[serial]
    fn test_init_creates_config_and_home() {
        with_home(|home| {
            let dir = TempDir::new().unwrap();
            let cmd = InitCommand::new(dir.path(), Config::default());
            let output = cmd.run(&InitOptions::default());

            assert!(output.success);
            assert_eq!(output.created.len(), 2);
            assert!(project_config_path(dir.path()).exists());
            assert!(home.path().join("home").is_dir());
        });
    }

    #[test]
    #[serial]
    fn test_init_skips_existing_config() {
        with_home(|_| {
            let dir = TempDir::new().unwrap();
            let mut config = Config::default();
            config.session.level = Level::Three;
            InitCommand::new(dir.path(), config)
                .run(&InitOptions::default());

            let output = InitCommand::new(dir.path(), Config::default()).run(&InitOptions::default());
            assert!(output.success);
            assert!(output.skipped[0].ends_with("config.toml"));

            let loaded = Config::load_from_file(&project_config_path(dir.path())).unwrap();
            assert_eq!(loaded.session.level, Level::Three);
        });
    }

    #[test]
    #[serial]
    fn test_init_force_overwrites() {
        with_home(|_| {
            let dir = TempDir::new().unwrap();
            let mut config = Config::default();
            config.session.level = Level::Three;
            InitCommand::new(dir.path(), config).run(&InitOptions::default());

            let options = InitOptions {
                force: true,
                ..Default::default()
            };
            let output = InitCommand::new(dir.path(), Config::default()).run(&options);
            assert!(output.success);

            let loaded = Config::load_from_file(&project_config_path(dir.path())).unwrap();
            assert_eq!(loaded.session.level, Level::One);
        });
    }

    #[test]
    fn test_format_output() {
        let cmd = InitCommand::new("/tmp", Config::default());
        let output = InitOutput::success(vec!["/tmp/.stepwise/config.toml".to_string()], vec![]);

        let text = cmd.format_output(&output, &InitOptions::default());
        assert!(text.contains("Created /tmp/.stepwise/config.toml"));

        let json = cmd.format_output(
            &output,
            &InitOptions {
                json: true,
                ..Default::default()
            },
        );
        assert!(json.contains("\"success\": true"));

        let failed = InitOutput::failure("disk full", vec![], vec![]);
        assert!(cmd
            .format_output(&failed, &InitOptions::default())
            .contains("Init failed: disk full"));
    }
}
