//! Stepwise - an interactive two-digit subtraction tutor.
//!
//! CLI entry point with global panic handler.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stepwise::cli::explain::{ExplainCommand, ExplainOptions};
use stepwise::cli::generate::{GenerateCommand, GenerateOptions};
use stepwise::cli::init::{InitCommand, InitOptions};
use stepwise::cli::LessonCommand;
use stepwise::config::{crash_log_path, Config};
use stepwise::core::{GenerationMode, Level};
use stepwise::error::exit_codes;
use stepwise::interaction::TerminalInteraction;
use stepwise::lesson::Language;
use stepwise::stats::ReportOptions;

// =============================================================================
// CLI Definition
// =============================================================================

/// Stepwise - an interactive two-digit subtraction tutor
#[derive(Parser)]
#[command(name = "stepwise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug diagnostics to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a lesson in the terminal (type numbers, `r` to retry, `e` for an explanation)
    Lesson {
        /// Level 1-4
        #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..=4))]
        level: Option<u32>,
        /// Lesson length in seconds
        #[arg(long, short)]
        duration: Option<u64>,
        /// Narration language (en, nl)
        #[arg(long)]
        language: Option<String>,
        /// Seed for reproducible exercises
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many exercises
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_exercises: Option<u32>,
        /// Output the report as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress the report
        #[arg(long, short)]
        quiet: bool,
    },

    /// Print the worked solution of FIRST minus SECOND at a level
    Explain {
        /// Level 1-4
        #[arg(value_parser = clap::value_parser!(u32).range(1..=4))]
        level: u32,
        /// The number to subtract from
        first: u32,
        /// The number to subtract
        second: u32,
        /// Narration language (en, nl)
        #[arg(long)]
        language: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Print generated problems
    Generate {
        /// Problems without a borrow instead of problems with one
        #[arg(long)]
        plain: bool,
        /// Number of problems
        #[arg(long, short, default_value_t = 10)]
        count: usize,
        /// Seed for reproducible problems
        #[arg(long)]
        seed: Option<u64>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Write the project configuration (.stepwise/config.toml)
    Init {
        /// Overwrite an existing config
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("stepwise error: {}", e);
            ExitCode::from(exit_codes::FAILURE as u8)
        }
    }
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.stepwise/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("stepwise panic: {}", info);

        if let Some(crash_log) = crash_log_path() {
            if let Some(parent) = crash_log.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Install the stderr subscriber.
///
/// Priority: RUST_LOG > --verbose > `logging.filter` from config.
fn init_tracing(config: &Config, verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        config.logging.filter.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let config = Config::load_from_cwd(&cwd);
    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::Lesson {
            level,
            duration,
            language,
            seed,
            max_exercises,
            json,
            quiet,
        } => {
            let overrides = LessonOverrides {
                level,
                duration,
                language,
                seed,
                max_exercises,
            };
            run_lesson(config, overrides, json, quiet)
        }
        Commands::Explain {
            level,
            first,
            second,
            language,
            json,
            quiet,
        } => run_explain(&config, level, first, second, language, json, quiet),
        Commands::Generate {
            plain,
            count,
            seed,
            json,
            quiet,
        } => run_generate(&config, plain, count, seed, json, quiet),
        Commands::Init { force, json, quiet } => run_init(force, json, quiet, &cwd),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Command-line values that take precedence over the loaded config.
struct LessonOverrides {
    level: Option<u32>,
    duration: Option<u64>,
    language: Option<String>,
    seed: Option<u64>,
    max_exercises: Option<u32>,
}

impl LessonOverrides {
    fn apply(self, config: &mut Config) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(level) = self.level {
            config.session.level = Level::try_from(level)?;
        }
        if let Some(duration) = self.duration {
            config.session.duration_seconds = duration;
        }
        if let Some(language) = self.language {
            config.session.language = language.parse()?;
        }
        if let Some(seed) = self.seed {
            config.generator.seed = Some(seed);
        }
        if let Some(max) = self.max_exercises {
            config.session.max_exercises = Some(max);
        }
        Ok(())
    }
}

fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::FAILURE as u8)
    }
}

fn run_lesson(
    mut config: Config,
    overrides: LessonOverrides,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    overrides.apply(&mut config)?;

    let cmd = LessonCommand::new(config);
    let stdin = io::stdin();
    let mut interaction = TerminalInteraction::new(stdin.lock(), io::stdout());
    let report = cmd.run(&mut interaction)?;

    let options = ReportOptions { json, quiet };
    let formatted = cmd.format_output(&report, &options);
    if !formatted.is_empty() {
        println!("\n{}", formatted);
    }

    Ok(success_to_exit_code(true))
}

fn run_explain(
    config: &Config,
    level: u32,
    first: u32,
    second: u32,
    language: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let level = Level::try_from(level)?;
    let language = match language {
        Some(language) => language.parse::<Language>()?,
        None => config.session.language,
    };

    let cmd = ExplainCommand::new(level, first, second, language);
    let output = cmd.run();
    let formatted = cmd.format_output(&output, &ExplainOptions { json, quiet });

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_generate(
    config: &Config,
    plain: bool,
    count: usize,
    seed: Option<u64>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mode = if plain {
        GenerationMode::Plain
    } else {
        GenerationMode::Over
    };
    let cmd = GenerateCommand::new(mode, count, seed.or(config.generator.seed));
    let output = cmd.run();
    let formatted = cmd.format_output(&output, &GenerateOptions { json, quiet });

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(true))
}

fn run_init(
    force: bool,
    json: bool,
    quiet: bool,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cmd = InitCommand::new(cwd, Config::default());
    let options = InitOptions { json, quiet, force };

    let output = cmd.run(&options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}
