//! CLI module for the asmgold harness
//!
//! ## Commands
//!
//! - `run` - Build the tool, then run every fixture and report verdicts
//! - `list` - Print the generated case names with their classification
//! - `build` - Run only the build precondition
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::harness::RunOptions;
use crate::version::ASMGOLD_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        // miette's Debug rendering is the full graphical report (code, help, source chain)
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Golden-file conformance harness for an assembler CLI
#[derive(Parser, Debug)]
#[command(name = "asmgold")]
#[command(version = ASMGOLD_VERSION)]
#[command(about = "Golden-file conformance harness for an assembler CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Report format of `run`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// pytest-style colored terminal output
    #[default]
    Console,
    /// One JSON object per line
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the tool and run every fixture
    Run {
        /// Fixture tree root (default: tests/cases, or $ASMGOLD_CASES)
        #[arg(long, value_name = "DIR")]
        cases: Option<PathBuf>,
        /// Tool executable (default: ./assembler, or $ASMGOLD_TOOL)
        #[arg(long, value_name = "PATH")]
        tool: Option<PathBuf>,
        /// Project directory holding the Makefile (default: ., or $ASMGOLD_PROJECT)
        #[arg(long, value_name = "DIR")]
        project: Option<PathBuf>,
        /// Skip the build step
        #[arg(long)]
        no_build: bool,
        /// Stop on first failure
        #[arg(short = 'x', long = "exitfirst")]
        stop_on_fail: bool,
        /// Filter cases by substring of name or fixture path
        #[arg(short = 'k', value_name = "EXPR")]
        filter: Option<String>,
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
        format: ReportFormat,
        /// Directory name marking extended fixtures
        #[arg(long, value_name = "NAME")]
        extended_subtree: Option<String>,
    },

    /// List discovered cases without running them
    List {
        /// Fixture tree root (default: tests/cases, or $ASMGOLD_CASES)
        #[arg(long, value_name = "DIR")]
        cases: Option<PathBuf>,
        /// Directory name marking extended fixtures
        #[arg(long, value_name = "NAME")]
        extended_subtree: Option<String>,
    },

    /// Run only the build step
    Build {
        /// Project directory holding the Makefile (default: ., or $ASMGOLD_PROJECT)
        #[arg(long, value_name = "DIR")]
        project: Option<PathBuf>,
    },
}

/// Flag overrides applied on top of the environment-derived config.
#[derive(Debug, Default)]
struct ConfigOverrides {
    cases: Option<PathBuf>,
    tool: Option<PathBuf>,
    project: Option<PathBuf>,
    extended_subtree: Option<String>,
}

impl ConfigOverrides {
    fn apply(self, mut config: HarnessConfig) -> HarnessConfig {
        if let Some(cases) = self.cases {
            config = config.with_cases_root(cases);
        }
        if let Some(tool) = self.tool {
            config = config.with_tool(tool);
        }
        if let Some(project) = self.project {
            config = config.with_project_dir(project);
        }
        if let Some(name) = self.extended_subtree {
            config = config.with_extended_subtree(name);
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Run {
            cases,
            tool,
            project,
            no_build,
            stop_on_fail,
            filter,
            verbose,
            format,
            extended_subtree,
        } => {
            let config = ConfigOverrides {
                cases,
                tool,
                project,
                extended_subtree,
            }
            .apply(HarnessConfig::from_env());
            let options = RunOptions { stop_on_fail, filter };
            let mut reporter = commands::reporter_for(format, verbose);
            commands::run_cases(&config, &options, !no_build, reporter.as_mut())
        }
        Command::List {
            cases,
            extended_subtree,
        } => {
            let config = ConfigOverrides {
                cases,
                extended_subtree,
                ..ConfigOverrides::default()
            }
            .apply(HarnessConfig::from_env());
            commands::list_cases(&config)
        }
        Command::Build { project } => {
            let config = ConfigOverrides {
                project,
                ..ConfigOverrides::default()
            }
            .apply(HarnessConfig::from_env());
            commands::build_tool(&config)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
