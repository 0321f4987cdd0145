//! Run-level errors of the harness.
//!
//! Two families end up here:
//! - **configuration** problems that make the whole run meaningless (no build descriptor);
//! - **infrastructure** failures (cannot spawn, cannot delete a stale artifact, cannot read a golden).
//!
//! Per-fixture configuration problems and tool mismatches are *not* errors: they are findings inside a
//! [`Verdict`](crate::harness::verify::Verdict), so one broken fixture never stops its siblings.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort a harness run
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("build descriptor `{descriptor}` not found in {}", dir.display())]
    #[diagnostic(
        code(asmgold::build::descriptor),
        help("run from the assembler project root or pass --project <DIR>")
    )]
    MissingBuildDescriptor { descriptor: String, dir: PathBuf },

    #[error("build step `{command}` failed with exit code {exit_code}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}")]
    #[diagnostic(code(asmgold::build::failed))]
    BuildFailed {
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("failed to start `{}`: {source}", program.display())]
    #[diagnostic(
        code(asmgold::exec::spawn),
        help("build the assembler first, or point --tool at the executable")
    )]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove generated artifact {}: {source}", path.display())]
    #[diagnostic(
        code(asmgold::isolation::cleanup),
        help("stale artifacts would leak into later comparisons; fix permissions and rerun")
    )]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(asmgold::io::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    /// Whether the error comes from the run's configuration rather than its environment.
    pub fn is_configuration(&self) -> bool {
        matches!(self, HarnessError::MissingBuildDescriptor { .. })
    }
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
