//! Execution adapter
//!
//! The tool is an opaque subprocess. Its contract is `tool <input-path-without-extension>`: it appends the input
//! extension itself and writes its artifacts next to the input. A non-zero exit is an ordinary result for the caller
//! to judge; only a tool that cannot be started at all is an error.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::Command;

use asmgold_core::artifacts::INPUT_EXTENSION;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};

/// Captured outcome of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Process exit code; `-1` when the process was terminated by a signal
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ExecutionResult {
    pub fn new(exit_code: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

/// Run the tool against one fixture input.
///
/// This trait separates process invocation from the runner so tests (and alternative strategies such as a
/// sandboxed launcher) can stand in for the real subprocess.
pub trait ToolExecutor {
    /// Invoke the tool for `input_path` and capture its result.
    ///
    /// One synchronous, blocking call. Returns `Err` only when the tool cannot be started.
    fn execute(&self, input_path: &Path) -> HarnessResult<ExecutionResult>;
}

/// Subprocess execution with full output capture (default behavior).
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: PathBuf,
}

impl ProcessExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.resolved_tool())
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The positional argument passed for `input_path`: the path without its recognized input extension.
    pub fn invocation_arg(input_path: &Path) -> PathBuf {
        match input_path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext == INPUT_EXTENSION => input_path.with_extension(""),
            _ => input_path.to_path_buf(),
        }
    }
}

impl ToolExecutor for ProcessExecutor {
    fn execute(&self, input_path: &Path) -> HarnessResult<ExecutionResult> {
        let arg = Self::invocation_arg(input_path);
        let mut command = Command::new(&self.program);
        command.arg(&arg);
        if let Some(dir) = input_path.parent() {
            command.current_dir(dir);
        }

        tracing::debug!(program = %self.program.display(), arg = %arg.display(), "invoking tool");
        let output = command.output().map_err(|source| HarnessError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        Ok(ExecutionResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
