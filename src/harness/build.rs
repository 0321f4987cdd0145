//! Build precondition
//!
//! The tool must be built once before any fixture runs. A missing build descriptor or a failing build step is fatal
//! to the whole run, and the full captured build output is surfaced to the caller.

use std::process::Command;

use crate::config::{BuildConfig, BuildStep};
use crate::error::{HarnessError, HarnessResult};

/// Check the build descriptor and run every build step in order.
#[tracing::instrument(skip_all, fields(project = %config.project_dir.display()))]
pub fn ensure_built(config: &BuildConfig) -> HarnessResult<()> {
    let descriptor = config.project_dir.join(&config.descriptor);
    if !descriptor.is_file() {
        return Err(HarnessError::MissingBuildDescriptor {
            descriptor: config.descriptor.clone(),
            dir: config.project_dir.clone(),
        });
    }

    for step in &config.steps {
        run_step(config, step)?;
    }
    tracing::info!(steps = config.steps.len(), "tool built");
    Ok(())
}

fn run_step(config: &BuildConfig, step: &BuildStep) -> HarnessResult<()> {
    tracing::debug!(command = %step, "running build step");
    let output = Command::new(&step.program)
        .args(&step.args)
        .current_dir(&config.project_dir)
        .output()
        .map_err(|source| HarnessError::Spawn {
            program: step.program.clone().into(),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }
    Err(HarnessError::BuildFailed {
        command: step.to_string(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
