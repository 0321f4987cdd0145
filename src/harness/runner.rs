//! Suite runner
//!
//! Glue between discovery, isolation, execution, and verification. For each fixture:
//! clear artifacts → invoke the tool → verify → clear again → notify the reporter.
//!
//! Fixtures run strictly one after another. Their artifacts share the input basename inside the fixture directory,
//! so two runs of the same fixture must never overlap.

use std::time::Instant;

use super::exec::ToolExecutor;
use super::fixture::Fixture;
use super::isolation::ArtifactGuard;
use super::report::{CaseReport, CaseReporter, SuiteSummary};
use super::verify::{self, Finding, Verdict};
use crate::error::HarnessResult;

/// Selection and flow options for a suite run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after the first failing case
    pub stop_on_fail: bool,
    /// Keep only cases whose test name or identity contains this substring
    pub filter: Option<String>,
}

impl RunOptions {
    pub fn selects(&self, name: &str, fixture: &Fixture) -> bool {
        match &self.filter {
            Some(keyword) => name.contains(keyword.as_str()) || fixture.identity.contains(keyword.as_str()),
            None => true,
        }
    }
}

/// Run one fixture in isolation and judge it.
///
/// An invalid input is reported as a configuration finding without invoking the tool. Artifacts are cleared before
/// the tool runs and again afterwards, including when execution or verification bails out early.
#[tracing::instrument(skip_all, fields(fixture = %fixture.identity))]
pub fn run_case(executor: &dyn ToolExecutor, fixture: &Fixture) -> HarnessResult<Verdict> {
    if let Err(reason) = fixture.validate_input() {
        tracing::debug!(%reason, "input rejected; tool not invoked");
        return Ok(Verdict::fail(Finding::InvalidInput { reason }));
    }

    let guard = ArtifactGuard::acquire(fixture)?;
    let result = executor.execute(&fixture.input_path)?;
    tracing::debug!(exit_code = result.exit_code, stdout = %result.stdout_text(), "tool finished");

    let verdict = verify::verify(fixture, &result)?;
    guard.release()?;
    Ok(verdict)
}

/// Run every selected fixture in order.
///
/// Case names are assigned from the position in the full discovered sequence, before filtering, so a name stays the
/// same whatever `-k` expression selected it. Mismatches never stop sibling cases (unless `stop_on_fail`); any
/// harness error aborts the suite.
pub fn run_suite(
    executor: &dyn ToolExecutor,
    fixtures: impl IntoIterator<Item = Fixture>,
    options: &RunOptions,
    reporter: &mut dyn CaseReporter,
) -> HarnessResult<SuiteSummary> {
    let start_time = Instant::now();

    let selected: Vec<(String, Fixture)> = fixtures
        .into_iter()
        .enumerate()
        .map(|(index, fixture)| (fixture.test_name(index), fixture))
        .filter(|(name, fixture)| options.selects(name, fixture))
        .collect();

    tracing::info!(cases = selected.len(), "running suite");
    reporter.on_collection_complete(selected.len());

    let mut summary = SuiteSummary::default();
    for (name, fixture) in selected {
        reporter.on_case_start(&name, &fixture);
        let case_start = Instant::now();
        let verdict = run_case(executor, &fixture)?;

        let report = CaseReport {
            name,
            identity: fixture.identity,
            verdict,
            duration: case_start.elapsed(),
        };
        summary.record(&report);
        reporter.on_case_complete(&report);

        if options.stop_on_fail && !report.verdict.is_pass() {
            tracing::info!(case = %report.name, "stopping after first failure");
            break;
        }
    }

    summary.duration = start_time.elapsed();
    reporter.on_run_complete(&summary);
    Ok(summary)
}
