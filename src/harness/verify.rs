//! Verification engine
//!
//! Decides conformance of one fixture from its goldens, the captured [`ExecutionResult`], and the artifacts the tool
//! left in the fixture directory. It is told nothing about which artifacts the tool was supposed to produce; the
//! fixture's goldens and category decide that.
//!
//! ## State machine
//!
//! `Start → Classify(outcome) → {failure path | success path} → {Pass | Fail(findings)}`
//!
//! There are no retries. Every finding for a fixture is collected so the report shows all offending artifacts at
//! once, each with full "got" and "expected" text.
//!
//! ## Errors
//!
//! Findings are verdict data, not errors. `Err` is reserved for infrastructure failures (a golden or artifact that
//! exists but cannot be read).

use std::fmt;

use asmgold_core::artifacts::OutputKind;
use asmgold_core::golden::GOLDEN_ERROR_FILE;
use asmgold_core::text;

use super::exec::ExecutionResult;
use super::fixture::{Category, Fixture, GoldenArtifacts, OutcomeKind, read_text_if_exists};
use crate::error::HarnessResult;

/// Whether a finding blames the fixture or the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingClass {
    /// The fixture itself is broken; not a regression in the tool.
    Configuration,
    /// The tool's behavior differs from the goldens.
    Mismatch,
}

/// One reason a fixture failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Expected failure, but the tool exited 0.
    UnexpectedSuccess,
    /// Expected success, but the tool exited non-zero.
    UnexpectedExit { exit_code: i32, stderr: String },
    /// Normalized diagnostic differs from the normalized golden error.
    DiagnosticMismatch { got: String, expected: String },
    /// Produced artifact differs from its golden.
    ContentMismatch {
        kind: OutputKind,
        got: String,
        expected: String,
    },
    /// A golden exists but the tool produced no such artifact.
    MissingArtifact { kind: OutputKind },
    /// The tool produced an artifact that has no golden to verify it against.
    UnexpectedArtifact { kind: OutputKind },
    /// The basic policy's golden is absent.
    MissingGolden { kind: OutputKind },
    /// Expected failure without any readable golden error file.
    MissingGoldenError,
    /// Extended success fixture without a single golden artifact.
    NoGoldenArtifacts,
    /// The input file is absent, not a file, or has the wrong extension.
    InvalidInput { reason: String },
}

impl Finding {
    pub fn class(&self) -> FindingClass {
        match self {
            Finding::MissingGolden { .. }
            | Finding::MissingGoldenError
            | Finding::NoGoldenArtifacts
            | Finding::InvalidInput { .. } => FindingClass::Configuration,
            Finding::UnexpectedSuccess
            | Finding::UnexpectedExit { .. }
            | Finding::DiagnosticMismatch { .. }
            | Finding::ContentMismatch { .. }
            | Finding::MissingArtifact { .. }
            | Finding::UnexpectedArtifact { .. } => FindingClass::Mismatch,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::UnexpectedSuccess => write!(f, "expected failure but tool succeeded"),
            Finding::UnexpectedExit { exit_code, stderr } => {
                write!(f, "tool failed unexpectedly (exit code {})\n\n{}", exit_code, stderr)
            }
            Finding::DiagnosticMismatch { got, expected } => write!(
                f,
                "error output does not match expected.\n\nGot: {}\n\nExpected: {}",
                got, expected
            ),
            Finding::ContentMismatch { kind, got, expected } => write!(
                f,
                "output `{}` does not match expected content.\n\nGot: {}\n\nExpected: {}",
                kind, got, expected
            ),
            Finding::MissingArtifact { kind } => write!(f, "expected artifact missing: {}", kind),
            Finding::UnexpectedArtifact { kind } => write!(f, "unexpected unverified artifact: {}", kind),
            Finding::MissingGolden { kind } => write!(f, "golden file {} does not exist", kind.golden_file()),
            Finding::MissingGoldenError => write!(
                f,
                "fixture expects failure but golden error file {} does not exist",
                GOLDEN_ERROR_FILE
            ),
            Finding::NoGoldenArtifacts => write!(f, "fixture has no golden artifact of any kind"),
            Finding::InvalidInput { reason } => write!(f, "invalid input: {}", reason),
        }
    }
}

/// Outcome of verifying one fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(Vec<Finding>),
}

impl Verdict {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        if findings.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail(findings)
        }
    }

    pub fn fail(finding: Finding) -> Self {
        Verdict::Fail(vec![finding])
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn findings(&self) -> &[Finding] {
        match self {
            Verdict::Pass => &[],
            Verdict::Fail(findings) => findings,
        }
    }

    /// Whether any finding blames the fixture rather than the tool.
    pub fn has_configuration_error(&self) -> bool {
        self.findings()
            .iter()
            .any(|f| f.class() == FindingClass::Configuration)
    }
}

/// Judge one fixture run.
#[tracing::instrument(skip_all, fields(fixture = %fixture.identity, exit_code = result.exit_code))]
pub fn verify(fixture: &Fixture, result: &ExecutionResult) -> HarnessResult<Verdict> {
    let findings = match fixture.outcome {
        OutcomeKind::ExpectFailure => verify_failure(fixture, result)?,
        OutcomeKind::ExpectSuccess => verify_success(fixture, result)?,
    };
    Ok(Verdict::from_findings(findings))
}

fn verify_failure(fixture: &Fixture, result: &ExecutionResult) -> HarnessResult<Vec<Finding>> {
    if result.succeeded() {
        return Ok(vec![Finding::UnexpectedSuccess]);
    }

    let golden = match &fixture.golden_error {
        Some(path) => read_text_if_exists(path)?,
        None => None,
    };
    let Some(golden) = golden else {
        return Ok(vec![Finding::MissingGoldenError]);
    };

    let expected = text::normalize_diagnostic(&text::substitute_placeholders(
        &golden,
        &fixture.placeholder_values(),
    ));
    let got = text::normalize_diagnostic(&result.stderr_text());

    if got == expected {
        Ok(Vec::new())
    } else {
        Ok(vec![Finding::DiagnosticMismatch { got, expected }])
    }
}

fn verify_success(fixture: &Fixture, result: &ExecutionResult) -> HarnessResult<Vec<Finding>> {
    if !result.succeeded() {
        return Ok(vec![Finding::UnexpectedExit {
            exit_code: result.exit_code,
            stderr: result.stderr_text().into_owned(),
        }]);
    }

    let goldens = fixture.load_goldens()?;
    match fixture.category {
        Category::Basic => compare_basic(fixture, &goldens),
        Category::Extended => compare_extended(fixture, &goldens),
    }
}

/// The primary artifact against its golden (both must exist), plus every secondary kind that has a golden.
///
/// A secondary golden opts that kind into comparison; a secondary artifact without a golden is not checked.
fn compare_basic(fixture: &Fixture, goldens: &GoldenArtifacts) -> HarnessResult<Vec<Finding>> {
    let kind = OutputKind::PRIMARY;
    let produced = read_text_if_exists(&fixture.produced_path(kind))?;

    let mut findings = Vec::new();
    match (goldens.get(kind), produced) {
        (Some(expected), Some(got)) => findings.extend(compare_text(kind, &got, expected)),
        (golden, produced) => {
            if golden.is_none() {
                findings.push(Finding::MissingGolden { kind });
            }
            if produced.is_none() {
                findings.push(Finding::MissingArtifact { kind });
            }
        }
    }

    for kind in goldens.kinds().filter(|k| *k != OutputKind::PRIMARY) {
        let Some(expected) = goldens.get(kind) else {
            continue;
        };
        match read_text_if_exists(&fixture.produced_path(kind))? {
            Some(got) => findings.extend(compare_text(kind, &got, expected)),
            None => findings.push(Finding::MissingArtifact { kind }),
        }
    }
    Ok(findings)
}

/// Every kind independently: golden-only and produced-only are both failures.
fn compare_extended(fixture: &Fixture, goldens: &GoldenArtifacts) -> HarnessResult<Vec<Finding>> {
    if goldens.is_empty() {
        return Ok(vec![Finding::NoGoldenArtifacts]);
    }

    let mut findings = Vec::new();
    for kind in OutputKind::ALL {
        let produced = read_text_if_exists(&fixture.produced_path(kind))?;
        match (goldens.get(kind), produced) {
            (Some(expected), Some(got)) => findings.extend(compare_text(kind, &got, expected)),
            (Some(_), None) => findings.push(Finding::MissingArtifact { kind }),
            (None, Some(_)) => findings.push(Finding::UnexpectedArtifact { kind }),
            (None, None) => {}
        }
    }
    Ok(findings)
}

fn compare_text(kind: OutputKind, got: &str, expected: &str) -> Option<Finding> {
    if text::artifacts_match(got, expected) {
        return None;
    }
    Some(Finding::ContentMismatch {
        kind,
        got: text::trim_artifact(got).to_string(),
        expected: text::trim_artifact(expected).to_string(),
    })
}
