//! Suite reporting
//!
//! ## CaseReporter Trait
//!
//! The runner never prints. It drives a [`CaseReporter`], which decides how progress and verdicts are shown.
//! [`ConsoleReporter`] is the default pytest-style terminal output; [`JsonReporter`] emits one JSON object per line
//! for CI tooling.

use std::io::Write;
use std::time::Duration;

use serde_json::json;

use super::fixture::Fixture;
use super::verify::{FindingClass, Verdict};

// ============================================================================
// Reporter Trait
// ============================================================================

/// Trait for reporting suite execution.
pub trait CaseReporter {
    /// Called once, after discovery and filtering, with the number of cases that will run
    fn on_collection_complete(&mut self, case_count: usize);

    /// Called before the tool is invoked for a case
    fn on_case_start(&mut self, _name: &str, _fixture: &Fixture) {}

    /// Called when a case has a verdict
    fn on_case_complete(&mut self, report: &CaseReport);

    /// Called when the suite has finished (or stopped early)
    fn on_run_complete(&mut self, summary: &SuiteSummary);
}

/// Result of one case, as handed to reporters
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    pub identity: String,
    pub verdict: Verdict,
    pub duration: Duration,
}

impl CaseReport {
    pub fn status(&self) -> CaseStatus {
        match &self.verdict {
            Verdict::Pass => CaseStatus::Passed,
            verdict if verdict.has_configuration_error() => CaseStatus::Config,
            Verdict::Fail(_) => CaseStatus::Failed,
        }
    }
}

/// Display status of a finished case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed,
    /// Failed because the fixture itself is broken
    Config,
}

impl CaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Passed => "passed",
            CaseStatus::Failed => "failed",
            CaseStatus::Config => "config",
        }
    }
}

/// Summary of a suite run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    /// Failed cases, including those counted in `config_errors`
    pub failed: usize,
    pub config_errors: usize,
    pub duration: Duration,
}

impl SuiteSummary {
    pub fn record(&mut self, report: &CaseReport) {
        self.total += 1;
        match report.status() {
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Failed => self.failed += 1,
            CaseStatus::Config => {
                self.failed += 1;
                self.config_errors += 1;
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

// ============================================================================
// Console
// ============================================================================

/// Default console reporter (pytest-style)
#[derive(Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
    failures: Vec<CaseReport>,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            failures: Vec::new(),
        }
    }

    fn status_label(report: &CaseReport, verbose: bool) -> String {
        let label = match report.status() {
            CaseStatus::Passed => "\x1b[32mPASSED\x1b[0m",
            CaseStatus::Failed => "\x1b[31mFAILED\x1b[0m",
            CaseStatus::Config => "\x1b[33mCONFIG\x1b[0m",
        };
        if verbose {
            format!("{} ({:.0}ms)", label, report.duration.as_millis())
        } else {
            label.to_string()
        }
    }
}

impl CaseReporter for ConsoleReporter {
    fn on_collection_complete(&mut self, case_count: usize) {
        if case_count == 0 {
            eprintln!("No cases collected");
            return;
        }
        println!("\x1b[1m=================== asmgold session starts ===================\x1b[0m");
        println!("collected {} case(s)", case_count);
        println!();
    }

    fn on_case_start(&mut self, name: &str, fixture: &Fixture) {
        if self.verbose {
            println!("{} [{}] ...", name, fixture.input_path.display());
        }
    }

    fn on_case_complete(&mut self, report: &CaseReport) {
        println!("{} {}", report.name, Self::status_label(report, self.verbose));
        if !report.verdict.is_pass() {
            self.failures.push(report.clone());
        }
    }

    fn on_run_complete(&mut self, summary: &SuiteSummary) {
        if !self.failures.is_empty() {
            println!();
            println!("\x1b[1;31m=================== FAILURES ===================\x1b[0m");
            for report in &self.failures {
                println!();
                println!("\x1b[1m___________ {} ___________\x1b[0m", report.name);
                for finding in report.verdict.findings() {
                    let marker = match finding.class() {
                        FindingClass::Configuration => "\x1b[33m[config]\x1b[0m ",
                        FindingClass::Mismatch => "",
                    };
                    println!();
                    for (i, line) in finding.to_string().lines().enumerate() {
                        if i == 0 {
                            println!("    {}{}", marker, line);
                        } else {
                            println!("    {}", line);
                        }
                    }
                }
                println!();
                println!("    {}", report.identity);
            }
        }

        println!();
        let summary_color = if summary.is_success() {
            "\x1b[1;32m"
        } else {
            "\x1b[1;31m"
        };

        let mut parts = Vec::new();
        if summary.passed > 0 {
            parts.push(format!("{} passed", summary.passed));
        }
        let mismatches = summary.failed - summary.config_errors;
        if mismatches > 0 {
            parts.push(format!("{} failed", mismatches));
        }
        if summary.config_errors > 0 {
            parts.push(format!("{} misconfigured", summary.config_errors));
        }
        if parts.is_empty() {
            parts.push("no cases ran".to_string());
        }

        println!(
            "{}=================== {} in {:.2}s ===================\x1b[0m",
            summary_color,
            parts.join(", "),
            summary.duration.as_secs_f64()
        );
    }
}

// ============================================================================
// JSON lines
// ============================================================================

/// Machine-readable reporter: one JSON object per line.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, value: serde_json::Value) {
        if let Err(e) = writeln!(self.out, "{}", value) {
            tracing::error!(error = %e, "failed to write JSON report line");
        }
    }
}

impl<W: Write> CaseReporter for JsonReporter<W> {
    fn on_collection_complete(&mut self, case_count: usize) {
        self.emit(json!({ "event": "collected", "count": case_count }));
    }

    fn on_case_complete(&mut self, report: &CaseReport) {
        let findings: Vec<serde_json::Value> = report
            .verdict
            .findings()
            .iter()
            .map(|f| {
                let class = match f.class() {
                    FindingClass::Configuration => "configuration",
                    FindingClass::Mismatch => "mismatch",
                };
                json!({ "class": class, "message": f.to_string() })
            })
            .collect();
        self.emit(json!({
            "event": "case",
            "name": report.name,
            "fixture": report.identity,
            "status": report.status().as_str(),
            "duration_ms": report.duration.as_millis() as u64,
            "findings": findings,
        }));
    }

    fn on_run_complete(&mut self, summary: &SuiteSummary) {
        self.emit(json!({
            "event": "summary",
            "total": summary.total,
            "passed": summary.passed,
            "failed": summary.failed,
            "config_errors": summary.config_errors,
            "duration_ms": summary.duration.as_millis() as u64,
            "success": summary.is_success(),
        }));
        if let Err(e) = self.out.flush() {
            tracing::error!(error = %e, "failed to flush JSON report");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::verify::Finding;
    use asmgold_core::artifacts::OutputKind;

    fn report(name: &str, verdict: Verdict) -> CaseReport {
        CaseReport {
            name: name.to_string(),
            identity: name.to_string(),
            verdict,
            duration: Duration::from_millis(7),
        }
    }

    // ========================================
    // Summary accounting
    // ========================================

    #[test]
    fn test_summary_counts_config_errors_as_failures() {
        let mut summary = SuiteSummary::default();
        summary.record(&report("a", Verdict::Pass));
        summary.record(&report("b", Verdict::fail(Finding::UnexpectedSuccess)));
        summary.record(&report("c", Verdict::fail(Finding::NoGoldenArtifacts)));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.config_errors, 1);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_empty_summary_is_success() {
        assert!(SuiteSummary::default().is_success());
    }

    #[test]
    fn test_mixed_verdict_with_config_finding_is_config_status() {
        let verdict = Verdict::Fail(vec![
            Finding::MissingArtifact { kind: OutputKind::Expanded },
            Finding::MissingGolden { kind: OutputKind::Expanded },
        ]);
        assert_eq!(report("x", verdict).status(), CaseStatus::Config);
    }

    // ========================================
    // Console labels
    // ========================================

    #[test]
    fn test_console_labels() {
        let pass = report("a", Verdict::Pass);
        let config = report("b", Verdict::fail(Finding::MissingGoldenError));
        assert!(ConsoleReporter::status_label(&pass, false).contains("PASSED"));
        assert!(ConsoleReporter::status_label(&config, false).contains("CONFIG"));
        assert!(ConsoleReporter::status_label(&pass, true).ends_with("(7ms)"));
    }

    // ========================================
    // JSON lines
    // ========================================

    #[test]
    fn test_json_reporter_emits_one_object_per_line() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.on_collection_complete(2);
        reporter.on_case_complete(&report("test_000000000_ok", Verdict::Pass));
        reporter.on_case_complete(&report(
            "test_000000001_bad",
            Verdict::fail(Finding::MissingArtifact { kind: OutputKind::Object }),
        ));
        reporter.on_run_complete(&SuiteSummary {
            total: 2,
            passed: 1,
            failed: 1,
            ..SuiteSummary::default()
        });

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["event"], "collected");
        assert_eq!(lines[1]["status"], "passed");
        assert_eq!(lines[2]["status"], "failed");
        assert_eq!(lines[2]["findings"][0]["class"], "mismatch");
        assert_eq!(lines[2]["findings"][0]["message"], "expected artifact missing: ob");
        assert_eq!(lines[3]["success"], false);
    }
}
