//! Golden-file conformance harness
//!
//! ## Modules
//!
//! - `discovery` - Walk the fixture tree in deterministic order
//! - `fixture` - One test case and its goldens
//! - `exec` - Invoke the tool under test
//! - `verify` - Judge a run against the goldens
//! - `isolation` - Clear generated artifacts around every run
//! - `build` - Build the tool before the suite
//! - `runner` - Drive a suite and report verdicts
//! - `report` - Console and JSON reporters

pub mod build;
pub mod discovery;
pub mod exec;
pub mod fixture;
pub mod isolation;
pub mod report;
pub mod runner;
pub mod verify;

pub use build::ensure_built;
pub use discovery::Discovery;
pub use exec::{ExecutionResult, ProcessExecutor, ToolExecutor};
pub use fixture::{Category, Fixture, GoldenArtifacts, OutcomeKind};
pub use isolation::{ArtifactGuard, clear_artifacts};
pub use report::{CaseReport, CaseReporter, CaseStatus, ConsoleReporter, JsonReporter, SuiteSummary};
pub use runner::{RunOptions, run_case, run_suite};
pub use verify::{Finding, FindingClass, Verdict, verify};
