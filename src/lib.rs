#![forbid(unsafe_code)]
//! asmgold: golden-file conformance harness for an assembler CLI
//!
//! The harness discovers fixture directories, runs the external tool once per fixture, and compares its exit
//! status, diagnostics, and generated artifacts against the golden files stored next to the input. The tool itself
//! is opaque: only its observable behavior is checked.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Cleanup**: [`harness::ArtifactGuard`] panics from `Drop` when it cannot delete an artifact and no panic is
//!   already unwinding. Stale artifacts would poison every later comparison, so the run must not continue.

pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod version;

pub use config::{BuildConfig, BuildStep, HarnessConfig};
pub use error::{HarnessError, HarnessResult};
pub use harness::{Discovery, Fixture, ProcessExecutor, RunOptions, ToolExecutor, Verdict, run_suite};
