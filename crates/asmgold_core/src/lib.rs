//! Provide the shared, pure vocabulary of the asmgold conformance harness.
//!
//! This crate is intentionally small and dependency-light. It holds the pieces of the fixture contract that every
//! layer of the harness must agree on:
//! - which output kinds the assembler can produce and how their golden files are named,
//! - which golden-error file names classify a fixture as an expected failure,
//! - which placeholder tokens golden error texts may contain,
//! - how texts are normalized before they are compared.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no harness-specific types.
//! - Callers work with stable ids (`OutputKind`, `PlaceholderId`) and look up spellings via registry tables instead of
//!   scattering string literals through the harness.

pub mod artifacts;
pub mod golden;
pub mod registry;
pub mod text;

pub use artifacts::OutputKind;
pub use golden::PlaceholderId;
