//! Layering guardrail: the vocabulary crate stays pure.
//!
//! `asmgold_core` is shared by the harness and the fuzz target and must not grow IO or third-party dependencies.
//! This test scans its `Cargo.toml` and fails if a `[dependencies]` table appears.

#[test]
fn vocabulary_crate_has_no_dependencies() {
    let manifest = include_str!("../crates/asmgold_core/Cargo.toml");

    for raw_line in manifest.lines() {
        // Strip inline comments for robustness.
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line == "[dependencies]" || line.starts_with("[dependencies.") {
            panic!("`asmgold_core` must not declare [dependencies]; keep IO in the `asmgold` crate");
        }
    }
}

#[test]
fn vocabulary_sources_do_not_touch_the_filesystem() {
    let sources = [
        include_str!("../crates/asmgold_core/src/lib.rs"),
        include_str!("../crates/asmgold_core/src/artifacts.rs"),
        include_str!("../crates/asmgold_core/src/golden.rs"),
        include_str!("../crates/asmgold_core/src/registry.rs"),
        include_str!("../crates/asmgold_core/src/text.rs"),
    ];
    for source in sources {
        assert!(!source.contains("std::fs"), "asmgold_core must stay IO-free");
        assert!(!source.contains("std::process"), "asmgold_core must stay IO-free");
    }
}
