//! End-to-end runs against a real subprocess
//!
//! A small shell script plays the assembler: it copies `<base>.as` to `<base>.am`, and rejects inputs containing
//! `bad` with a diagnostic that names the input path.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use asmgold::config::{BuildStep, HarnessConfig};
use asmgold::harness::{Discovery, JsonReporter, ProcessExecutor, RunOptions, ensure_built, run_suite};

const TOOL_SCRIPT: &str = r#"#!/bin/sh
base="$1"
if grep -q bad "$base.as"; then
    echo "Syntax error in $base.as:1" >&2
    exit 3
fi
cp "$base.as" "$base.am"
echo "assembled $base"
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn install_tool(project: &Path) -> PathBuf {
    let tool = project.join("assembler");
    fs::write(&tool, TOOL_SCRIPT).unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
    tool
}

#[test]
fn suite_against_shell_tool() {
    let project = tempfile::tempdir().unwrap();
    install_tool(project.path());
    let cases = project.path().join("cases");

    write(&cases, "copy/test.as", "mov r1, r2\n");
    write(&cases, "copy/expected.am", "mov r1, r2\n");
    write(&cases, "reject/test.as", "bad\n");
    write(&cases, "reject/expected.error", "Syntax error in {TEST}.as:1");
    write(&cases, "wrong/test.as", "inc r1\n");
    write(&cases, "wrong/expected.am", "dec r1\n");

    // Relative tool path, anchored at the project dir
    let config = HarnessConfig::default()
        .with_project_dir(project.path())
        .with_cases_root(&cases)
        .with_tool("./assembler");
    let executor = ProcessExecutor::from_config(&config);
    let mut reporter = JsonReporter::new(Vec::new());

    let summary = run_suite(
        &executor,
        Discovery::from_config(&config).iter(),
        &RunOptions::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!((summary.total, summary.passed, summary.failed), (3, 2, 1));

    let out = String::from_utf8(reporter.into_inner()).unwrap();
    let events: Vec<serde_json::Value> = out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    let statuses: Vec<(&str, &str)> = events
        .iter()
        .filter(|e| e["event"] == "case")
        .map(|e| (e["fixture"].as_str().unwrap(), e["status"].as_str().unwrap()))
        .collect();
    assert_eq!(
        statuses,
        vec![("copy", "passed"), ("reject", "passed"), ("wrong", "failed")]
    );

    for dir in ["copy", "reject", "wrong"] {
        assert!(!cases.join(dir).join("test.am").exists(), "{dir}/test.am left behind");
    }
}

#[test]
fn unexpected_exit_carries_stderr() {
    let project = tempfile::tempdir().unwrap();
    let tool = install_tool(project.path());
    let cases = project.path().join("cases");
    write(&cases, "oops/test.as", "bad\n");
    write(&cases, "oops/expected.am", "bad\n");

    let fixtures = Discovery::new(&cases, "test", "extended").collect();
    let verdict = asmgold::harness::run_case(&ProcessExecutor::new(tool), &fixtures[0]).unwrap();
    let message = verdict.findings()[0].to_string();
    assert!(message.starts_with("tool failed unexpectedly (exit code 3)"), "{message}");
    assert!(message.contains("Syntax error in"), "{message}");
}

#[test]
fn build_then_run() {
    let project = tempfile::tempdir().unwrap();
    fs::write(project.path().join("Makefile"), "all:\n").unwrap();
    let mut config = HarnessConfig::default().with_project_dir(project.path());
    // Stand-in for `make`: the build installs the tool
    let script = TOOL_SCRIPT.replace('\'', r"'\''");
    config.build.steps = vec![
        BuildStep::new("sh", &["-c", "rm -f assembler"]),
        BuildStep::new(
            "sh",
            &["-c", &format!("printf '%s' '{script}' > assembler && chmod 755 assembler")],
        ),
    ];

    ensure_built(&config.build).unwrap();
    assert!(config.resolved_tool().is_file());
}
