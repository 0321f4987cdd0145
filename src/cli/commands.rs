//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io;

use crate::config::HarnessConfig;
use crate::harness::{
    CaseReporter, Category, ConsoleReporter, Discovery, Fixture, JsonReporter, OutcomeKind, ProcessExecutor,
    RunOptions, ensure_built, run_suite,
};

use super::{CliError, CliResult, ExitCode, ReportFormat};

/// Reporter for the requested output format. JSON lines go to stdout.
pub fn reporter_for(format: ReportFormat, verbose: bool) -> Box<dyn CaseReporter> {
    match format {
        ReportFormat::Console => Box::new(ConsoleReporter::new(verbose)),
        ReportFormat::Json => Box::new(JsonReporter::new(io::stdout().lock())),
    }
}

/// Build (unless skipped), discover, run, and report.
pub fn run_cases(
    config: &HarnessConfig,
    options: &RunOptions,
    build: bool,
    reporter: &mut dyn CaseReporter,
) -> CliResult<ExitCode> {
    if build {
        ensure_built(&config.build)?;
    } else {
        tracing::info!("build step skipped");
    }

    let discovery = Discovery::from_config(config);
    let executor = ProcessExecutor::from_config(config);
    tracing::info!(
        cases = %discovery.root().display(),
        tool = %executor.program().display(),
        "starting suite"
    );

    let summary = run_suite(&executor, discovery.iter(), options, reporter)?;

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Failures were already reported; exit non-zero without another message
        Err(CliError::new("", ExitCode::FAILURE))
    }
}

/// Print every discovered case with its classification.
pub fn list_cases(config: &HarnessConfig) -> CliResult<ExitCode> {
    let fixtures = Discovery::from_config(config).collect();
    if fixtures.is_empty() {
        eprintln!("No cases collected in {}", config.cases_root.display());
        return Ok(ExitCode::SUCCESS);
    }
    for line in listing(&fixtures) {
        println!("{}", line);
    }
    Ok(ExitCode::SUCCESS)
}

/// Run only the build precondition.
pub fn build_tool(config: &HarnessConfig) -> CliResult<ExitCode> {
    ensure_built(&config.build)?;
    println!("build succeeded in {}", config.project_dir().display());
    Ok(ExitCode::SUCCESS)
}

fn listing(fixtures: &[Fixture]) -> Vec<String> {
    fixtures
        .iter()
        .enumerate()
        .map(|(index, fixture)| {
            let category = match fixture.category {
                Category::Basic => "basic",
                Category::Extended => "extended",
            };
            let outcome = match fixture.outcome {
                OutcomeKind::ExpectSuccess => "success",
                OutcomeKind::ExpectFailure => "failure",
            };
            format!("{}  [{}, expect {}]", fixture.test_name(index), category, outcome)
        })
        .collect()
}
