//! Harness configuration
//!
//! Every location the harness touches is an explicit value here, never a module-level constant, so a run can be
//! pointed at any fixture tree and any build of the tool.
//!
//! Precedence: `HarnessConfig::default()` < `ASMGOLD_*` environment variables < CLI flags.

use std::fmt;
use std::path::{Path, PathBuf};

use asmgold_core::artifacts::DEFAULT_INPUT_STEM;

/// Default fixture tree, relative to the working directory.
pub const DEFAULT_CASES_DIR: &str = "tests/cases";

/// Default tool executable, relative to the project directory.
pub const DEFAULT_TOOL: &str = "./assembler";

/// Reserved subtree name selecting the extended comparison policy.
pub const DEFAULT_EXTENDED_SUBTREE: &str = "extended";

/// Build descriptor that must exist in the project directory.
pub const DEFAULT_BUILD_DESCRIPTOR: &str = "Makefile";

pub const CASES_ENV: &str = "ASMGOLD_CASES";
pub const TOOL_ENV: &str = "ASMGOLD_TOOL";
pub const PROJECT_ENV: &str = "ASMGOLD_PROJECT";

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root of the fixture tree
    pub cases_root: PathBuf,
    /// Tool executable; relative paths are resolved against the project directory
    pub tool: PathBuf,
    /// Path component that marks a fixture as extended
    pub extended_subtree: String,
    /// Input stem preferred when a fixture directory holds several `.as` files
    pub input_stem: String,
    /// How to build the tool before the run
    pub build: BuildConfig,
}

/// Build precondition configuration
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory containing the build descriptor; build steps run here
    pub project_dir: PathBuf,
    /// File name of the build descriptor
    pub descriptor: String,
    /// Commands run in order; the first failing one aborts the build
    pub steps: Vec<BuildStep>,
}

/// One build command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStep {
    pub program: String,
    pub args: Vec<String>,
}

impl BuildStep {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            descriptor: DEFAULT_BUILD_DESCRIPTOR.to_string(),
            steps: vec![BuildStep::new("make", &["clean"]), BuildStep::new("make", &[])],
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            cases_root: PathBuf::from(DEFAULT_CASES_DIR),
            tool: PathBuf::from(DEFAULT_TOOL),
            extended_subtree: DEFAULT_EXTENDED_SUBTREE.to_string(),
            input_stem: DEFAULT_INPUT_STEM.to_string(),
            build: BuildConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings overlaid with the `ASMGOLD_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an environment-like lookup. Empty values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(cases) = get(CASES_ENV) {
            self.cases_root = PathBuf::from(cases);
        }
        if let Some(tool) = get(TOOL_ENV) {
            self.tool = PathBuf::from(tool);
        }
        if let Some(project) = get(PROJECT_ENV) {
            self.build.project_dir = PathBuf::from(project);
        }
        self
    }

    /// Set the fixture tree root
    pub fn with_cases_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cases_root = root.into();
        self
    }

    /// Set the tool executable
    pub fn with_tool(mut self, tool: impl Into<PathBuf>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Set the project directory (build descriptor location)
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build.project_dir = dir.into();
        self
    }

    /// Set the reserved subtree name of extended fixtures
    pub fn with_extended_subtree(mut self, name: impl Into<String>) -> Self {
        self.extended_subtree = name.into();
        self
    }

    /// Set the input file stem
    pub fn with_input_stem(mut self, stem: impl Into<String>) -> Self {
        self.input_stem = stem.into();
        self
    }

    /// Tool path as it will be spawned.
    ///
    /// Fixtures run with their own directory as working directory, so a relative tool path is anchored to the
    /// project directory and made absolute here.
    pub fn resolved_tool(&self) -> PathBuf {
        if self.tool.is_absolute() {
            return self.tool.clone();
        }
        let joined = self.build.project_dir.join(&self.tool);
        std::path::absolute(&joined).unwrap_or(joined)
    }

    pub fn project_dir(&self) -> &Path {
        &self.build.project_dir
    }
}
