//! Fixture model: one discovered test case.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use asmgold_core::artifacts::{INPUT_EXTENSION, OutputKind};
use asmgold_core::golden::PlaceholderValues;

use crate::error::{HarnessError, HarnessResult};

/// Expected outcome of running the tool on a fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    ExpectSuccess,
    ExpectFailure,
}

/// Artifact comparison policy of a success fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// The primary expanded output must match; other kinds are compared only when they have a golden.
    Basic,
    /// Every output kind with a golden counterpart is compared, and un-golden outputs are rejected.
    Extended,
}

/// A discovered test case
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Directory relative to the fixture root, `/`-joined
    pub identity: String,
    /// Absolute fixture directory
    pub dir: PathBuf,
    /// Absolute path of the input file
    pub input_path: PathBuf,
    pub outcome: OutcomeKind,
    pub category: Category,
    /// Resolved fixture root the identity is relative to
    pub cases_root: PathBuf,
    /// Golden error file chosen during classification (canonical name preferred)
    pub golden_error: Option<PathBuf>,
}

impl Fixture {
    /// Stable per-case test name, e.g. `test_000000003_macro_nested`.
    pub fn test_name(&self, index: usize) -> String {
        format!("test_{:09}_{}", index, self.identity.replace(['/', ' '], "_"))
    }

    /// Input path with its extension stripped (the tool's positional argument).
    pub fn input_base(&self) -> PathBuf {
        self.input_path.with_extension("")
    }

    fn input_stem(&self) -> String {
        self.input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Where the tool writes the artifact of `kind`: `<dir>/<stem>.<ext>`.
    pub fn produced_path(&self, kind: OutputKind) -> PathBuf {
        self.dir.join(format!("{}.{}", self.input_stem(), kind.extension()))
    }

    /// Where the golden artifact of `kind` lives.
    pub fn golden_path(&self, kind: OutputKind) -> PathBuf {
        self.dir.join(kind.golden_file())
    }

    /// Check that the input is a regular file with the recognized extension.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate_input(&self) -> Result<(), String> {
        let path = &self.input_path;
        if !path.exists() {
            return Err(format!("input file {} does not exist", path.display()));
        }
        if !path.is_file() {
            return Err(format!("input path {} is not a file", path.display()));
        }
        if path.extension().and_then(|e| e.to_str()) != Some(INPUT_EXTENSION) {
            return Err(format!(
                "input file {} must have a .{} extension",
                path.display(),
                INPUT_EXTENSION
            ));
        }
        Ok(())
    }

    /// Values substituted for the golden-error placeholder tokens.
    pub fn placeholder_values(&self) -> PlaceholderValues {
        PlaceholderValues {
            input_path: self.input_path.to_string_lossy().into_owned(),
            input_base: self.input_base().to_string_lossy().into_owned(),
            cases_root: self.cases_root.to_string_lossy().into_owned(),
        }
    }

    /// Load every golden artifact present beside the input.
    ///
    /// Goldens are read at verification time, never during discovery.
    pub fn load_goldens(&self) -> HarnessResult<GoldenArtifacts> {
        let mut artifacts = BTreeMap::new();
        for kind in OutputKind::ALL {
            if let Some(text) = read_text_if_exists(&self.golden_path(kind))? {
                artifacts.insert(kind, text);
            }
        }
        Ok(GoldenArtifacts { artifacts })
    }
}

/// Golden artifact texts of one fixture, keyed by output kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoldenArtifacts {
    artifacts: BTreeMap<OutputKind, String>,
}

impl GoldenArtifacts {
    pub fn get(&self, kind: OutputKind) -> Option<&str> {
        self.artifacts.get(&kind).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = OutputKind> + '_ {
        self.artifacts.keys().copied()
    }
}

/// Read a text file, treating "not found" as absence.
///
/// Bytes that are not valid UTF-8 are replaced, so a binary-ish artifact still compares (and fails) as text.
pub(crate) fn read_text_if_exists(path: &Path) -> HarnessResult<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(HarnessError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
