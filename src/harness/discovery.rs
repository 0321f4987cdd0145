//! Fixture discovery
//!
//! Walks a fixture tree and yields one [`Fixture`] per directory that contains an input source file, recognized by
//! its `.as` extension. Siblings are visited in file-name order, so the sequence is lexicographic by relative path
//! (component-wise) on every machine, and the generated test names are reproducible in bug reports.
//!
//! Discovery never fails: a missing root or an unreadable entry is logged and skipped, and an empty tree is a valid
//! (zero-fixture) result.

use std::fs;
use std::path::{Component, Path, PathBuf};

use asmgold_core::artifacts::{GOLDEN_STEM, INPUT_EXTENSION};
use asmgold_core::golden::GOLDEN_ERROR_FILES;
use walkdir::WalkDir;

use super::fixture::{Category, Fixture, OutcomeKind};
use crate::config::HarnessConfig;

/// Filesystem-based fixture discovery.
#[derive(Debug, Clone)]
pub struct Discovery {
    root: PathBuf,
    /// Input chosen when a directory holds several `.as` entries
    preferred_input: String,
    extended_subtree: String,
}

impl Discovery {
    pub fn new(root: impl Into<PathBuf>, input_stem: &str, extended_subtree: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            preferred_input: format!("{}.{}", input_stem, INPUT_EXTENSION),
            extended_subtree: extended_subtree.into(),
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(&config.cases_root, &config.input_stem, config.extended_subtree.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily walk the tree. Every call starts a fresh walk.
    pub fn iter(&self) -> Fixtures<'_> {
        let resolved = match self.root.canonicalize() {
            Ok(root) => Some(root),
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "fixture root not accessible; no fixtures");
                None
            }
        };
        let walker = resolved.as_ref().map(|root| {
            WalkDir::new(root)
                .min_depth(1)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
        });
        Fixtures {
            discovery: self,
            root: resolved.unwrap_or_default(),
            walker,
        }
    }

    /// Walk the whole tree eagerly.
    pub fn collect(&self) -> Vec<Fixture> {
        self.iter().collect()
    }

    /// Pick the input of `dir`: the preferred name if present, else the first `.as` entry by name.
    ///
    /// An entry stemmed like the goldens is never an input: its artifacts would overwrite them.
    fn input_in(&self, dir: &Path) -> Option<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable fixture directory");
                return None;
            }
        };
        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(INPUT_EXTENSION))
            .filter(|path| path.file_stem().and_then(|s| s.to_str()) != Some(GOLDEN_STEM))
            .collect();
        candidates.sort();

        let chosen = candidates
            .iter()
            .find(|path| path.file_name().and_then(|n| n.to_str()) == Some(self.preferred_input.as_str()))
            .or_else(|| candidates.first())?
            .clone();
        if candidates.len() > 1 {
            tracing::warn!(
                dir = %dir.display(),
                inputs = candidates.len(),
                chosen = %chosen.display(),
                "several input files in one fixture; using one"
            );
        }
        Some(chosen)
    }

    fn fixture_at(&self, root: &Path, dir: &Path) -> Option<Fixture> {
        let input_path = self.input_in(dir)?;

        let relative = dir.strip_prefix(root).ok()?;
        let components: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let golden_error = GOLDEN_ERROR_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file());
        let outcome = if golden_error.is_some() {
            OutcomeKind::ExpectFailure
        } else {
            OutcomeKind::ExpectSuccess
        };
        let category = if components.iter().any(|c| *c == self.extended_subtree) {
            Category::Extended
        } else {
            Category::Basic
        };

        Some(Fixture {
            identity: components.join("/"),
            dir: dir.to_path_buf(),
            input_path,
            outcome,
            category,
            cases_root: root.to_path_buf(),
            golden_error,
        })
    }
}

/// Lazy fixture sequence produced by [`Discovery::iter`].
pub struct Fixtures<'a> {
    discovery: &'a Discovery,
    root: PathBuf,
    walker: Option<walkdir::IntoIter>,
}

impl Iterator for Fixtures<'_> {
    type Item = Fixture;

    fn next(&mut self) -> Option<Fixture> {
        let walker = self.walker.as_mut()?;
        for entry in walker.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable fixture tree entry");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if let Some(fixture) = self.discovery.fixture_at(&self.root, entry.path()) {
                tracing::debug!(fixture = %fixture.identity, outcome = ?fixture.outcome, "discovered fixture");
                return Some(fixture);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asmgold_core::artifacts::OutputKind;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn discovery(root: &Path) -> Discovery {
        Discovery::new(root, "test", "extended")
    }

    fn identities(fixtures: &[Fixture]) -> Vec<&str> {
        fixtures.iter().map(|f| f.identity.as_str()).collect()
    }

    // ========================================
    // Ordering and selection
    // ========================================

    #[test]
    fn test_fixtures_are_sorted_by_relative_path() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "zeta/test.as");
        touch(tmp.path(), "alpha/two/test.as");
        touch(tmp.path(), "alpha/one/test.as");
        touch(tmp.path(), "beta/test.as");

        let fixtures = discovery(tmp.path()).collect();
        assert_eq!(identities(&fixtures), vec!["alpha/one", "alpha/two", "beta", "zeta"]);
    }

    #[test]
    fn test_directories_without_input_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "notes/README.md");
        touch(tmp.path(), "goldens_only/expected.am");
        touch(tmp.path(), "case/expected.am");
        touch(tmp.path(), "case/test.as");

        let fixtures = discovery(tmp.path()).collect();
        assert_eq!(identities(&fixtures), vec!["case"]);
    }

    // ========================================
    // Input selection
    // ========================================

    #[test]
    fn test_any_as_file_is_an_input() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "prog/prog.as");
        touch(tmp.path(), "prog/expected.am");

        let fixtures = discovery(tmp.path()).collect();
        assert_eq!(identities(&fixtures), vec!["prog"]);
        assert!(fixtures[0].input_path.ends_with("prog/prog.as"));
        assert!(fixtures[0].produced_path(OutputKind::Expanded).ends_with("prog/prog.am"));
        assert!(fixtures[0].input_base().ends_with("prog/prog"));
    }

    #[test]
    fn test_preferred_input_wins_over_others() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "multi/aaa.as");
        touch(tmp.path(), "multi/test.as");
        touch(tmp.path(), "multi/zzz.as");

        let fixtures = discovery(tmp.path()).collect();
        assert!(fixtures[0].input_path.ends_with("multi/test.as"));
    }

    #[test]
    fn test_first_input_by_name_without_preferred() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "multi/main.as");
        touch(tmp.path(), "multi/lib.as");

        let fixtures = discovery(tmp.path()).collect();
        assert_eq!(fixtures.len(), 1);
        assert!(fixtures[0].input_path.ends_with("multi/lib.as"));
    }

    #[test]
    fn test_golden_stem_is_never_an_input() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "only_golden/expected.as");
        touch(tmp.path(), "mixed/expected.as");
        touch(tmp.path(), "mixed/prog.as");

        let fixtures = discovery(tmp.path()).collect();
        assert_eq!(identities(&fixtures), vec!["mixed"]);
        assert!(fixtures[0].input_path.ends_with("mixed/prog.as"));
    }

    #[test]
    fn test_root_itself_is_not_a_fixture() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "test.as");
        assert!(discovery(tmp.path()).collect().is_empty());
    }

    #[test]
    fn test_empty_and_missing_roots_yield_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(discovery(tmp.path()).collect().is_empty());
        assert!(discovery(&tmp.path().join("missing")).collect().is_empty());
    }

    #[test]
    fn test_iteration_is_restartable() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a/test.as");
        touch(tmp.path(), "b/test.as");

        let discovery = discovery(tmp.path());
        let first: Vec<String> = discovery.iter().map(|f| f.identity).collect();
        let second: Vec<String> = discovery.iter().map(|f| f.identity).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    // ========================================
    // Classification
    // ========================================

    #[test]
    fn test_golden_error_marks_expected_failure() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "bad/test.as");
        touch(tmp.path(), "bad/expected.error");
        touch(tmp.path(), "good/test.as");
        touch(tmp.path(), "good/expected.am");

        let fixtures = discovery(tmp.path()).collect();
        assert_eq!(fixtures[0].outcome, OutcomeKind::ExpectFailure);
        assert_eq!(fixtures[1].outcome, OutcomeKind::ExpectSuccess);
        assert!(fixtures[1].golden_error.is_none());
    }

    #[test]
    fn test_golden_error_wins_over_success_golden() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "both/test.as");
        touch(tmp.path(), "both/expected.am");
        touch(tmp.path(), "both/expected.error");

        let fixtures = discovery(tmp.path()).collect();
        assert_eq!(fixtures[0].outcome, OutcomeKind::ExpectFailure);
    }

    #[test]
    fn test_legacy_golden_error_name_is_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "legacy/test.as");
        touch(tmp.path(), "legacy/expected.err");

        let fixtures = discovery(tmp.path()).collect();
        assert_eq!(fixtures[0].outcome, OutcomeKind::ExpectFailure);
        assert!(fixtures[0].golden_error.as_ref().unwrap().ends_with("expected.err"));
    }

    #[test]
    fn test_canonical_golden_error_name_is_preferred() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "dual/test.as");
        touch(tmp.path(), "dual/expected.err");
        touch(tmp.path(), "dual/expected.error");

        let fixtures = discovery(tmp.path()).collect();
        assert!(fixtures[0].golden_error.as_ref().unwrap().ends_with("expected.error"));
    }

    #[test]
    fn test_extended_subtree_selects_extended_category() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "extended/entries/test.as");
        touch(tmp.path(), "macros/test.as");
        touch(tmp.path(), "macros/extended-ish/test.as");

        let fixtures = discovery(tmp.path()).collect();
        let categories: Vec<(&str, Category)> = fixtures.iter().map(|f| (f.identity.as_str(), f.category)).collect();
        assert_eq!(
            categories,
            vec![
                ("extended/entries", Category::Extended),
                ("macros", Category::Basic),
                ("macros/extended-ish", Category::Basic),
            ]
        );
    }

    #[test]
    fn test_input_paths_are_absolute() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "case/test.as");

        let fixtures = discovery(tmp.path()).collect();
        assert!(fixtures[0].input_path.is_absolute());
        assert_eq!(fixtures[0].cases_root, tmp.path().canonicalize().unwrap());
    }
}
