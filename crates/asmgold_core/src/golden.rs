//! Golden-error vocabulary: classification file names and placeholder tokens.
//!
//! A fixture is an expected failure exactly when one of the golden-error files exists beside its input. The
//! canonical name wins over the legacy alias when both are present.
//!
//! Golden error texts cannot hard-code absolute paths, so they use placeholder tokens that the harness substitutes
//! with the resolved paths of the running fixture.

use crate::registry::ItemInfo;

/// Canonical golden-error file name.
pub const GOLDEN_ERROR_FILE: &str = "expected.error";

/// Legacy golden-error file name, accepted for older fixtures.
pub const LEGACY_GOLDEN_ERROR_FILE: &str = "expected.err";

/// Golden-error file names in lookup order (canonical first).
pub const GOLDEN_ERROR_FILES: &[&str] = &[GOLDEN_ERROR_FILE, LEGACY_GOLDEN_ERROR_FILE];

/// Stable identifier for golden-error placeholder tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderId {
    /// Resolved absolute input path, with extension.
    InputPath,
    /// Resolved absolute input path, without extension.
    InputBase,
    /// Resolved root of the fixture tree.
    CasesRoot,
}

/// Metadata entry for a placeholder token.
pub type PlaceholderInfo = ItemInfo<PlaceholderId>;

/// Registry of placeholder tokens.
pub const PLACEHOLDERS: &[PlaceholderInfo] = &[
    info(
        PlaceholderId::InputPath,
        "{TEST_AS}",
        "Absolute path of the fixture input, e.g. `/abs/cases/macro/test.as`.",
    ),
    info(
        PlaceholderId::InputBase,
        "{TEST}",
        "Absolute path of the fixture input without its extension.",
    ),
    info(
        PlaceholderId::CasesRoot,
        "{CASES}",
        "Absolute path of the fixture tree root.",
    ),
];

/// Resolve a token spelling to its placeholder id.
pub fn from_str(token: &str) -> Option<PlaceholderId> {
    PLACEHOLDERS.iter().find(|p| p.matches(token)).map(|p| p.id)
}

/// Return the token spelling of a placeholder.
pub fn as_str(id: PlaceholderId) -> &'static str {
    match id {
        PlaceholderId::InputPath => PLACEHOLDERS[0].canonical,
        PlaceholderId::InputBase => PLACEHOLDERS[1].canonical,
        PlaceholderId::CasesRoot => PLACEHOLDERS[2].canonical,
    }
}

/// Resolved values for every placeholder of one fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderValues {
    pub input_path: String,
    pub input_base: String,
    pub cases_root: String,
}

impl PlaceholderValues {
    /// Return the value substituted for `id`.
    pub fn value_for(&self, id: PlaceholderId) -> &str {
        match id {
            PlaceholderId::InputPath => &self.input_path,
            PlaceholderId::InputBase => &self.input_base,
            PlaceholderId::CasesRoot => &self.cases_root,
        }
    }
}

const fn info(id: PlaceholderId, token: &'static str, description: &'static str) -> PlaceholderInfo {
    ItemInfo {
        id,
        canonical: token,
        aliases: &[],
        description,
    }
}
