//! Text normalization shared by every comparison the harness makes.
//!
//! Two comparison shapes exist:
//! - **artifacts**: only leading/trailing whitespace is insignificant; interior content, including interior
//!   whitespace and line endings, must match byte for byte.
//! - **diagnostics**: golden placeholder tokens are substituted first, then every path separator becomes `/`, then
//!   edge whitespace is trimmed.

use crate::golden::{PLACEHOLDERS, PlaceholderValues};

/// Canonical path separator used in normalized diagnostics.
pub const CANONICAL_SEPARATOR: char = '/';

/// Replace every placeholder token in `golden` with its resolved value.
///
/// ## Examples
/// ```rust
/// use asmgold_core::golden::PlaceholderValues;
/// use asmgold_core::text::substitute_placeholders;
///
/// let values = PlaceholderValues {
///     input_path: "/abs/case/test.as".to_string(),
///     input_base: "/abs/case/test".to_string(),
///     cases_root: "/abs".to_string(),
/// };
/// assert_eq!(
///     substitute_placeholders("Unknown symbol at {TEST_AS}:4", &values),
///     "Unknown symbol at /abs/case/test.as:4"
/// );
/// ```
pub fn substitute_placeholders(golden: &str, values: &PlaceholderValues) -> String {
    // Single left-to-right pass: substituted values are never rescanned for tokens.
    let mut out = String::with_capacity(golden.len());
    let mut rest = golden;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match PLACEHOLDERS.iter().find(|p| tail.starts_with(p.canonical)) {
            Some(placeholder) => {
                out.push_str(values.value_for(placeholder.id));
                rest = &tail[placeholder.canonical.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Rewrite every path separator to [`CANONICAL_SEPARATOR`].
pub fn normalize_separators(text: &str) -> String {
    text.replace('\\', "/")
}

/// Normalize a diagnostic text (separators, then edge whitespace).
///
/// Placeholder substitution is not part of this step: it only applies to golden texts.
pub fn normalize_diagnostic(text: &str) -> String {
    normalize_separators(text).trim().to_string()
}

/// Trim the insignificant edge whitespace of an artifact.
pub fn trim_artifact(text: &str) -> &str {
    text.trim()
}

/// Return whether two artifacts are equal once edge whitespace is ignored.
pub fn artifacts_match(got: &str, expected: &str) -> bool {
    trim_artifact(got) == trim_artifact(expected)
}
