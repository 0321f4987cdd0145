//! Output-kind vocabulary registry.
//!
//! The assembler turns `<base>.as` into up to four files that share the input's basename. Each kind has a fixed
//! extension and a fixed golden file name (`expected.<ext>`) inside the fixture directory.
//!
//! ## Examples
//! ```rust
//! use asmgold_core::artifacts::{self, OutputKind};
//!
//! assert_eq!(artifacts::from_str("ob"), Some(OutputKind::Object));
//! assert_eq!(artifacts::from_str(".ent"), Some(OutputKind::Entries));
//! assert_eq!(artifacts::as_str(OutputKind::Expanded), "am");
//! assert_eq!(artifacts::golden_file(OutputKind::Externals), "expected.ext");
//! ```

use crate::registry::ItemInfo;

/// Extension of the assembler's source input (without the leading dot).
pub const INPUT_EXTENSION: &str = "as";

/// Input stem preferred when a fixture directory holds several `.as` files (`test.as`).
pub const DEFAULT_INPUT_STEM: &str = "test";

/// Stem shared by every golden file in a fixture directory.
pub const GOLDEN_STEM: &str = "expected";

/// Stable identifier for the files the assembler can produce.
///
/// The set is closed: cleanup and the extended comparison policy iterate [`OutputKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputKind {
    /// Macro-expanded source (`.am`), the primary artifact.
    Expanded,
    /// Object encoding (`.ob`).
    Object,
    /// Entry-symbol table (`.ent`).
    Entries,
    /// External-reference table (`.ext`).
    Externals,
}

impl OutputKind {
    /// Every output kind, in registry order.
    pub const ALL: [OutputKind; 4] = [
        OutputKind::Expanded,
        OutputKind::Object,
        OutputKind::Entries,
        OutputKind::Externals,
    ];

    /// The artifact compared by the basic policy.
    pub const PRIMARY: OutputKind = OutputKind::Expanded;

    /// Return the file extension of this kind (no leading dot).
    pub fn extension(self) -> &'static str {
        as_str(self)
    }

    /// Return the golden file name of this kind.
    pub fn golden_file(self) -> &'static str {
        golden_file(self)
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}

/// Metadata entry for an output kind.
#[derive(Debug, Clone, Copy)]
pub struct OutputKindInfo {
    pub item: ItemInfo<OutputKind>,
    /// File name of the golden artifact inside the fixture directory.
    pub golden_file: &'static str,
}

/// Registry of output kinds.
pub const OUTPUT_KINDS: &[OutputKindInfo] = &[
    info(
        OutputKind::Expanded,
        "am",
        "expected.am",
        "Macro-expanded source written by the preassembler.",
    ),
    info(
        OutputKind::Object,
        "ob",
        "expected.ob",
        "Object encoding: code and data words.",
    ),
    info(
        OutputKind::Entries,
        "ent",
        "expected.ent",
        "Entry-symbol table (only written when the source declares entries).",
    ),
    info(
        OutputKind::Externals,
        "ext",
        "expected.ext",
        "External-reference table (only written when externals are used).",
    ),
];

/// Resolve an extension (with or without the leading dot) to its output kind.
pub fn from_str(extension: &str) -> Option<OutputKind> {
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    OUTPUT_KINDS
        .iter()
        .find(|k| k.item.matches(extension))
        .map(|k| k.item.id)
}

/// Return the canonical extension for an output kind.
pub fn as_str(kind: OutputKind) -> &'static str {
    info_for(kind).item.canonical
}

/// Return the golden file name for an output kind.
pub fn golden_file(kind: OutputKind) -> &'static str {
    info_for(kind).golden_file
}

/// Return the metadata entry for an output kind.
pub fn info_for(kind: OutputKind) -> &'static OutputKindInfo {
    match kind {
        OutputKind::Expanded => &OUTPUT_KINDS[0],
        OutputKind::Object => &OUTPUT_KINDS[1],
        OutputKind::Entries => &OUTPUT_KINDS[2],
        OutputKind::Externals => &OUTPUT_KINDS[3],
    }
}

const fn info(
    id: OutputKind,
    extension: &'static str,
    golden_file: &'static str,
    description: &'static str,
) -> OutputKindInfo {
    OutputKindInfo {
        item: ItemInfo {
            id,
            canonical: extension,
            aliases: &[],
            description,
        },
        golden_file,
    }
}
