//! Shareable metadata for the `asmgold_core` registries.
//!
//! Every registry in this crate (output kinds, placeholder tokens) is a `const` table of items that share the same
//! core fields. This module provides that small, `Copy`-friendly shape.
//!
//! ## See also
//! - [`crate::artifacts`]
//! - [`crate::golden`]

/// Shared metadata shape for registry items.
///
/// - stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - documentation (`description`)
///
/// Registries that need extra per-item data (e.g. the golden file name of an output kind) wrap this struct in their
/// own info type.
///
/// ## Examples
/// ```rust
/// use asmgold_core::registry::ItemInfo;
///
/// const ITEM: ItemInfo<u8> = ItemInfo {
///     id: 1,
///     canonical: "am",
///     aliases: &[],
///     description: "Macro-expanded source.",
/// };
/// assert!(ITEM.matches("am"));
/// assert!(!ITEM.matches("ob"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

impl<Id> ItemInfo<Id> {
    /// Return whether `spelling` is the canonical spelling or one of the aliases.
    pub fn matches(&self, spelling: &str) -> bool {
        self.canonical == spelling || self.aliases.contains(&spelling)
    }
}
