use std::collections::HashMap;

use asmgold_core::artifacts::{self, GOLDEN_STEM, INPUT_EXTENSION, OutputKind};
use asmgold_core::golden::{self, GOLDEN_ERROR_FILE, GOLDEN_ERROR_FILES, PlaceholderId};

#[test]
fn output_kind_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, OutputKind> = HashMap::new();

    for info in artifacts::OUTPUT_KINDS {
        assert_eq!(
            artifacts::from_str(info.item.canonical),
            Some(info.item.id),
            "output kind extension not resolvable: {}",
            info.item.canonical
        );
        assert_eq!(
            artifacts::as_str(info.item.id),
            info.item.canonical,
            "output kind as_str mismatch for {:?}",
            info.item.id
        );

        if let Some(prev) = seen.insert(info.item.canonical, info.item.id) {
            panic!(
                "duplicate output kind extension {:?}: {:?} and {:?}",
                info.item.canonical, prev, info.item.id
            );
        }
    }
}

#[test]
fn output_kind_registry_covers_all() {
    assert_eq!(artifacts::OUTPUT_KINDS.len(), OutputKind::ALL.len());
    for kind in OutputKind::ALL {
        assert!(
            artifacts::OUTPUT_KINDS.iter().any(|info| info.item.id == kind),
            "output kind {:?} missing from registry",
            kind
        );
    }
}

#[test]
fn golden_files_never_collide_with_produced_files() {
    // Produced files are `<input-stem>.<ext>`; goldens are `expected.<ext>`.
    assert_ne!(GOLDEN_STEM, artifacts::DEFAULT_INPUT_STEM);
    for kind in OutputKind::ALL {
        assert_ne!(kind.golden_file(), format!("{}.{}", artifacts::DEFAULT_INPUT_STEM, kind));
        assert_ne!(kind.extension(), INPUT_EXTENSION);
    }
}

#[test]
fn golden_error_lookup_prefers_canonical_name() {
    assert_eq!(GOLDEN_ERROR_FILES.first(), Some(&GOLDEN_ERROR_FILE));
    for name in GOLDEN_ERROR_FILES {
        assert!(
            artifacts::OUTPUT_KINDS.iter().all(|info| info.golden_file != *name),
            "golden error name {} shadows an output kind",
            name
        );
    }
}

#[test]
fn placeholder_tokens_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, PlaceholderId> = HashMap::new();

    for info in golden::PLACEHOLDERS {
        assert_eq!(golden::from_str(info.canonical), Some(info.id));
        assert_eq!(golden::as_str(info.id), info.canonical);
        assert!(
            info.canonical.starts_with('{') && info.canonical.ends_with('}'),
            "placeholder {} must be brace-delimited",
            info.canonical
        );
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!("duplicate placeholder {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }
}
