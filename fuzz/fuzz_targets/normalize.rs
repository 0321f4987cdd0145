#![no_main]

use asmgold_core::golden::PlaceholderValues;
use asmgold_core::text;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let values = PlaceholderValues {
            input_path: "/cases/fuzz/test.as".to_string(),
            input_base: "/cases/fuzz/test".to_string(),
            cases_root: "/cases".to_string(),
        };
        let golden = text::substitute_placeholders(s, &values);
        let once = text::normalize_diagnostic(&golden);
        assert_eq!(text::normalize_diagnostic(&once), once);
        assert!(text::artifacts_match(s, &format!("\n{s}\n")));
    }
});
