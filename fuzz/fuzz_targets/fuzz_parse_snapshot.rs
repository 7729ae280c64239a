#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the snapshot parser.
///
/// Feeds arbitrary UTF-8 strings to `parse_snapshot`, covering section
/// splitting, header lookup and property extraction.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = hwid_diff::parse_snapshot(s);
    }
});
