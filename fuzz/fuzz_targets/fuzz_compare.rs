#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the full comparison on two snapshots split from one input.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (base, target) = s.split_once('\0').unwrap_or((s, s));
    let _ = hwid_diff::Comparator::new().compare_blocking(
        base,
        target,
        &hwid_diff::CancellationToken::new(),
    );
});
