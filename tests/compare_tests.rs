//! End-to-end comparison behaviour.
//!
//! Each test feeds snapshot text through [`Comparator`] and checks the
//! resulting change list.

use hwid_diff::matching::{IdentityMatcher, PositionalMatcher};
use hwid_diff::{
    AppConfig, CancellationToken, ChangeType, Comparator, Component, ComponentMatcher,
    ComponentPair, ComponentType, ComparisonResult, HwidDiffError, MatchingStrategyKind,
    COMPARISON_FAILED_CODE,
};
use std::sync::Arc;

// ============================================================================
// Helpers
// ============================================================================

fn compare(base: &str, target: &str) -> Vec<ComparisonResult> {
    Comparator::new()
        .compare_blocking(base, target, &CancellationToken::new())
        .expect("comparison should succeed")
        .results
}

fn cpu(processor_id: &str, name: &str) -> String {
    format!(
        "==============================\n       CPU INFORMATION\n==============================\n\
         ProcessorId: {processor_id}\nName: {name}\nManufacturer: GenuineIntel\n\n"
    )
}

fn gpu(uuid: &str) -> String {
    format!("GPU INFORMATION\nUUID: {uuid}\nName: NVIDIA GeForce RTX 3080\nPNPDeviceID: PCI\\VEN_10DE\n\n")
}

/// Parses to zero components.
const NOTHING: &str = "SOUND INFORMATION\nName: Realtek\n";

// ============================================================================
// Core properties
// ============================================================================

#[test]
fn identical_snapshot_has_no_changes() {
    let text = format!("{}{}{}", cpu("A", "i7"), cpu("B", "i9"), gpu("GPU-1"));
    assert!(compare(&text, &text).is_empty());
}

#[test]
fn identical_content_with_different_decoration_has_no_changes() {
    let base = format!("{}{}", cpu("A", "i7"), gpu("GPU-1"));
    let target = base.replace("==============================", "-----");
    assert_ne!(base, target);
    assert!(compare(&base, &target).is_empty());
}

#[test]
fn pure_addition() {
    let results = compare(NOTHING, &cpu("BFEBFBFF000906EA", "Intel Core i7-9700K"));
    assert_eq!(results.len(), 1);

    let added = &results[0];
    assert_eq!(added.change_type, ChangeType::Added);
    assert_eq!(added.component_type, ComponentType::Cpu);
    assert_eq!(added.identifier, "BFEBFBFF000906EA");

    let properties: Vec<&str> = added.changes.keys().map(String::as_str).collect();
    assert_eq!(properties, vec!["ProcessorId", "Name", "Manufacturer"]);
    assert!(added.changes.values().all(|c| c.old_value.is_empty()));
    assert_eq!(added.changes["Name"].new_value, "Intel Core i7-9700K");
    assert_eq!(added.changes["Manufacturer"].new_value, "GenuineIntel");
}

#[test]
fn pure_removal() {
    let results = compare(&cpu("BFEBFBFF000906EA", "Intel Core i7-9700K"), NOTHING);
    assert_eq!(results.len(), 1);

    let removed = &results[0];
    assert_eq!(removed.change_type, ChangeType::Removed);
    assert_eq!(removed.component_type, ComponentType::Cpu);
    assert!(removed.changes.values().all(|c| c.new_value.is_empty()));
    assert_eq!(removed.changes["ProcessorId"].old_value, "BFEBFBFF000906EA");
}

#[test]
fn missing_property_reads_as_empty_on_addition() {
    let results = compare(NOTHING, "GPU INFORMATION\nUUID: GPU-1\n");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].changes["Name"].new_value, "");
    assert_eq!(results[0].changes["PNPDeviceID"].new_value, "");
}

#[test]
fn partial_modification_lists_only_changed_property() {
    let results = compare(&cpu("AAAA", "i7"), &cpu("BBBB", "i7"));
    assert_eq!(results.len(), 1);
    let modified = &results[0];
    assert_eq!(modified.change_type, ChangeType::Modified);
    assert_eq!(modified.changes.len(), 1);
    assert_eq!(modified.changes["ProcessorId"].old_value, "AAAA");
    assert_eq!(modified.changes["ProcessorId"].new_value, "BBBB");
}

#[test]
fn non_comparison_property_changes_are_ignored() {
    let base = "CPU INFORMATION\nProcessorId: A\nNumberOfCores: 8\n";
    let target = "CPU INFORMATION\nProcessorId: A\nNumberOfCores: 16\n";
    assert!(compare(base, target).is_empty());
}

#[test]
fn unrecognized_section_is_dropped_without_error() {
    let base = format!("{}SOUND INFORMATION\nName: Realtek\n\n{}", cpu("A", "i7"), gpu("G"));
    let report = Comparator::new()
        .compare_blocking(&base, &base.replace("Realtek", "Creative"), &CancellationToken::new())
        .unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.base.component_count, 2);
    assert_eq!(report.base.dropped_sections, 1);
    assert_eq!(report.base.dropped[0].header, "SOUND INFORMATION");
}

#[test]
fn positional_matching_follows_list_order() {
    let base = format!("{}{}", cpu("ID-1", "first"), cpu("ID-2", "second"));
    let target = format!("{}{}", cpu("ID-2", "first"), cpu("ID-1", "second"));

    let results = compare(&base, &target);
    assert_eq!(results.len(), 2);
    // base[0] against target[0]
    assert_eq!(results[0].identifier, "ID-1");
    assert_eq!(results[0].changes["ProcessorId"].new_value, "ID-2");
    assert!(!results[0].changes.contains_key("Name"));
    // base[1] against target[1]
    assert_eq!(results[1].identifier, "ID-2");
    assert_eq!(results[1].changes["ProcessorId"].new_value, "ID-1");
}

#[test]
fn types_never_cross_match() {
    let results = compare(&cpu("A", "i7"), &gpu("GPU-1"));
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].change_type, ChangeType::Removed);
    assert_eq!(results[0].component_type, ComponentType::Cpu);
    assert_eq!(results[1].change_type, ChangeType::Added);
    assert_eq!(results[1].component_type, ComponentType::Gpu);
}

#[test]
fn disk_serial_change_scenario() {
    let base = "DISK DRIVE INFORMATION\nPhysicalDrive: \\\\.\\PHYSICALDRIVE0\nSerialNumber: ABC123\n";
    let target = "DISK DRIVE INFORMATION\nPhysicalDrive: \\\\.\\PHYSICALDRIVE0\nSerialNumber: XYZ789\n";

    let results = compare(base, target);
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert_eq!(r.change_type, ChangeType::Modified);
    assert_eq!(r.component_type.tag(), "DISK DRIVE");
    assert_eq!(r.changes.len(), 1);
    assert_eq!(r.changes["SerialNumber"].old_value, "ABC123");
    assert_eq!(r.changes["SerialNumber"].new_value, "XYZ789");
}

// ============================================================================
// Matching strategies
// ============================================================================

#[test]
fn identity_matching_ignores_reordering() {
    let base = format!("{}{}", cpu("ID-1", "first"), cpu("ID-2", "second"));
    let target = format!("{}{}", cpu("ID-2", "second"), cpu("ID-1", "first"));

    let report = Comparator::new()
        .with_matcher(Arc::new(IdentityMatcher))
        .compare_blocking(&base, &target, &CancellationToken::new())
        .unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.matcher, "identity");

    let positional = Comparator::new()
        .with_matcher(Arc::new(PositionalMatcher))
        .compare_blocking(&base, &target, &CancellationToken::new())
        .unwrap();
    assert_eq!(positional.results.len(), 2);
}

#[test]
fn identity_matching_from_config() {
    let config = AppConfig::builder()
        .matching(MatchingStrategyKind::Identity)
        .build();
    let comparator = Comparator::from_config(&config).unwrap();
    assert_eq!(comparator.matcher_name(), "identity");
}

// ============================================================================
// Strategy overrides
// ============================================================================

#[test]
fn config_override_changes_tracked_properties() {
    let config = AppConfig::builder()
        .strategy(ComponentType::Cpu, ["ProcessorId", "NumberOfCores"])
        .build();
    let base = "CPU INFORMATION\nProcessorId: A\nName: Old\nNumberOfCores: 8\n";
    let target = "CPU INFORMATION\nProcessorId: A\nName: New\nNumberOfCores: 16\n";

    let results = Comparator::from_config(&config)
        .unwrap()
        .compare_blocking(base, target, &CancellationToken::new())
        .unwrap()
        .results;
    assert_eq!(results.len(), 1);
    let keys: Vec<&str> = results[0].changes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["NumberOfCores"]);
}

#[test]
fn removed_strategy_drops_sections_of_that_type() {
    let config = AppConfig::builder()
        .strategy(ComponentType::Gpu, Vec::<String>::new())
        .build();
    let report = Comparator::from_config(&config)
        .unwrap()
        .compare_blocking(&cpu("A", "i7"), &format!("{}{}", cpu("A", "i7"), gpu("G")), &CancellationToken::new())
        .unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.target.dropped_sections, 1);
}

#[test]
fn unknown_strategy_key_is_config_error() {
    let mut config = AppConfig::default();
    config
        .strategies
        .insert("SOUND".to_string(), vec!["Name".to_string()]);
    let err = Comparator::from_config(&config).unwrap_err();
    assert!(matches!(err, HwidDiffError::Config(_)));
}

// ============================================================================
// Errors and cancellation
// ============================================================================

#[tokio::test]
async fn empty_snapshot_fails_fast() {
    let comparator = Comparator::new();
    let token = CancellationToken::new();
    for empty in ["", "   \n\t\n"] {
        let err = comparator.compare(empty, &cpu("A", "i7"), &token).await.unwrap_err();
        assert!(matches!(err, HwidDiffError::Parse { .. }), "{err}");
        let err = comparator.compare(&cpu("A", "i7"), empty, &token).await.unwrap_err();
        assert!(matches!(err, HwidDiffError::Parse { .. }), "{err}");
    }
}

struct PanickingMatcher;

impl ComponentMatcher for PanickingMatcher {
    fn match_components<'a>(
        &self,
        _base: &'a [Component],
        _target: &'a [Component],
    ) -> Vec<ComponentPair<'a>> {
        panic!("matcher exploded");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

#[tokio::test]
async fn match_stage_failure_carries_fixed_code() {
    let err = Comparator::new()
        .with_matcher(Arc::new(PanickingMatcher))
        .compare(&cpu("A", "i7"), &cpu("B", "i7"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(COMPARISON_FAILED_CODE));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn blocking_match_stage_failure_carries_fixed_code() {
    let err = Comparator::new()
        .with_matcher(Arc::new(PanickingMatcher))
        .compare_blocking(&cpu("A", "i7"), &cpu("B", "i7"), &CancellationToken::new())
        .unwrap_err();
    assert_eq!(err.code(), Some(COMPARISON_FAILED_CODE));
    let cause = std::error::Error::source(&err).expect("panic kept as cause");
    assert_eq!(cause.to_string(), "matcher exploded");
}

#[test]
fn parse_failure_names_the_side() {
    let err = Comparator::new()
        .compare_blocking(&cpu("A", "i7"), " ", &CancellationToken::new())
        .unwrap_err();
    assert!(matches!(err, HwidDiffError::Parse { .. }));
    assert!(err.to_string().contains("target snapshot"), "{err}");
}

/// Cancels the shared token while matching, then matches positionally.
struct CancellingMatcher(CancellationToken);

impl ComponentMatcher for CancellingMatcher {
    fn match_components<'a>(
        &self,
        base: &'a [Component],
        target: &'a [Component],
    ) -> Vec<ComponentPair<'a>> {
        self.0.cancel();
        PositionalMatcher.match_components(base, target)
    }

    fn name(&self) -> &'static str {
        "cancelling"
    }
}

#[tokio::test]
async fn cancellation_during_comparison() {
    let token = CancellationToken::new();
    let err = Comparator::new()
        .with_matcher(Arc::new(CancellingMatcher(token.clone())))
        .compare(&cpu("A", "i7"), &cpu("B", "i7"), &token)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(err.code(), None);
}

#[tokio::test]
async fn cancelled_token_stops_before_parsing() {
    let token = CancellationToken::new();
    token.cancel();
    let err = Comparator::new()
        .compare(&cpu("A", "i7"), &cpu("B", "i7"), &token)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}
