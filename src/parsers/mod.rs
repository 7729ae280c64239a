//! Snapshot text parser.
//!
//! A snapshot is the plain-text report written by the hardware enumeration
//! tool: a series of sections, each opened by a title line such as
//! `DISK DRIVE INFORMATION`, followed by `Label: Value` lines and
//! decoration.
//!
//! ## Parsing rules
//!
//! - a line is a header when it ends with `INFORMATION` or contains `NIC's`
//! - the trimmed header picks the [`ComponentType`] from a fixed table
//! - every line with a colon contributes a property (split at the first colon)
//! - sections that cannot become a component are dropped and recorded on
//!   [`ParsedSnapshot::dropped`]; they never fail the parse
//!
//! ## Usage
//!
//! ```
//! use hwid_diff::parsers::parse_snapshot;
//!
//! let text = "CPU INFORMATION\nProcessorId: BFEBFBFF000906EA\nName: i7-9700K\n";
//! let snapshot = parse_snapshot(text).unwrap();
//! assert_eq!(snapshot.components.len(), 1);
//! assert_eq!(snapshot.components[0].unique_key, "BFEBFBFF000906EA");
//! ```

mod header;
mod section;

pub use header::{header_type, is_section_header, known_headers};

use crate::cancel::CancellationToken;
use crate::error::{HwidDiffError, Result};
use crate::model::{Component, DropReason, DroppedSection, ParsedSnapshot};
use crate::strategy::{IdentifierStrategy, StrategyRegistry};
use section::{extract_properties, split_sections, RawSection};
use std::sync::Arc;

/// Parser for snapshot text.
///
/// Holds the strategy registry used to derive unique keys; cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct SnapshotParser {
    registry: Arc<StrategyRegistry>,
}

impl SnapshotParser {
    #[must_use]
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Parse a snapshot.
    ///
    /// Fails only when `text` is empty or whitespace.
    pub fn parse(&self, text: &str) -> Result<ParsedSnapshot> {
        self.parse_inner(text, None)
    }

    /// Parse a snapshot, checking `token` between sections.
    pub fn parse_cancellable(&self, text: &str, token: &CancellationToken) -> Result<ParsedSnapshot> {
        self.parse_inner(text, Some(token))
    }

    fn parse_inner(&self, text: &str, token: Option<&CancellationToken>) -> Result<ParsedSnapshot> {
        if text.trim().is_empty() {
            return Err(HwidDiffError::empty_snapshot());
        }

        let mut snapshot = ParsedSnapshot {
            fingerprint: ParsedSnapshot::fingerprint_of(text),
            ..ParsedSnapshot::default()
        };

        for raw in split_sections(text) {
            if let Some(token) = token {
                token.check()?;
            }
            match self.build_component(&raw) {
                Ok(component) => snapshot.components.push(component),
                Err(reason) => {
                    tracing::debug!(
                        section = raw.index,
                        header = raw.title(),
                        %reason,
                        "Dropping snapshot section"
                    );
                    snapshot.dropped.push(DroppedSection {
                        index: raw.index,
                        header: raw.title().to_string(),
                        reason,
                    });
                }
            }
        }

        tracing::debug!(
            components = snapshot.components.len(),
            dropped = snapshot.dropped.len(),
            "Parsed snapshot"
        );
        Ok(snapshot)
    }

    fn build_component(&self, raw: &RawSection<'_>) -> std::result::Result<Component, DropReason> {
        let component_type = header_type(raw.title()).ok_or(DropReason::UnrecognizedHeader)?;

        let properties = extract_properties(&raw.lines);
        if properties.is_empty() {
            return Err(DropReason::NoProperties);
        }

        let strategy = self
            .registry
            .get(component_type)
            .ok_or(DropReason::MissingStrategy { component_type })?;

        let unique_key = strategy.identifier(&properties).to_string();
        if unique_key.is_empty() && strategy.fallback_identifiers(&properties).is_empty() {
            return Err(DropReason::NoIdentifier { component_type });
        }

        Ok(Component {
            component_type,
            unique_key,
            properties,
        })
    }
}

/// Parse with the built-in strategies.
pub fn parse_snapshot(text: &str) -> Result<ParsedSnapshot> {
    SnapshotParser::default().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentType;

    const DISK: &str = "\
==================================================
              DISK DRIVE INFORMATION
==================================================
Model: Samsung SSD 970 EVO 1TB
SerialNumber: S467NX0M123456
PhysicalDrive: \\\\.\\PHYSICALDRIVE0
Size: 1000202273280
";

    #[test]
    fn test_parse_disk_section() {
        let snapshot = parse_snapshot(DISK).unwrap();
        assert_eq!(snapshot.components.len(), 1);
        let disk = &snapshot.components[0];
        assert_eq!(disk.component_type, ComponentType::DiskDrive);
        assert_eq!(disk.unique_key, "S467NX0M123456");
        assert_eq!(disk.property("PhysicalDrive"), "\\\\.\\PHYSICALDRIVE0");
        assert!(snapshot.dropped.is_empty());
    }

    #[test]
    fn test_arp_maps_to_network() {
        let text = "ARP INFORMATION\nMACAddress: 00-11-22-33-44-55\n";
        let snapshot = parse_snapshot(text).unwrap();
        assert_eq!(snapshot.components[0].component_type, ComponentType::Network);
    }

    #[test]
    fn test_nic_header() {
        let text = "NIC's\nName: Intel Ethernet\nMACAddress: AA:BB:CC:DD:EE:FF\n";
        let snapshot = parse_snapshot(text).unwrap();
        let nic = &snapshot.components[0];
        assert_eq!(nic.component_type, ComponentType::Network);
        assert_eq!(nic.unique_key, "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_unknown_header_dropped() {
        let text = "SOUND INFORMATION\nName: Realtek\nCPU INFORMATION\nProcessorId: X\n";
        let snapshot = parse_snapshot(text).unwrap();
        assert_eq!(snapshot.components.len(), 1);
        assert_eq!(snapshot.dropped.len(), 1);
        assert_eq!(snapshot.dropped[0].header, "SOUND INFORMATION");
        assert_eq!(snapshot.dropped[0].reason, DropReason::UnrecognizedHeader);
    }

    #[test]
    fn test_section_without_properties_dropped() {
        let text = "GPU INFORMATION\nno devices found\n";
        let snapshot = parse_snapshot(text).unwrap();
        assert!(snapshot.components.is_empty());
        assert_eq!(snapshot.dropped[0].reason, DropReason::NoProperties);
    }

    #[test]
    fn test_section_without_identifier_dropped() {
        let text = "TPM INFORMATION\nStatus: Disabled\n";
        let snapshot = parse_snapshot(text).unwrap();
        assert!(snapshot.components.is_empty());
        assert_eq!(
            snapshot.dropped[0].reason,
            DropReason::NoIdentifier {
                component_type: ComponentType::Tpm
            }
        );
    }

    #[test]
    fn test_fallback_identifier_keeps_component() {
        let text = "GPU INFORMATION\nName: NVIDIA GeForce RTX 3080\n";
        let snapshot = parse_snapshot(text).unwrap();
        assert_eq!(snapshot.components.len(), 1);
        assert_eq!(snapshot.components[0].unique_key, "");
    }

    #[test]
    fn test_missing_strategy_dropped() {
        let registry = StrategyRegistry::default().without(ComponentType::Usb);
        let parser = SnapshotParser::new(Arc::new(registry));
        let snapshot = parser.parse("USB INFORMATION\nDeviceID: USB\\VID_046D\n").unwrap();
        assert!(snapshot.components.is_empty());
        assert_eq!(
            snapshot.dropped[0].reason,
            DropReason::MissingStrategy {
                component_type: ComponentType::Usb
            }
        );
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            parse_snapshot(""),
            Err(HwidDiffError::Parse { .. })
        ));
        assert!(matches!(
            parse_snapshot("  \n\t\n"),
            Err(HwidDiffError::Parse { .. })
        ));
    }

    #[test]
    fn test_cancelled_parse() {
        let token = CancellationToken::new();
        token.cancel();
        let result = SnapshotParser::default().parse_cancellable(DISK, &token);
        assert!(matches!(result, Err(HwidDiffError::Cancelled)));
    }

    #[test]
    fn test_multiple_components_keep_order() {
        let text = "RAM INFORMATION\nSerialNumber: A\nRAM INFORMATION\nSerialNumber: B\n";
        let snapshot = parse_snapshot(text).unwrap();
        let keys: Vec<_> = snapshot
            .components
            .iter()
            .map(|c| c.unique_key.as_str())
            .collect();
        assert_eq!(keys, vec!["A", "B"]);
    }
}
