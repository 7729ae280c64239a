//! Section header detection and the header → type table.

use crate::model::ComponentType;

/// Fixed table of recognised section titles.
const HEADER_TABLE: &[(&str, ComponentType)] = &[
    ("DISK DRIVE INFORMATION", ComponentType::DiskDrive),
    ("RAM INFORMATION", ComponentType::Ram),
    ("MEMORY INFORMATION", ComponentType::Ram),
    ("CPU INFORMATION", ComponentType::Cpu),
    ("PROCESSOR INFORMATION", ComponentType::Cpu),
    ("MOTHERBOARD INFORMATION", ComponentType::Motherboard),
    ("BASEBOARD INFORMATION", ComponentType::Motherboard),
    ("BIOS INFORMATION", ComponentType::Bios),
    ("GPU INFORMATION", ComponentType::Gpu),
    ("TPM INFORMATION", ComponentType::Tpm),
    ("USB INFORMATION", ComponentType::Usb),
    ("MONITOR INFORMATION", ComponentType::Monitor),
    ("NETWORK INFORMATION", ComponentType::Network),
    ("NIC's", ComponentType::Network),
    ("NIC's INFORMATION", ComponentType::Network),
    ("ARP INFORMATION", ComponentType::Network),
];

const HEADER_SUFFIX: &str = "INFORMATION";
const NIC_MARKER: &str = "NIC's";

/// Whether `line` starts a new section.
///
/// Matches lines ending in `INFORMATION` (trailing whitespace ignored) and
/// any line containing `NIC's`. This also catches lines such as
/// `Note: see INFORMATION`; the report generator never emits those inside
/// a section.
#[must_use]
pub fn is_section_header(line: &str) -> bool {
    line.trim_end().ends_with(HEADER_SUFFIX) || line.contains(NIC_MARKER)
}

/// Component type for a section title, after trimming.
#[must_use]
pub fn header_type(header: &str) -> Option<ComponentType> {
    let header = header.trim();
    HEADER_TABLE
        .iter()
        .find(|(title, _)| *title == header)
        .map(|(_, ty)| *ty)
}

/// Every recognised title with its type, in table order.
#[must_use]
pub fn known_headers() -> &'static [(&'static str, ComponentType)] {
    HEADER_TABLE
}
