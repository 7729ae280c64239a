//! Hardcoded comparison properties of the built-in strategies.

use crate::model::ComponentType;

const DISK_DRIVE: &[&str] = &["SerialNumber", "Model", "PhysicalDrive", "Size"];
const RAM: &[&str] = &["SerialNumber", "PartNumber", "Manufacturer", "Capacity"];
const CPU: &[&str] = &["ProcessorId", "Name", "Manufacturer"];
const MOTHERBOARD: &[&str] = &["SerialNumber", "Product", "Manufacturer"];
const BIOS: &[&str] = &["SerialNumber", "SMBIOSBIOSVersion", "Manufacturer"];
const GPU: &[&str] = &["UUID", "Name", "PNPDeviceID"];
const TPM: &[&str] = &["EKPublicKeyHash", "ManufacturerId", "ManufacturerVersion"];
const USB: &[&str] = &["DeviceID", "Description", "SerialNumber"];
const MONITOR: &[&str] = &["SerialNumber", "Name", "Manufacturer"];
const NETWORK: &[&str] = &["MACAddress", "Name", "Description"];

/// Ordered comparison properties of the built-in strategy for a type.
#[must_use]
pub const fn builtin_properties(component_type: ComponentType) -> &'static [&'static str] {
    match component_type {
        ComponentType::DiskDrive => DISK_DRIVE,
        ComponentType::Ram => RAM,
        ComponentType::Cpu => CPU,
        ComponentType::Motherboard => MOTHERBOARD,
        ComponentType::Bios => BIOS,
        ComponentType::Gpu => GPU,
        ComponentType::Tpm => TPM,
        ComponentType::Usb => USB,
        ComponentType::Monitor => MONITOR,
        ComponentType::Network => NETWORK,
    }
}
