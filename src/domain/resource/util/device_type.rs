use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::util::format_util::{DECIMAL_PLACES, KIB};
use crate::core::util::number_util::to_fixed;

/// Hardware device categories reported by the resource inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Accelerator,
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "DSP")]
    Dsp,
    #[serde(rename = "FPGA")]
    Fpga,
    #[serde(rename = "GPU")]
    Gpu,
    UnknownProcessor,
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "storage")]
    Storage,
    #[serde(rename = "networkInterface")]
    NetworkInterface,
    #[serde(rename = "graphicController")]
    GraphicController,
    #[serde(rename = "virtualMedia")]
    VirtualMedia,
}

pub const PROCESSOR_TYPE_ORDER: [DeviceType; 6] = [
    DeviceType::Accelerator,
    DeviceType::Cpu,
    DeviceType::Dsp,
    DeviceType::Fpga,
    DeviceType::Gpu,
    DeviceType::UnknownProcessor,
];

/// Display order: processors first, then the remaining devices.
pub const DEVICE_TYPE_ORDER: [DeviceType; 11] = [
    DeviceType::Accelerator,
    DeviceType::Cpu,
    DeviceType::Dsp,
    DeviceType::Fpga,
    DeviceType::Gpu,
    DeviceType::UnknownProcessor,
    DeviceType::Memory,
    DeviceType::Storage,
    DeviceType::NetworkInterface,
    DeviceType::GraphicController,
    DeviceType::VirtualMedia,
];

impl DeviceType {
    /// Identifier used in metric names and API payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            DeviceType::Accelerator => "Accelerator",
            DeviceType::Cpu => "CPU",
            DeviceType::Dsp => "DSP",
            DeviceType::Fpga => "FPGA",
            DeviceType::Gpu => "GPU",
            DeviceType::UnknownProcessor => "UnknownProcessor",
            DeviceType::Memory => "memory",
            DeviceType::Storage => "storage",
            DeviceType::NetworkInterface => "networkInterface",
            DeviceType::GraphicController => "graphicController",
            DeviceType::VirtualMedia => "virtualMedia",
        }
    }

    pub fn is_processor(self) -> bool {
        PROCESSOR_TYPE_ORDER.contains(&self)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device type: {0}")]
pub struct UnknownDeviceType(pub String);

impl FromStr for DeviceType {
    type Err = UnknownDeviceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DEVICE_TYPE_ORDER
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownDeviceType(s.to_string()))
    }
}

/// Deduplicates `types` and orders them by [`DEVICE_TYPE_ORDER`]; unknown names follow,
/// sorted lexicographically.
pub fn sort_by_device_type<S: AsRef<str>>(types: &[S]) -> Vec<String> {
    let unique: BTreeSet<&str> = types.iter().map(AsRef::as_ref).collect();

    let known = DEVICE_TYPE_ORDER
        .iter()
        .map(|t| t.as_str())
        .filter(|name| unique.contains(name));
    let unknown = unique
        .iter()
        .copied()
        .filter(|name| name.parse::<DeviceType>().is_err());

    known.chain(unknown).map(str::to_string).collect()
}

/// Inventory field that carries a device's volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeKey {
    TotalCores,
    #[serde(rename = "capacityMiB")]
    CapacityMib,
    DriveCapacityBytes,
}

pub fn volume_key(device_type: DeviceType) -> Option<VolumeKey> {
    match device_type {
        t if t.is_processor() => Some(VolumeKey::TotalCores),
        DeviceType::Memory => Some(VolumeKey::CapacityMib),
        DeviceType::Storage => Some(VolumeKey::DriveCapacityBytes),
        _ => None,
    }
}

pub const BYTE_UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Largest binary unit not exceeding `bytes`, clamped to `B..=YiB`.
pub fn bytes_to_unit(bytes: f64) -> &'static str {
    if bytes.is_nan() || bytes < 1.0 {
        return BYTE_UNITS[0];
    }
    let index = (bytes.log2() / 10.0).floor().clamp(0.0, (BYTE_UNITS.len() - 1) as f64);
    BYTE_UNITS[index as usize]
}

/// `bytes` expressed in `unit` with two decimals; empty for unknown units.
pub fn format_bytes(bytes: f64, unit: &str) -> String {
    match BYTE_UNITS.iter().position(|u| *u == unit) {
        Some(index) => to_fixed(bytes / KIB.powi(index as i32), DECIMAL_PLACES),
        None => String::new(),
    }
}

fn mib_to_bytes(mib: f64) -> f64 {
    mib * KIB * KIB
}

/// Display unit for a device volume: byte units for memory (MiB input) and storage (byte
/// input), `cores` for processors, empty otherwise.
pub fn type_to_unit(device_type: DeviceType, volume: f64) -> String {
    match device_type {
        DeviceType::Memory => bytes_to_unit(mib_to_bytes(volume)).to_string(),
        DeviceType::Storage => bytes_to_unit(volume).to_string(),
        t if volume_key(t) == Some(VolumeKey::TotalCores) => "cores".to_string(),
        _ => String::new(),
    }
}

pub fn format_unit_value(device_type: DeviceType, volume: f64, unit: &str) -> String {
    match device_type {
        DeviceType::Memory => format_bytes(mib_to_bytes(volume), unit),
        DeviceType::Storage => format_bytes(volume, unit),
        _ => volume.to_string(),
    }
}
