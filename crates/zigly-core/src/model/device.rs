// ── Device domain types ──

use serde::{Deserialize, Serialize};

/// Device role on the mesh -- the bridge's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DeviceType {
    Coordinator,
    Router,
    EndDevice,
    GreenPower,
    #[serde(other)]
    #[default]
    Unknown,
}

impl DeviceType {
    pub fn is_coordinator(self) -> bool {
        matches!(self, Self::Coordinator)
    }

    /// Glyph used in the device table's picture column.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Coordinator => "◎",
            Self::Router => "◇",
            Self::EndDevice => "·",
            Self::GreenPower => "⚘",
            Self::Unknown => "?",
        }
    }
}

/// How a device is powered -- the bridge's `power_source` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PowerSource {
    Battery,
    #[serde(rename = "Mains (single phase)")]
    MainsSinglePhase,
    #[serde(rename = "Mains (3 phase)")]
    MainsThreePhase,
    #[serde(rename = "DC Source")]
    DcSource,
    #[serde(rename = "Emergency mains constantly powered")]
    EmergencyMains,
    #[serde(rename = "Emergency mains and transfer switch")]
    EmergencyMainsTransfer,
    #[serde(other)]
    #[default]
    Unknown,
}

impl PowerSource {
    pub fn is_battery(self) -> bool {
        matches!(self, Self::Battery)
    }

    /// Short display label, also the column's sort key.
    pub fn label(self) -> &'static str {
        match self {
            Self::Battery => "Battery",
            Self::MainsSinglePhase => "Mains (single phase)",
            Self::MainsThreePhase => "Mains (3 phase)",
            Self::DcSource => "DC Source",
            Self::EmergencyMains => "Emergency mains",
            Self::EmergencyMainsTransfer => "Emergency mains + transfer",
            Self::Unknown => "Unknown",
        }
    }
}

/// Display overrides from the device database entry, if the bridge
/// recognized the hardware.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceDefinition {
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub description: Option<String>,
}

/// A device as published in the bridge's device list.
///
/// Identified by a stable, unique `friendly_name` (the registry key) and
/// a permanent `ieee_address`. Immutable from the dashboard's
/// perspective -- all mutation happens upstream in the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub friendly_name: String,
    pub ieee_address: String,
    #[serde(default)]
    pub network_address: u16,
    #[serde(rename = "type", default)]
    pub device_type: DeviceType,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub power_source: PowerSource,
    #[serde(default)]
    pub supported: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub interview_completed: bool,
    #[serde(default)]
    pub definition: Option<DeviceDefinition>,
}

impl Device {
    /// Vendor for display: the definition override wins over the raw
    /// manufacturer field reported by the device itself.
    pub fn vendor(&self) -> Option<&str> {
        self.definition
            .as_ref()
            .and_then(|d| d.vendor.as_deref())
            .or(self.manufacturer.as_deref())
    }

    /// Model for display, analogous to [`Device::vendor`].
    pub fn model(&self) -> Option<&str> {
        self.definition
            .as_ref()
            .and_then(|d| d.model.as_deref())
            .or(self.model_id.as_deref())
    }
}
