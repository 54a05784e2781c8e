// ── Bridge metadata and configuration ──

use serde::{Deserialize, Serialize};

/// The bridge's last-seen display strategy (`advanced.last_seen`).
///
/// Anything other than `disable` makes the last-seen column available;
/// the concrete variant decides how the raw state value is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LastSeenMode {
    #[serde(rename = "disable")]
    Disable,
    #[serde(rename = "ISO_8601")]
    Iso8601,
    #[serde(rename = "ISO_8601_local")]
    Iso8601Local,
    #[serde(rename = "epoch")]
    #[default]
    Epoch,
}

impl LastSeenMode {
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disable)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedConfig {
    pub last_seen: LastSeenMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub advanced: AdvancedConfig,
}

/// Coordinator hardware identification from `bridge/info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorInfo {
    #[serde(rename = "type")]
    pub adapter_type: Option<String>,
    pub ieee_address: Option<String>,
}

/// Read-only bridge metadata consumed by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeInfo {
    pub config: BridgeConfig,
    pub version: Option<String>,
    pub coordinator: Option<CoordinatorInfo>,
}

impl BridgeInfo {
    /// Convenience accessor for the one config flag the table reads.
    pub fn last_seen_mode(&self) -> LastSeenMode {
        self.config.advanced.last_seen
    }
}
