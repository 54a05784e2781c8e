// ── Device commands ──
//
// Typed mutation requests dispatched by the UI and drained by whatever
// embeds the store. The dashboard itself never interprets them; with
// transport out of scope the binary's consumer logs each one.

use std::fmt;

/// An operation requested against a device, addressed by friendly name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    /// Remove the device from the network.
    Remove { friendly_name: String, force: bool },
    /// Re-apply the device's reporting configuration.
    Configure { friendly_name: String },
    /// Re-interview the device to refresh its definition.
    Interview { friendly_name: String },
}

impl DeviceCommand {
    pub fn friendly_name(&self) -> &str {
        match self {
            Self::Remove { friendly_name, .. }
            | Self::Configure { friendly_name }
            | Self::Interview { friendly_name } => friendly_name,
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove {
                friendly_name,
                force: false,
            } => write!(f, "remove '{friendly_name}'"),
            Self::Remove {
                friendly_name,
                force: true,
            } => write!(f, "force-remove '{friendly_name}'"),
            Self::Configure { friendly_name } => write!(f, "configure '{friendly_name}'"),
            Self::Interview { friendly_name } => write!(f, "interview '{friendly_name}'"),
        }
    }
}
