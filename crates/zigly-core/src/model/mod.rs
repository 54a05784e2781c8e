//! Canonical domain types, serde-compatible with the bridge's
//! published payload shapes.

mod bridge;
mod device;
mod state;

pub use bridge::{AdvancedConfig, BridgeConfig, BridgeInfo, CoordinatorInfo, LastSeenMode};
pub use device::{Device, DeviceDefinition, DeviceType, PowerSource};
pub use state::{DeviceState, LastSeenValue};
