//! Reactive state storage.
//!
//! [`DataStore`] owns the three state slices the dashboard consumes --
//! device registry, per-device runtime state, bridge info -- each
//! published as an immutable snapshot through a `watch` channel. UI
//! consumers read snapshots and subscribe to changes; they never hold
//! locks and never mutate. Mutation requests travel the other way as
//! [`DeviceCommand`]s through an `mpsc` channel the embedder drains.

mod apply;

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::{mpsc, watch};

use crate::command::DeviceCommand;
use crate::model::{BridgeInfo, Device, DeviceState};

/// Ordered device registry: friendly name → device, in the bridge's
/// publication order. Friendly names are unique upstream; re-inserting
/// a key overwrites in place, it never duplicates.
pub type DeviceRegistry = IndexMap<String, Arc<Device>>;

/// Runtime state registry: friendly name → latest telemetry.
pub type StateRegistry = HashMap<String, DeviceState>;

/// The shared state container. Cheap to clone; clones publish into the
/// same channels.
#[derive(Debug, Clone)]
pub struct DataStore {
    pub(crate) devices: watch::Sender<Arc<DeviceRegistry>>,
    pub(crate) device_states: watch::Sender<Arc<StateRegistry>>,
    pub(crate) bridge_info: watch::Sender<Arc<BridgeInfo>>,
    commands: mpsc::UnboundedSender<DeviceCommand>,
}

impl DataStore {
    /// Create an empty store plus the receiving end of its command
    /// channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DeviceCommand>) {
        let (devices, _) = watch::channel(Arc::new(DeviceRegistry::new()));
        let (device_states, _) = watch::channel(Arc::new(StateRegistry::new()));
        let (bridge_info, _) = watch::channel(Arc::new(BridgeInfo::default()));
        let (commands, command_rx) = mpsc::unbounded_channel();

        (
            Self {
                devices,
                device_states,
                bridge_info,
                commands,
            },
            command_rx,
        )
    }

    // ── Snapshots (cheap Arc clones) ─────────────────────────────────

    pub fn devices(&self) -> Arc<DeviceRegistry> {
        self.devices.borrow().clone()
    }

    pub fn device_states(&self) -> Arc<StateRegistry> {
        self.device_states.borrow().clone()
    }

    pub fn bridge_info(&self) -> Arc<BridgeInfo> {
        self.bridge_info.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_devices(&self) -> watch::Receiver<Arc<DeviceRegistry>> {
        self.devices.subscribe()
    }

    pub fn subscribe_device_states(&self) -> watch::Receiver<Arc<StateRegistry>> {
        self.device_states.subscribe()
    }

    pub fn subscribe_bridge_info(&self) -> watch::Receiver<Arc<BridgeInfo>> {
        self.bridge_info.subscribe()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Dispatch a device command to whoever drains the channel. The
    /// store does not interpret commands.
    pub fn dispatch(&self, command: DeviceCommand) {
        tracing::debug!(%command, "dispatching device command");
        if self.commands.send(command).is_err() {
            tracing::warn!("device command dropped, receiver is gone");
        }
    }
}
