// ── Snapshot application ──
//
// Rebuilds each slice from an incoming snapshot in one atomic publish,
// so subscribers never observe a transient empty registry between
// "old devices gone" and "new devices inserted".

use std::sync::Arc;

use super::{DataStore, DeviceRegistry};
use crate::snapshot::StateSnapshot;

impl DataStore {
    /// Apply a full state snapshot.
    ///
    /// The device registry is rebuilt in the snapshot's publication
    /// order; devices absent from the snapshot are pruned. An entry
    /// whose payload is unchanged keeps its `Arc` identity, so
    /// subscribers can skip re-deriving per-device data cheaply.
    pub fn apply_snapshot(&self, snap: StateSnapshot) {
        let StateSnapshot {
            devices,
            device_states,
            bridge_info,
        } = snap;

        let prev = self.devices.borrow().clone();
        let mut next = DeviceRegistry::with_capacity(devices.len());
        for device in devices {
            let key = device.friendly_name.clone();
            let entry = match prev.get(&key) {
                Some(existing) if existing.as_ref() == &device => Arc::clone(existing),
                _ => Arc::new(device),
            };
            next.insert(key, entry);
        }

        tracing::debug!(
            devices = next.len(),
            states = device_states.len(),
            "applying state snapshot"
        );

        self.devices.send_modify(|current| *current = Arc::new(next));
        self.device_states
            .send_modify(|current| *current = Arc::new(device_states));
        self.bridge_info
            .send_modify(|current| *current = Arc::new(bridge_info));
    }
}
