// ── Row projection ──

use std::sync::Arc;

use crate::model::{Device, DeviceState};
use crate::store::{DeviceRegistry, StateRegistry};

/// One display row of the device table. Recomputed on every projection
/// pass; carries no identity beyond the device's friendly name.
#[derive(Debug, Clone)]
pub struct DeviceRow {
    /// Equals `device.friendly_name`.
    pub id: String,
    pub device: Arc<Device>,
    pub state: DeviceState,
}

/// Project the registries into display rows.
///
/// Pure function of its two inputs: preserves registry order, skips
/// coordinator devices, and substitutes the empty state for devices
/// with no telemetry yet.
pub fn build_rows(devices: &DeviceRegistry, states: &StateRegistry) -> Vec<DeviceRow> {
    devices
        .values()
        .filter(|device| !device.device_type.is_coordinator())
        .map(|device| {
            let state = states
                .get(&device.friendly_name)
                .cloned()
                .unwrap_or_default();
            DeviceRow {
                id: device.friendly_name.clone(),
                device: Arc::clone(device),
                state,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::DeviceState;
    use pretty_assertions::assert_eq;

    fn registry(entries: &[(&str, &str)]) -> DeviceRegistry {
        entries
            .iter()
            .map(|(name, kind)| {
                let device: Device = serde_json::from_str(&format!(
                    r#"{{"friendly_name": "{name}", "ieee_address": "0x{name}", "type": "{kind}"}}"#
                ))
                .unwrap();
                ((*name).to_owned(), Arc::new(device))
            })
            .collect()
    }

    #[test]
    fn excludes_coordinators_keeps_registry_order() {
        let devices = registry(&[
            ("lamp", "Router"),
            ("Coordinator", "Coordinator"),
            ("motion", "EndDevice"),
            ("plug", "Router"),
        ]);
        let rows = build_rows(&devices, &StateRegistry::new());

        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["lamp", "motion", "plug"]);
    }

    #[test]
    fn row_id_equals_friendly_name() {
        let devices = registry(&[("lamp", "Router")]);
        let rows = build_rows(&devices, &StateRegistry::new());
        assert_eq!(rows[0].id, rows[0].device.friendly_name);
    }

    #[test]
    fn missing_state_becomes_empty_record() {
        let devices = registry(&[("lamp", "Router"), ("motion", "EndDevice")]);
        let mut states = StateRegistry::new();
        states.insert(
            "motion".into(),
            DeviceState {
                linkquality: Some(100),
                ..DeviceState::default()
            },
        );

        let rows = build_rows(&devices, &states);
        assert_eq!(rows[0].state, DeviceState::default());
        assert_eq!(rows[1].state.linkquality, Some(100));
    }

    #[test]
    fn empty_registry_projects_no_rows() {
        let rows = build_rows(&DeviceRegistry::new(), &StateRegistry::new());
        assert!(rows.is_empty());
    }
}
