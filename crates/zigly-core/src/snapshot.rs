//! The consumed state shape: one JSON document holding everything the
//! dashboard reads, byte-compatible with the bridge's published
//! payloads (`bridge/devices` array, per-device states, `bridge/info`).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{BridgeInfo, Device, DeviceState};

/// A full state snapshot as produced by whatever fetched it (MQTT
/// subscriber, bridge export, test fixture). Device order is the
/// bridge's publication order and is preserved end to end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    pub devices: Vec<Device>,
    pub device_states: HashMap<String, DeviceState>,
    pub bridge_info: BridgeInfo,
}

impl StateSnapshot {
    /// Read and decode a snapshot file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CoreError::SnapshotDecode {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "devices": [
            {"friendly_name": "Coordinator", "ieee_address": "0x00124b0023a1ff02",
             "network_address": 0, "type": "Coordinator"},
            {"friendly_name": "hall_motion", "ieee_address": "0x00158d000312ac01",
             "network_address": 4134, "type": "EndDevice", "power_source": "Battery",
             "manufacturer": "LUMI", "model_id": "lumi.sensor_motion.aq2",
             "definition": {"vendor": "Aqara", "model": "RTCGQ11LM"}}
        ],
        "device_states": {
            "hall_motion": {"linkquality": 156, "battery": 91, "last_seen": 1700000000000}
        },
        "bridge_info": {
            "version": "1.36.1",
            "config": {"advanced": {"last_seen": "epoch"}}
        }
    }"#;

    #[test]
    fn loads_fixture_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let snap = StateSnapshot::load(file.path()).unwrap();
        assert_eq!(snap.devices.len(), 2);
        assert_eq!(snap.devices[1].friendly_name, "hall_motion");
        assert_eq!(
            snap.device_states["hall_motion"].linkquality,
            Some(156)
        );
        assert_eq!(snap.bridge_info.version.as_deref(), Some("1.36.1"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = StateSnapshot::load(Path::new("/nonexistent/zigly.json")).unwrap_err();
        assert!(matches!(err, CoreError::SnapshotRead { .. }));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = StateSnapshot::load(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::SnapshotDecode { .. }));
    }

    #[test]
    fn empty_document_is_a_valid_empty_snapshot() {
        let snap: StateSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snap.devices.is_empty());
        assert!(snap.device_states.is_empty());
    }
}
