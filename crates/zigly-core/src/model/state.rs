// ── Device runtime state (telemetry) ──

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::bridge::LastSeenMode;

/// Raw last-seen value as the bridge publishes it: epoch milliseconds
/// under `epoch` mode, an ISO-8601 string under the `ISO_8601` modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LastSeenValue {
    Millis(i64),
    Text(String),
}

/// Live telemetry for a single device, keyed by friendly name.
///
/// Every field is optional: a device that has not reported since the
/// bridge started has no state at all, and the empty record is the
/// substitute (never an error). Attributes the dashboard does not
/// interpret are kept in `extra` so a round-trip loses nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceState {
    pub linkquality: Option<u16>,
    pub last_seen: Option<LastSeenValue>,
    pub battery: Option<f64>,
    pub battery_low: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DeviceState {
    /// Resolve the last-seen timestamp for the configured display mode.
    ///
    /// Returns `None` when the mode is `disable`, the value is absent,
    /// or the raw value does not parse -- missing data, not an error.
    pub fn last_seen_at(&self, mode: LastSeenMode) -> Option<DateTime<Utc>> {
        if !mode.is_enabled() {
            return None;
        }
        match self.last_seen.as_ref()? {
            LastSeenValue::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            LastSeenValue::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn epoch_millis_resolve_to_utc() {
        let state: DeviceState =
            serde_json::from_str(r#"{"linkquality": 120, "last_seen": 1700000000000}"#).unwrap();
        let at = state.last_seen_at(LastSeenMode::Epoch).unwrap();
        assert_eq!(at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn iso_strings_resolve_with_offset() {
        let state: DeviceState =
            serde_json::from_str(r#"{"last_seen": "2024-03-01T12:00:00+01:00"}"#).unwrap();
        let at = state.last_seen_at(LastSeenMode::Iso8601Local).unwrap();
        assert_eq!(at.to_rfc3339(), "2024-03-01T11:00:00+00:00");
    }

    #[test]
    fn disable_mode_yields_none_even_with_data() {
        let state = DeviceState {
            last_seen: Some(LastSeenValue::Millis(1_700_000_000_000)),
            ..DeviceState::default()
        };
        assert_eq!(state.last_seen_at(LastSeenMode::Disable), None);
    }

    #[test]
    fn unparseable_text_is_missing_data() {
        let state = DeviceState {
            last_seen: Some(LastSeenValue::Text("yesterday-ish".into())),
            ..DeviceState::default()
        };
        assert_eq!(state.last_seen_at(LastSeenMode::Iso8601), None);
    }

    #[test]
    fn unknown_attributes_land_in_extra() {
        let state: DeviceState = serde_json::from_str(
            r#"{"linkquality": 84, "battery": 97.5, "battery_low": false,
                "temperature": 21.3, "occupancy": true}"#,
        )
        .unwrap();
        assert_eq!(state.linkquality, Some(84));
        assert_eq!(state.battery, Some(97.5));
        assert_eq!(state.extra.len(), 2);
        assert!(state.extra.contains_key("occupancy"));
    }
}
