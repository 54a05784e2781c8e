// ── Column set builder ──
//
// The column list is data, not layout: each entry names its identity,
// its translated header, and whether (and by what) it sorts. Cell
// rendering belongs to the UI layer, keyed by `ColumnKey`, so the
// conditional column cannot shift what any other column means.

use std::cmp::Ordering;

use crate::fmt::hex4;
use crate::model::{Device, LastSeenMode};

use super::rows::DeviceRow;

/// Stable identity of a device-table column, independent of position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Index,
    Kind,
    FriendlyName,
    IeeeAddress,
    Manufacturer,
    Model,
    Lqi,
    LastSeen,
    Power,
    Controls,
}

/// One column descriptor: identity, header label key, sortability.
///
/// `label_key` resolves through the translation catalog; keys with no
/// entry (`"#"`, `""`) render as themselves, which is exactly the
/// wanted header for the index and controls columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: ColumnKey,
    pub label_key: &'static str,
    pub sortable: bool,
}

impl ColumnSpec {
    const fn new(key: ColumnKey, label_key: &'static str, sortable: bool) -> Self {
        Self {
            key,
            label_key,
            sortable,
        }
    }
}

/// Build the ordered column set for the given last-seen mode.
///
/// Starts from the fixed base list and appends the conditional
/// last-seen entry between LQI and Power when the mode enables it.
pub fn column_set(last_seen: LastSeenMode) -> Vec<ColumnSpec> {
    let mut columns = vec![
        ColumnSpec::new(ColumnKey::Index, "#", false),
        ColumnSpec::new(ColumnKey::Kind, "pic", false),
        ColumnSpec::new(ColumnKey::FriendlyName, "friendly_name", true),
        ColumnSpec::new(ColumnKey::IeeeAddress, "ieee_address", true),
        ColumnSpec::new(ColumnKey::Manufacturer, "manufacturer", true),
        ColumnSpec::new(ColumnKey::Model, "model", true),
        ColumnSpec::new(ColumnKey::Lqi, "lqi", true),
    ];
    if last_seen.is_enabled() {
        columns.push(ColumnSpec::new(ColumnKey::LastSeen, "last_seen", true));
    }
    columns.push(ColumnSpec::new(ColumnKey::Power, "power", true));
    columns.push(ColumnSpec::new(ColumnKey::Controls, "", false));
    columns
}

/// Display string for the address column: `"<ieee> (<hex4>)"`.
pub fn address_cell(device: &Device) -> String {
    format!("{} ({})", device.ieee_address, hex4(device.network_address))
}

/// A column's comparable value for one row. `None` means the datum is
/// unavailable and sorts after everything present.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(i64),
    None,
}

impl SortValue {
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::None, Self::None) => Ordering::Equal,
            (Self::None, _) => Ordering::Greater,
            (_, Self::None) => Ordering::Less,
            // A column never mixes kinds; give mixed input a stable order anyway.
            (Self::Text(_), Self::Number(_)) => Ordering::Less,
            (Self::Number(_), Self::Text(_)) => Ordering::Greater,
        }
    }
}

fn join_pair(a: Option<&str>, b: Option<&str>) -> String {
    format!("{} {}", a.unwrap_or_default(), b.unwrap_or_default())
}

/// Sort accessor for a column. Reads of optional nested fields never
/// fail; they contribute a blank part or `SortValue::None`.
pub fn sort_value(key: ColumnKey, row: &DeviceRow, last_seen: LastSeenMode) -> SortValue {
    let device = &row.device;
    match key {
        ColumnKey::Index | ColumnKey::Kind | ColumnKey::Controls => SortValue::None,
        ColumnKey::FriendlyName => SortValue::Text(device.friendly_name.clone()),
        ColumnKey::IeeeAddress => SortValue::Text(format!(
            "{} {}",
            device.ieee_address,
            hex4(device.network_address)
        )),
        ColumnKey::Manufacturer => SortValue::Text(join_pair(
            device.manufacturer.as_deref(),
            device.definition.as_ref().and_then(|d| d.vendor.as_deref()),
        )),
        ColumnKey::Model => SortValue::Text(join_pair(
            device.model_id.as_deref(),
            device.definition.as_ref().and_then(|d| d.model.as_deref()),
        )),
        ColumnKey::Lqi => row
            .state
            .linkquality
            .map_or(SortValue::None, |lqi| SortValue::Number(i64::from(lqi))),
        ColumnKey::LastSeen => row
            .state
            .last_seen_at(last_seen)
            .map_or(SortValue::None, |at| {
                SortValue::Number(at.timestamp_millis())
            }),
        ColumnKey::Power => SortValue::Text(device.power_source.label().to_owned()),
    }
}

/// Stable in-place sort of the row list by one column.
pub fn sort_rows(rows: &mut [DeviceRow], key: ColumnKey, last_seen: LastSeenMode, descending: bool) {
    rows.sort_by(|a, b| {
        let ord = sort_value(key, a, last_seen).compare(&sort_value(key, b, last_seen));
        if descending { ord.reverse() } else { ord }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Device, DeviceState, LastSeenValue};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn row(json: &str, state: DeviceState) -> DeviceRow {
        let device: Device = serde_json::from_str(json).unwrap();
        DeviceRow {
            id: device.friendly_name.clone(),
            device: Arc::new(device),
            state,
        }
    }

    #[test]
    fn last_seen_column_present_iff_mode_enabled() {
        let with = column_set(LastSeenMode::Epoch);
        let without = column_set(LastSeenMode::Disable);

        assert_eq!(with.len(), 10);
        assert_eq!(without.len(), 9);
        assert!(with.iter().any(|c| c.key == ColumnKey::LastSeen));
        assert!(!without.iter().any(|c| c.key == ColumnKey::LastSeen));
    }

    #[test]
    fn conditional_column_does_not_shift_neighbours() {
        for mode in [LastSeenMode::Epoch, LastSeenMode::Disable] {
            let columns = column_set(mode);
            assert_eq!(columns.first().unwrap().key, ColumnKey::Index);
            assert_eq!(
                columns[columns.len() - 2].key,
                ColumnKey::Power,
                "power column keeps its identity under mode {mode:?}"
            );
            assert_eq!(columns.last().unwrap().key, ColumnKey::Controls);
        }
    }

    #[test]
    fn index_kind_and_controls_are_not_sortable() {
        for column in column_set(LastSeenMode::Epoch) {
            let fixed = matches!(
                column.key,
                ColumnKey::Index | ColumnKey::Kind | ColumnKey::Controls
            );
            assert_eq!(column.sortable, !fixed);
        }
    }

    #[test]
    fn address_cell_formats_hex4() {
        let r = row(
            r#"{"friendly_name": "a", "ieee_address": "0x00158d0001e2a3b4",
                "network_address": 11}"#,
            DeviceState::default(),
        );
        assert_eq!(address_cell(&r.device), "0x00158d0001e2a3b4 (000B)");
    }

    #[test]
    fn manufacturer_sort_key_concatenates_with_fallback_blanks() {
        let both = row(
            r#"{"friendly_name": "a", "ieee_address": "0x01", "manufacturer": "LUMI",
                "definition": {"vendor": "Aqara"}}"#,
            DeviceState::default(),
        );
        let bare = row(
            r#"{"friendly_name": "b", "ieee_address": "0x02", "manufacturer": "LUMI"}"#,
            DeviceState::default(),
        );

        assert_eq!(
            sort_value(ColumnKey::Manufacturer, &both, LastSeenMode::Epoch),
            SortValue::Text("LUMI Aqara".into())
        );
        assert_eq!(
            sort_value(ColumnKey::Manufacturer, &bare, LastSeenMode::Epoch),
            SortValue::Text("LUMI ".into())
        );
    }

    #[test]
    fn rows_without_lqi_sort_last() {
        let strong = row(
            r#"{"friendly_name": "strong", "ieee_address": "0x01"}"#,
            DeviceState {
                linkquality: Some(200),
                ..DeviceState::default()
            },
        );
        let weak = row(
            r#"{"friendly_name": "weak", "ieee_address": "0x02"}"#,
            DeviceState {
                linkquality: Some(20),
                ..DeviceState::default()
            },
        );
        let silent = row(
            r#"{"friendly_name": "silent", "ieee_address": "0x03"}"#,
            DeviceState::default(),
        );

        let mut rows = vec![silent, strong, weak];
        sort_rows(&mut rows, ColumnKey::Lqi, LastSeenMode::Epoch, false);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["weak", "strong", "silent"]);
    }

    #[test]
    fn last_seen_sorts_by_resolved_timestamp() {
        let older = row(
            r#"{"friendly_name": "older", "ieee_address": "0x01"}"#,
            DeviceState {
                last_seen: Some(LastSeenValue::Millis(1_000)),
                ..DeviceState::default()
            },
        );
        let newer = row(
            r#"{"friendly_name": "newer", "ieee_address": "0x02"}"#,
            DeviceState {
                last_seen: Some(LastSeenValue::Millis(2_000)),
                ..DeviceState::default()
            },
        );

        let mut rows = vec![newer, older];
        sort_rows(&mut rows, ColumnKey::LastSeen, LastSeenMode::Epoch, true);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["newer", "older"]);
    }
}
