//! Devices screen — the sortable device table.
//!
//! Two view states, re-evaluated every render: an empty device
//! registry shows a centered spinner until data arrives; a non-empty
//! registry shows the table built from the column set and the row
//! projection. Sorting is keyed by column identity, selection opens a
//! per-device detail panel, and command keys dispatch operations this
//! screen never interprets.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

use zigly_core::i18n::Catalog;
use zigly_core::view::{ColumnKey, ColumnSpec, DeviceRow, address_cell, build_rows, column_set, sort_rows};
use zigly_core::{BridgeInfo, DeviceRegistry, LastSeenMode, StateRegistry, links};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{lqi, power, time_fmt};

/// Active sort: column identity plus direction. Keyed by `ColumnKey`,
/// so toggling the conditional last-seen column never changes what is
/// being sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sort {
    key: ColumnKey,
    descending: bool,
}

pub struct DevicesScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    devices: Arc<DeviceRegistry>,
    device_states: Arc<StateRegistry>,
    bridge_info: Arc<BridgeInfo>,
    catalog: Catalog,
    frontend_url: Option<Url>,
    table_state: TableState,
    sort: Option<Sort>,
    rows: Vec<DeviceRow>,
    detail_open: bool,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl DevicesScreen {
    pub fn new(frontend_url: Option<Url>) -> Self {
        Self {
            focused: false,
            action_tx: None,
            devices: Arc::new(DeviceRegistry::new()),
            device_states: Arc::new(StateRegistry::new()),
            bridge_info: Arc::new(BridgeInfo::default()),
            catalog: Catalog::english(),
            frontend_url,
            table_state: TableState::default(),
            sort: None,
            rows: Vec::new(),
            detail_open: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn last_seen_mode(&self) -> LastSeenMode {
        self.bridge_info.last_seen_mode()
    }

    /// Re-project rows from the current snapshots and apply the active
    /// sort. Falls back to sorting by name if the active sort column
    /// left the column set (last-seen switched to `disable`).
    fn recompute_rows(&mut self) {
        let mode = self.last_seen_mode();
        if let Some(sort) = self.sort {
            let present = column_set(mode)
                .iter()
                .any(|c| c.key == sort.key && c.sortable);
            if !present {
                self.sort = Some(Sort {
                    key: ColumnKey::FriendlyName,
                    descending: false,
                });
            }
        }

        let mut rows = build_rows(&self.devices, &self.device_states);
        if let Some(Sort { key, descending }) = self.sort {
            sort_rows(&mut rows, key, mode, descending);
        }
        self.rows = rows;

        if !self.rows.is_empty() && self.selected_index() >= self.rows.len() {
            self.select(self.rows.len() - 1);
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_row(&self) -> Option<&DeviceRow> {
        self.rows.get(self.selected_index())
    }

    fn select(&mut self, idx: usize) {
        let clamped = if self.rows.is_empty() {
            0
        } else {
            idx.min(self.rows.len() - 1)
        };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let current = self.selected_index() as isize;
        let next = (current + delta).clamp(0, self.rows.len() as isize - 1);
        self.select(next as usize);
    }

    /// Cycle the sort through the currently present sortable columns,
    /// ending back at registry order.
    fn cycle_sort(&mut self) {
        let sortable: Vec<ColumnKey> = column_set(self.last_seen_mode())
            .into_iter()
            .filter(|c| c.sortable)
            .map(|c| c.key)
            .collect();

        self.sort = match self.sort {
            None => sortable.first().map(|&key| Sort {
                key,
                descending: false,
            }),
            Some(Sort { key, .. }) => sortable
                .iter()
                .position(|&k| k == key)
                .and_then(|i| sortable.get(i + 1))
                .map(|&key| Sort {
                    key,
                    descending: false,
                }),
        };
        self.recompute_rows();
    }

    fn reverse_sort(&mut self) {
        if let Some(sort) = &mut self.sort {
            sort.descending = !sort.descending;
        }
        self.recompute_rows();
    }

    fn command_for_selected(&self, make: impl Fn(String) -> Action) -> Option<Action> {
        self.selected_row().map(|row| make(row.id.clone()))
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let vertical = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
        let horizontal = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(24),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

        let label = format!("{}…", self.catalog.label("loading"));
        let throbber = throbber_widgets_tui::Throbber::default()
            .label(label)
            .style(Style::default().fg(theme::DIM_WHITE))
            .throbber_style(Style::default().fg(theme::HONEY_AMBER));
        frame.render_stateful_widget(throbber, horizontal[1], &mut self.throbber_state.clone());
    }

    fn header_cell(&self, spec: &ColumnSpec) -> Cell<'_> {
        let label = self.catalog.label(spec.label_key);
        match self.sort {
            Some(Sort { key, descending }) if key == spec.key => {
                let arrow = if descending { "↓" } else { "↑" };
                Cell::from(format!("{label} {arrow}")).style(theme::table_header_sorted())
            }
            _ => Cell::from(label.to_owned()).style(theme::table_header()),
        }
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn data_cell(&self, spec: &ColumnSpec, idx: usize, row: &DeviceRow) -> Cell<'_> {
        let device = &row.device;
        match spec.key {
            ColumnKey::Index => Cell::from((idx + 1).to_string()).style(
                Style::default()
                    .fg(theme::BORDER_GRAY)
                    .add_modifier(Modifier::BOLD),
            ),
            ColumnKey::Kind => {
                let mut kind = device.device_type.glyph().to_owned();
                if device.disabled {
                    kind.push_str(" ✗");
                } else if !device.interview_completed {
                    kind.push_str(" …");
                }
                let color = if device.disabled {
                    theme::BORDER_GRAY
                } else {
                    theme::SIGNAL_VIOLET
                };
                Cell::from(kind).style(Style::default().fg(color))
            }
            ColumnKey::FriendlyName => {
                Cell::from(device.friendly_name.clone()).style(Style::default().fg(theme::MESH_TEAL))
            }
            ColumnKey::IeeeAddress => {
                Cell::from(address_cell(device)).style(Style::default().fg(theme::SIGNAL_VIOLET))
            }
            ColumnKey::Manufacturer => Cell::from(device.vendor().unwrap_or("─").to_owned()),
            ColumnKey::Model => Cell::from(device.model().unwrap_or("─").to_owned()),
            ColumnKey::Lqi => Cell::from(Line::from(lqi::lqi_span(row.state.linkquality))),
            ColumnKey::LastSeen => {
                let cell = row.state.last_seen_at(self.last_seen_mode()).map_or_else(
                    || "─".to_owned(),
                    |at| {
                        let secs = Utc::now().signed_duration_since(at).num_seconds().max(0) as u64;
                        time_fmt::fmt_ago(secs)
                    },
                );
                Cell::from(cell)
            }
            ColumnKey::Power => Cell::from(Line::from(power::power_span(
                device.power_source,
                row.state.battery,
                row.state.battery_low,
            ))),
            ColumnKey::Controls => Cell::from("x c i").style(theme::key_hint()),
        }
    }

    fn column_width(key: ColumnKey) -> Constraint {
        match key {
            ColumnKey::Index => Constraint::Length(3),
            ColumnKey::Kind => Constraint::Length(4),
            ColumnKey::FriendlyName => Constraint::Fill(2),
            ColumnKey::IeeeAddress => Constraint::Length(26),
            ColumnKey::Manufacturer | ColumnKey::Model => Constraint::Fill(1),
            ColumnKey::Lqi => Constraint::Length(9),
            ColumnKey::LastSeen => Constraint::Length(10),
            ColumnKey::Power => Constraint::Length(20),
            ColumnKey::Controls => Constraint::Length(6),
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(area);

        let columns = column_set(self.last_seen_mode());
        let header = Row::new(columns.iter().map(|spec| self.header_cell(spec)));

        let selected_idx = self.selected_index();
        let rows = self.rows.iter().enumerate().map(|(i, row)| {
            let cells = columns.iter().map(|spec| self.data_cell(spec, i, row));
            let style = if i == selected_idx && self.focused {
                theme::table_selected()
            } else {
                theme::table_row()
            };
            Row::new(cells).style(style)
        });

        let widths: Vec<Constraint> = columns.iter().map(|c| Self::column_width(c.key)).collect();
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, layout[0], &mut state);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("s ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("S ", theme::key_hint_key()),
            Span::styled("reverse  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("detail  ", theme::key_hint()),
            Span::styled("x ", theme::key_hint_key()),
            Span::styled("remove  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("configure  ", theme::key_hint()),
            Span::styled("i ", theme::key_hint_key()),
            Span::styled("interview", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn render_detail(&self, frame: &mut Frame, area: Rect, row: &DeviceRow) {
        let device = &row.device;
        let model = device.model().unwrap_or("─");
        let title = format!(
            " {}  ·  {}  ·  {} ",
            device.friendly_name, model, device.ieee_address
        );
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let detail_layout =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let vendor = device.vendor().unwrap_or("─");
        let description = device
            .definition
            .as_ref()
            .and_then(|d| d.description.as_deref())
            .unwrap_or("─");
        let address = address_cell(device);
        let last_seen = row.state.last_seen_at(self.last_seen_mode()).map_or_else(
            || "─".to_owned(),
            |at| {
                let secs = Utc::now().signed_duration_since(at).num_seconds().max(0) as u64;
                format!("{} ago", humantime::format_duration(Duration::from_secs(secs)))
            },
        );
        let vendor_link = device
            .vendor()
            .map_or_else(|| "─".to_owned(), |v| links::vendor_url(v).to_string());
        let model_link = device
            .model()
            .map_or_else(|| "─".to_owned(), |m| links::model_url(m).to_string());
        let page = self.frontend_url.as_ref().map_or_else(
            || links::device_details_path(&device.ieee_address),
            |base| links::device_details_url(base, &device.ieee_address).to_string(),
        );

        let field = |label: &'static str, value: String, color| {
            Line::from(vec![
                Span::styled(format!("  {label:<14}"), Style::default().fg(theme::DIM_WHITE)),
                Span::styled(value, Style::default().fg(color)),
            ])
        };

        let supported = if device.supported { "yes" } else { "no" };

        let lines = vec![
            Line::from(""),
            field("Address", address, theme::SIGNAL_VIOLET),
            field("Vendor", vendor.to_owned(), theme::MESH_TEAL),
            field("Model", model.to_owned(), theme::MESH_TEAL),
            field("Description", description.to_owned(), theme::DIM_WHITE),
            field("Supported", supported.to_owned(), theme::DIM_WHITE),
            Line::from(vec![
                Span::styled("  Power         ", Style::default().fg(theme::DIM_WHITE)),
                power::power_span(device.power_source, row.state.battery, row.state.battery_low),
                Span::styled("       LQI  ", Style::default().fg(theme::DIM_WHITE)),
                lqi::lqi_span(row.state.linkquality),
            ]),
            field("Last seen", last_seen, theme::MESH_TEAL),
            field("Vendor page", vendor_link, theme::BORDER_GRAY),
            field("Model page", model_link, theme::BORDER_GRAY),
            field("Device page", page, theme::BORDER_GRAY),
        ];
        frame.render_widget(Paragraph::new(lines), detail_layout[0]);

        let hints = Line::from(vec![
            Span::styled("  x ", theme::key_hint_key()),
            Span::styled("remove  ", theme::key_hint()),
            Span::styled("X ", theme::key_hint_key()),
            Span::styled("force-remove  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("configure  ", theme::key_hint()),
            Span::styled("i ", theme::key_hint_key()),
            Span::styled("interview  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), detail_layout[1]);
    }
}

impl Component for DevicesScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.detail_open {
            return match key.code {
                KeyCode::Esc => {
                    self.detail_open = false;
                    Ok(Some(Action::CloseDetail))
                }
                KeyCode::Char('x') => Ok(self.command_for_selected(|friendly_name| {
                    Action::RequestRemove {
                        friendly_name,
                        force: false,
                    }
                })),
                KeyCode::Char('X') => Ok(self.command_for_selected(|friendly_name| {
                    Action::RequestRemove {
                        friendly_name,
                        force: true,
                    }
                })),
                KeyCode::Char('c') => Ok(self.command_for_selected(Action::RequestConfigure)),
                KeyCode::Char('i') => Ok(self.command_for_selected(Action::RequestInterview)),
                _ => Ok(None),
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') => {
                if !self.rows.is_empty() {
                    self.select(self.rows.len() - 1);
                }
                Ok(None)
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
                Ok(None)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
                Ok(None)
            }
            KeyCode::Char('s') => {
                self.cycle_sort();
                Ok(None)
            }
            KeyCode::Char('S') => {
                self.reverse_sort();
                Ok(None)
            }
            KeyCode::Enter => {
                let id = self.selected_row().map(|row| row.id.clone());
                if let Some(id) = id {
                    self.detail_open = true;
                    Ok(Some(Action::OpenDeviceDetail(id)))
                } else {
                    Ok(None)
                }
            }
            KeyCode::Char('x') => Ok(self.command_for_selected(|friendly_name| {
                Action::RequestRemove {
                    friendly_name,
                    force: false,
                }
            })),
            KeyCode::Char('c') => Ok(self.command_for_selected(Action::RequestConfigure)),
            KeyCode::Char('i') => Ok(self.command_for_selected(Action::RequestInterview)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DevicesUpdated(devices) => {
                self.devices = Arc::clone(devices);
                self.recompute_rows();
            }
            Action::DeviceStatesUpdated(states) => {
                self.device_states = Arc::clone(states);
                self.recompute_rows();
            }
            Action::BridgeInfoUpdated(info) => {
                self.bridge_info = Arc::clone(info);
                self.recompute_rows();
            }
            Action::SortColumn(key) => {
                self.sort = Some(Sort {
                    key: *key,
                    descending: false,
                });
                self.recompute_rows();
            }
            Action::CloseDetail => {
                self.detail_open = false;
            }
            Action::Tick => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" {} ({}) ", self.catalog.label("devices"), self.rows.len());
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Loading until the registry has any device at all; rows may
        // legitimately be empty (coordinator-only network) and still
        // render as an empty table.
        if self.devices.is_empty() {
            self.render_loading(frame, inner);
            return;
        }

        let (table_area, detail_area) = if self.detail_open {
            let chunks =
                Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(inner);
            (chunks[0], Some(chunks[1]))
        } else {
            (inner, None)
        };

        self.render_table(frame, table_area);

        if let Some(detail_area) = detail_area {
            if let Some(row) = self.selected_row() {
                self.render_detail(frame, detail_area, row);
            }
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Devices"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use zigly_core::{Device, DeviceState, LastSeenValue};

    fn device(name: &str, kind: &str) -> Arc<zigly_core::Device> {
        let device: Device = serde_json::from_str(&format!(
            r#"{{"friendly_name": "{name}", "ieee_address": "0x{name}",
                "network_address": 11, "type": "{kind}",
                "manufacturer": "LUMI", "model_id": "lumi.sensor",
                "power_source": "Battery"}}"#
        ))
        .unwrap();
        Arc::new(device)
    }

    fn bridge_info(mode: &str) -> Arc<BridgeInfo> {
        Arc::new(
            serde_json::from_str(&format!(
                r#"{{"config": {{"advanced": {{"last_seen": "{mode}"}}}}}}"#
            ))
            .unwrap(),
        )
    }

    fn screen_with(devices: &[(&str, &str)], mode: &str) -> DevicesScreen {
        let registry: DeviceRegistry = devices
            .iter()
            .map(|(name, kind)| ((*name).to_owned(), device(name, kind)))
            .collect();

        let mut screen = DevicesScreen::new(None);
        screen.devices = Arc::new(registry);
        screen.bridge_info = bridge_info(mode);
        screen.recompute_rows();
        screen
    }

    fn render_to_text(screen: &DevicesScreen, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.cell((x, y)).map_or(" ", |c| c.symbol()));
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn empty_registry_renders_spinner_not_table() {
        let screen = screen_with(&[], "epoch");
        let text = render_to_text(&screen, 160, 24);
        assert!(text.contains("Loading"));
        assert!(!text.contains("Friendly name"));
    }

    #[test]
    fn loaded_registry_renders_every_header_and_the_row() {
        let screen = screen_with(&[("kitchen_bulb", "Router")], "epoch");
        let text = render_to_text(&screen, 170, 24);

        for header in [
            "Pic",
            "Friendly name",
            "IEEE address",
            "Manufacturer",
            "Model",
            "LQI",
            "Last seen",
            "Power",
        ] {
            assert!(text.contains(header), "missing header {header}");
        }
        assert!(text.contains("kitchen_bulb"));
        assert!(text.contains("(000B)"));
        assert!(!text.contains("Loading"));
    }

    #[test]
    fn disable_mode_drops_the_last_seen_header() {
        let screen = screen_with(&[("kitchen_bulb", "Router")], "disable");
        let text = render_to_text(&screen, 170, 24);
        assert!(!text.contains("Last seen"));
        assert!(text.contains("Friendly name"));
    }

    #[test]
    fn coordinator_is_excluded_from_rows() {
        let screen = screen_with(
            &[("Coordinator", "Coordinator"), ("lamp", "Router")],
            "epoch",
        );
        assert_eq!(screen.rows.len(), 1);
        assert_eq!(screen.rows[0].id, "lamp");

        let text = render_to_text(&screen, 170, 24);
        assert!(text.contains("Devices (1)"));
    }

    #[test]
    fn sort_falls_back_when_its_column_vanishes() {
        let mut screen = screen_with(&[("a", "Router"), ("b", "Router")], "epoch");
        screen.sort = Some(Sort {
            key: ColumnKey::LastSeen,
            descending: true,
        });
        screen.recompute_rows();
        assert_eq!(screen.sort.unwrap().key, ColumnKey::LastSeen);

        screen
            .update(&Action::BridgeInfoUpdated(bridge_info("disable")))
            .unwrap();
        assert_eq!(screen.sort.unwrap().key, ColumnKey::FriendlyName);
    }

    #[test]
    fn sort_cycle_walks_sortable_columns_and_wraps_to_registry_order() {
        let mut screen = screen_with(&[("b", "Router"), ("a", "Router")], "disable");
        assert!(screen.sort.is_none());

        screen.cycle_sort();
        assert_eq!(screen.sort.unwrap().key, ColumnKey::FriendlyName);
        assert_eq!(screen.rows[0].id, "a");

        // Walk through the remaining sortable columns, then wrap to None.
        for _ in 0..6 {
            screen.cycle_sort();
        }
        assert!(screen.sort.is_none());
        assert_eq!(screen.rows[0].id, "b");
    }

    #[test]
    fn sorting_by_last_seen_orders_by_timestamp() {
        let mut screen = screen_with(&[("old", "Router"), ("new", "Router")], "epoch");
        let mut states = StateRegistry::new();
        states.insert(
            "old".into(),
            DeviceState {
                last_seen: Some(LastSeenValue::Millis(1_000)),
                ..DeviceState::default()
            },
        );
        states.insert(
            "new".into(),
            DeviceState {
                last_seen: Some(LastSeenValue::Millis(2_000)),
                ..DeviceState::default()
            },
        );
        screen
            .update(&Action::DeviceStatesUpdated(Arc::new(states)))
            .unwrap();

        screen.sort = Some(Sort {
            key: ColumnKey::LastSeen,
            descending: true,
        });
        screen.recompute_rows();
        assert_eq!(screen.rows[0].id, "new");
    }

    #[test]
    fn command_keys_emit_pass_through_actions() {
        let mut screen = screen_with(&[("lamp", "Router")], "epoch");
        screen.select(0);

        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('x')))
            .unwrap();
        assert!(matches!(
            action,
            Some(Action::RequestRemove { friendly_name, force: false }) if friendly_name == "lamp"
        ));

        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('c')))
            .unwrap();
        assert!(matches!(
            action,
            Some(Action::RequestConfigure(name)) if name == "lamp"
        ));
    }

    #[test]
    fn enter_opens_detail_for_the_selected_device() {
        let mut screen = screen_with(&[("lamp", "Router")], "epoch");
        screen.select(0);

        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap();
        assert!(matches!(
            action,
            Some(Action::OpenDeviceDetail(id)) if id == "lamp"
        ));
        assert!(screen.detail_open);

        let text = render_to_text(&screen, 170, 40);
        assert!(text.contains("Device page"));
        assert!(text.contains("/device/0xlamp"));
    }
}
