//! All possible UI actions. Actions are the sole mechanism for state
//! mutation inside the TUI; data flows in as actions, device commands
//! flow out through the store's command channel.

use std::sync::Arc;

use zigly_core::view::ColumnKey;
use zigly_core::{BridgeInfo, DeviceRegistry, StateRegistry};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A toast shown in the status line.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Data Events (from the store's watch streams) ───────────────
    DevicesUpdated(Arc<DeviceRegistry>),
    DeviceStatesUpdated(Arc<StateRegistry>),
    BridgeInfoUpdated(Arc<BridgeInfo>),

    // ── Device Navigation ──────────────────────────────────────────
    OpenDeviceDetail(String),
    CloseDetail,

    // ── Table Operations ───────────────────────────────────────────
    SortColumn(ColumnKey),

    // ── Device Commands (pass-through, not interpreted here) ───────
    RequestRemove { friendly_name: String, force: bool },
    RequestConfigure(String),
    RequestInterview(String),

    // ── Help / Notifications ───────────────────────────────────────
    ToggleHelp,
    Notify(Notification),
    DismissNotification,
}
