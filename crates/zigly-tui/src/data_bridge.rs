//! Data bridge — feeds the [`DataStore`] from the snapshot file and
//! forwards store changes into TUI actions.
//!
//! Runs as a background task: loads the snapshot once, pushes initial
//! data so the screen renders immediately, then polls the file's
//! modification time and re-applies on change. Every store-side change
//! is forwarded as an [`Action`] through the TUI's action channel.
//! Shuts down cleanly on cancellation.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use zigly_core::{DataStore, StateSnapshot};

use crate::action::{Action, Notification};

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// Load and apply the snapshot file. A failure keeps the previous
/// state in place and surfaces as a status-line notification.
fn load_and_apply(store: &DataStore, path: &Path, action_tx: &mpsc::UnboundedSender<Action>) {
    match StateSnapshot::load(path) {
        Ok(snap) => store.apply_snapshot(snap),
        Err(error) => {
            warn!(%error, "snapshot load failed, keeping previous state");
            let _ = action_tx.send(Action::Notify(Notification::error(error.to_string())));
        }
    }
}

/// Run the data bridge until cancelled.
pub async fn spawn_data_bridge(
    store: DataStore,
    snapshot_path: PathBuf,
    poll_interval: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut devices = store.subscribe_devices();
    let mut device_states = store.subscribe_device_states();
    let mut bridge_info = store.subscribe_bridge_info();

    // Initial load, then push current snapshots so the screen has data
    // before the first change notification.
    load_and_apply(&store, &snapshot_path, &action_tx);
    let _ = action_tx.send(Action::DevicesUpdated(devices.borrow_and_update().clone()));
    let _ = action_tx.send(Action::DeviceStatesUpdated(
        device_states.borrow_and_update().clone(),
    ));
    let _ = action_tx.send(Action::BridgeInfoUpdated(
        bridge_info.borrow_and_update().clone(),
    ));

    let mut last_modified = modified_at(&snapshot_path);
    let mut poll = tokio::time::interval(poll_interval);
    poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            _ = poll.tick() => {
                let modified = modified_at(&snapshot_path);
                if modified != last_modified {
                    last_modified = modified;
                    debug!(path = %snapshot_path.display(), "snapshot file changed, reloading");
                    load_and_apply(&store, &snapshot_path, &action_tx);
                }
            }

            Ok(()) = devices.changed() => {
                let _ = action_tx.send(Action::DevicesUpdated(devices.borrow_and_update().clone()));
            }
            Ok(()) = device_states.changed() => {
                let _ = action_tx.send(Action::DeviceStatesUpdated(
                    device_states.borrow_and_update().clone(),
                ));
            }
            Ok(()) = bridge_info.changed() => {
                let _ = action_tx.send(Action::BridgeInfoUpdated(
                    bridge_info.borrow_and_update().clone(),
                ));
            }
        }
    }

    debug!("data bridge shut down");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "devices": [
            {"friendly_name": "lamp", "ieee_address": "0x01", "type": "Router"}
        ],
        "device_states": {"lamp": {"linkquality": 120}},
        "bridge_info": {"config": {"advanced": {"last_seen": "epoch"}}}
    }"#;

    #[tokio::test]
    async fn initial_load_produces_all_three_data_actions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let (store, _commands) = DataStore::new();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let bridge = tokio::spawn(spawn_data_bridge(
            store,
            file.path().to_path_buf(),
            Duration::from_millis(50),
            action_tx,
            cancel.clone(),
        ));

        let mut saw_devices = false;
        let mut saw_states = false;
        let mut saw_bridge = false;
        for _ in 0..3 {
            let action = tokio::time::timeout(Duration::from_secs(1), action_rx.recv())
                .await
                .unwrap()
                .unwrap();
            match action {
                Action::DevicesUpdated(devices) => {
                    assert!(devices.contains_key("lamp"));
                    saw_devices = true;
                }
                Action::DeviceStatesUpdated(states) => {
                    assert_eq!(states["lamp"].linkquality, Some(120));
                    saw_states = true;
                }
                Action::BridgeInfoUpdated(_) => saw_bridge = true,
                other => panic!("unexpected action {other:?}"),
            }
        }
        assert!(saw_devices && saw_states && saw_bridge);

        cancel.cancel();
        bridge.await.unwrap();
    }

    #[tokio::test]
    async fn missing_file_surfaces_a_notification() {
        let (store, _commands) = DataStore::new();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let bridge = tokio::spawn(spawn_data_bridge(
            store,
            PathBuf::from("/nonexistent/zigly-snapshot.json"),
            Duration::from_millis(50),
            action_tx,
            cancel.clone(),
        ));

        let action = tokio::time::timeout(Duration::from_secs(1), action_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(action, Action::Notify(_)));

        cancel.cancel();
        bridge.await.unwrap();
    }
}
