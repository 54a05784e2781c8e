//! State layer and view projection for the zigly terminal dashboard.
//!
//! This crate owns everything below the terminal:
//!
//! - **Domain model** ([`model`]) — serde types matching the bridge's
//!   published payload shapes (`Device`, `DeviceState`, `BridgeInfo`),
//!   tolerant of missing and unrecognized fields.
//!
//! - **[`DataStore`]** — the shared state container: three slices
//!   (ordered device registry, runtime-state registry, bridge info)
//!   published as immutable snapshots over `tokio::sync::watch`.
//!   [`DataStore::apply_snapshot`] ingests a [`StateSnapshot`]; device
//!   commands flow back through an `mpsc` channel the embedder drains.
//!
//! - **View projection** ([`view`]) — pure functions from snapshots to
//!   display data: [`view::build_rows`] (coordinator exclusion,
//!   empty-state substitution, order preservation) and
//!   [`view::column_set`] (the fixed column list plus the conditional
//!   last-seen column). UI layers render these; they never compute
//!   them.
//!
//! - **Ambient pieces** — translation catalog ([`i18n`]), navigation
//!   links ([`links`]), formatting helpers ([`fmt`]), and the
//!   [`CoreError`] taxonomy.

pub mod command;
pub mod error;
pub mod fmt;
pub mod i18n;
pub mod links;
pub mod model;
pub mod snapshot;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::DeviceCommand;
pub use error::CoreError;
pub use snapshot::StateSnapshot;
pub use store::{DataStore, DeviceRegistry, StateRegistry};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    BridgeConfig,
    BridgeInfo,
    CoordinatorInfo,
    Device,
    DeviceDefinition,
    DeviceState,
    DeviceType,
    LastSeenMode,
    LastSeenValue,
    PowerSource,
};
