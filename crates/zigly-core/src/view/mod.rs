//! The pure view projection: state snapshots in, rows and column
//! descriptors out. Nothing here touches a terminal.

mod columns;
mod rows;

pub use columns::{ColumnKey, ColumnSpec, SortValue, address_cell, column_set, sort_rows, sort_value};
pub use rows::{DeviceRow, build_rows};
