//! Screen implementations. The device table is the primary screen.

pub mod devices;
