//! Application core — the session loop and its ports.
//!
//! The pet rules live in [`crate::pet`]; this module decides *when* they
//! run: tick gating, button debounce and redraw scheduling. All
//! interaction with buttons, the display and time happens through the
//! **port traits** defined in [`ports`], keeping this layer testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod session;
