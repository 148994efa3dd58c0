//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the monitor loop: sensor acquisition, indicator
//! mapping, the alarm state machine and ambient sound scheduling.  All
//! interaction with hardware, time and randomness happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod events;
pub mod ports;
pub mod service;
