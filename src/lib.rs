//! co2bird firmware library.
//!
//! Exposes the pure-logic modules and the `embedded-hal` drivers for
//! integration testing on the host.  All ESP-IDF-specific code is guarded
//! by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod error;
pub mod indicator;
pub mod pins;
pub mod reading;
pub mod scheduler;
pub mod sound;

pub mod adapters;
pub mod drivers;
pub mod sensors;
