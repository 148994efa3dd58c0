//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).  The
//! per-tick `Reading` line is the serial status output.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                variant,
                pressure_compensation,
            } => {
                info!(
                    "START | variant={:?} | pressure_compensation={}",
                    variant,
                    if *pressure_compensation { "on" } else { "off" }
                );
            }
            AppEvent::Co2SensorMissing(e) => {
                error!("SENSOR | CO2 sensor missing ({})", e);
            }
            AppEvent::PressureSensorMissing(e) => {
                warn!("SENSOR | pressure sensor missing ({})", e);
            }
            AppEvent::Reading(r) => {
                info!("CO2: {}", r);
            }
            AppEvent::Alarm {
                transition,
                co2_ppm,
            } => {
                info!("ALARM | {:?} at {} ppm", transition, co2_ppm);
            }
            AppEvent::SoundPlayed { burst, next_in_ms } => {
                info!(
                    "SOUND | {} rep | {} sweeps | {} ms paused | next in {} ms",
                    burst.repetitions, burst.sweeps, burst.pause_ms, next_in_ms
                );
            }
        }
    }
}
