//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  The firmware prints them
//! on the serial console; tests record them.

use crate::alarm::AlarmTransition;
use crate::config::AlarmVariant;
use crate::error::SensorError;
use crate::reading::Reading;
use crate::sound::BurstSummary;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Start-up finished (carries the selected variant and whether
    /// pressure compensation is active).
    Started {
        variant: AlarmVariant,
        pressure_compensation: bool,
    },

    /// The CO2 sensor did not answer at start-up; the firmware halts.
    Co2SensorMissing(SensorError),

    /// The pressure sensor did not answer at start-up; compensation is off.
    PressureSensorMissing(SensorError),

    /// One status line per tick.
    Reading(Reading),

    /// The alarm state machine crossed the critical threshold.
    Alarm {
        transition: AlarmTransition,
        co2_ppm: u16,
    },

    /// An ambient chirp burst finished; the next one is due in `next_in_ms`.
    SoundPlayed {
        burst: BurstSummary,
        next_in_ms: u32,
    },
}
