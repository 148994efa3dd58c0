//! System configuration parameters
//!
//! All tunable parameters for the monitor.  There is no runtime
//! configuration surface: the firmware runs with [`MonitorConfig::default()`],
//! and the `variant-buzzer` Cargo feature selects the alarm variant at
//! build time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which alarm behaviour the firmware runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmVariant {
    /// Bird toy: servo gestures on alarm entry/exit plus ambient chirps.
    Bird,
    /// Fixed tone every tick while the alarm is active.
    Buzzer,
}

impl Default for AlarmVariant {
    fn default() -> Self {
        if cfg!(feature = "variant-buzzer") {
            Self::Buzzer
        } else {
            Self::Bird
        }
    }
}

/// Core monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Timing ---
    /// CO2 sampling interval and loop period (seconds, 2–1800)
    pub measure_interval_secs: u16,

    // --- CO2 thresholds ---
    /// Lower bound of the warning band (ppm, inclusive)
    pub warning_ppm: u16,
    /// Lower bound of the critical band and alarm threshold (ppm, inclusive)
    pub critical_ppm: u16,

    // --- Status LED ---
    /// Global brightness scale applied by the LED driver (0-255)
    pub led_brightness: u8,

    // --- Ambient sound ---
    /// Mean interval between chirp bursts (seconds, randomized ±50%)
    pub sing_interval_secs: u32,

    // --- Servo ---
    pub servo_up_deg: u8,
    pub servo_down_deg: u8,
    /// Servo is powered for this long after each move, then detached
    pub servo_move_ms: u32,

    // --- Pressure sensor ---
    /// BME280 I2C address (0x76 or 0x77)
    pub pressure_i2c_address: u8,

    // --- Alarm ---
    pub alarm_variant: AlarmVariant,
    /// Buzzer variant: tone frequency (Hz)
    pub alarm_tone_hz: u32,
    /// Buzzer variant: tone duration per tick (ms)
    pub alarm_tone_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            measure_interval_secs: 2,

            warning_ppm: 1000,
            critical_ppm: 2000,

            led_brightness: 37,

            sing_interval_secs: 10,

            servo_up_deg: 0,
            servo_down_deg: 180,
            servo_move_ms: 500,

            pressure_i2c_address: 0x76,

            alarm_variant: AlarmVariant::default(),
            alarm_tone_hz: 2000,
            alarm_tone_ms: 200,
        }
    }
}

impl MonitorConfig {
    /// Shortest interval the SCD30 accepts.
    pub const MIN_INTERVAL_SECS: u16 = 2;
    /// Longest interval the SCD30 accepts.
    pub const MAX_INTERVAL_SECS: u16 = 1800;

    /// Reject out-of-range values rather than clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_INTERVAL_SECS..=Self::MAX_INTERVAL_SECS)
            .contains(&self.measure_interval_secs)
        {
            return Err(ConfigError::ValidationFailed(
                "measure_interval_secs must be within 2..=1800",
            ));
        }
        if self.warning_ppm >= self.critical_ppm {
            return Err(ConfigError::ValidationFailed(
                "critical_ppm must exceed warning_ppm",
            ));
        }
        if self.sing_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "sing_interval_secs must be non-zero",
            ));
        }
        if self.servo_up_deg > 180 || self.servo_down_deg > 180 {
            return Err(ConfigError::ValidationFailed(
                "servo angles must be within 0..=180",
            ));
        }
        if !matches!(self.pressure_i2c_address, 0x76 | 0x77) {
            return Err(ConfigError::ValidationFailed(
                "pressure_i2c_address must be 0x76 or 0x77",
            ));
        }
        if self.alarm_tone_hz == 0 {
            return Err(ConfigError::ValidationFailed("alarm_tone_hz must be non-zero"));
        }
        Ok(())
    }

    /// Loop period in milliseconds.
    pub fn tick_period_ms(&self) -> u32 {
        u32::from(self.measure_interval_secs) * 1000
    }
}
