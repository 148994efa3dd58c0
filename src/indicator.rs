//! CO2 concentration → status LED colour.
//!
//! Pure mapping, recomputed every tick.  No hysteresis: the lower edge of
//! each band belongs to the upper tier, so exactly `warning_ppm` is
//! Warning and exactly `critical_ppm` is Critical.

use crate::config::MonitorConfig;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_NORMAL: Rgb = (0, 255, 0);
pub const COLOUR_WARNING: Rgb = (255, 255, 0);
pub const COLOUR_CRITICAL: Rgb = (255, 0, 0);

/// Band boundaries, both inclusive on the upper tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warning_ppm: u16,
    pub critical_ppm: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_ppm: 1000,
            critical_ppm: 2000,
        }
    }
}

impl From<&MonitorConfig> for Thresholds {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            warning_ppm: config.warning_ppm,
            critical_ppm: config.critical_ppm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorLevel {
    /// All good: open windows not needed.
    Normal,
    /// Ventilate.
    Warning,
    /// Leave the room.
    Critical,
}

impl IndicatorLevel {
    pub fn classify(co2_ppm: u16, thresholds: Thresholds) -> Self {
        if co2_ppm < thresholds.warning_ppm {
            Self::Normal
        } else if co2_ppm < thresholds.critical_ppm {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Normal => COLOUR_NORMAL,
            Self::Warning => COLOUR_WARNING,
            Self::Critical => COLOUR_CRITICAL,
        }
    }
}
