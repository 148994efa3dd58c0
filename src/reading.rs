//! The per-tick sensor reading.

use core::fmt;

/// A point-in-time snapshot of both sensors.
///
/// Produced once per tick and overwritten on the next; CO2 carries forward
/// when the sensor has no new sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reading {
    /// CO2 concentration (ppm).
    pub co2_ppm: u16,
    /// Ambient pressure (hPa), truncated from Pa.
    pub pressure_hpa: u16,
    /// True for the whole run when the pressure sensor was detected at
    /// start-up.  `pressure_hpa` carries forward over failed samples.
    pub pressure_valid: bool,
}

/// Integer Pa → hPa conversion, truncating like a `uint16_t` cast.
pub fn pa_to_hpa(pa: f32) -> u16 {
    if pa.is_nan() || pa <= 0.0 {
        return 0;
    }
    (pa / 100.0).min(f32::from(u16::MAX)) as u16
}

/// Status line: `"<co2> ppm, <pressure> hPa"` or `"<co2> ppm"`.
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pressure_valid {
            write!(f, "{} ppm, {} hPa", self.co2_ppm, self.pressure_hpa)
        } else {
            write!(f, "{} ppm", self.co2_ppm)
        }
    }
}
