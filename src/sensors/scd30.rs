//! Sensirion SCD30 CO2 sensor, wrapping the `libscd` blocking driver.
//!
//! The sensor samples on its own interval; the wrapper polls the
//! data-ready flag and restarts continuous measurement whenever the
//! compensation pressure changes.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use libscd::synchronous::scd30::Scd30;
use log::{debug, info};

use super::Co2Sensor;
use crate::error::SensorError;

/// Ambient-pressure compensation range accepted by the sensor (mbar = hPa).
pub const PRESSURE_RANGE_HPA: core::ops::RangeInclusive<u16> = 700..=1400;

/// Argument for "start continuous measurement": the pressure when the
/// sensor accepts it, else 0 (compensation off).
pub fn compensation_argument(hpa: u16) -> u16 {
    if PRESSURE_RANGE_HPA.contains(&hpa) {
        hpa
    } else {
        0
    }
}

pub struct Scd30Sensor<I2C, D> {
    device: Scd30<I2C, D>,
    /// Last compensation argument the sensor accepted.
    pressure_hpa: u16,
}

impl<I2C: I2c, D: DelayNs> Scd30Sensor<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            device: Scd30::new(i2c, delay),
            pressure_hpa: 0,
        }
    }

    fn start_continuous(&mut self, hpa: u16) -> Result<(), SensorError> {
        self.device
            .start_continuous_measurement(hpa)
            .map_err(|e| {
                debug!("SCD30: start continuous ({hpa} hPa) failed: {e:?}");
                SensorError::Bus
            })?;
        self.pressure_hpa = hpa;
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> Co2Sensor for Scd30Sensor<I2C, D> {
    fn begin(&mut self) -> Result<(), SensorError> {
        let version = self.device.read_firmware_version().map_err(|e| {
            debug!("SCD30: no answer to firmware query: {e:?}");
            SensorError::NotDetected
        })?;
        info!("SCD30: firmware {:?}", version);
        self.start_continuous(0)
    }

    fn set_measurement_interval(&mut self, secs: u16) -> Result<(), SensorError> {
        self.device
            .set_measurement_interval(secs)
            .map_err(|_| SensorError::Bus)
    }

    fn data_ready(&mut self) -> Result<bool, SensorError> {
        self.device.data_ready().map_err(|_| SensorError::Bus)
    }

    fn read_co2_ppm(&mut self) -> Result<u16, SensorError> {
        let measurement = self.device.measurement().map_err(|e| {
            debug!("SCD30: measurement read failed: {e:?}");
            SensorError::Bus
        })?;
        Ok(measurement.co2)
    }

    /// Values outside [`PRESSURE_RANGE_HPA`] turn compensation off.  An
    /// unchanged value is not re-sent.
    fn set_ambient_pressure(&mut self, hpa: u16) -> Result<(), SensorError> {
        let hpa = compensation_argument(hpa);
        if hpa == self.pressure_hpa {
            return Ok(());
        }
        self.start_continuous(hpa)
    }
}
