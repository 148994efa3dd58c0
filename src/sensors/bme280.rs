//! Bosch BME280/BMP280 barometer, wrapping the `bme280` crate.
//!
//! The address is only known once the configuration is loaded, so the
//! driver is built in [`PressureSensor::begin`]. A failed probe consumes
//! the bus handle: the sensor is never probed twice.

use ::bme280::i2c::BME280;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use super::PressureSensor;
use crate::error::SensorError;

pub struct Bme280Sensor<I2C, D> {
    bus: Option<I2C>,
    device: Option<BME280<I2C>>,
    delay: D,
    last_pa: Option<f32>,
}

impl<I2C: I2c, D: DelayNs> Bme280Sensor<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            bus: Some(i2c),
            device: None,
            delay,
            last_pa: None,
        }
    }
}

impl<I2C: I2c, D: DelayNs> PressureSensor for Bme280Sensor<I2C, D> {
    fn begin(&mut self, address: u8) -> Result<(), SensorError> {
        let i2c = self.bus.take().ok_or(SensorError::NotDetected)?;
        let mut device = BME280::new(i2c, address);
        device.init(&mut self.delay).map_err(|e| {
            debug!("BME280: init at {address:#04x} failed: {e:?}");
            SensorError::NotDetected
        })?;
        self.device = Some(device);
        Ok(())
    }

    fn take_forced_measurement(&mut self) -> Result<(), SensorError> {
        let device = self.device.as_mut().ok_or(SensorError::NotDetected)?;
        let measurements = device.measure(&mut self.delay).map_err(|e| {
            debug!("BME280: forced measurement failed: {e:?}");
            SensorError::Bus
        })?;
        self.last_pa = Some(measurements.pressure);
        Ok(())
    }

    fn read_pressure_pa(&mut self) -> Result<f32, SensorError> {
        self.last_pa.ok_or(SensorError::InvalidData)
    }
}
