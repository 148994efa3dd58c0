//! Sensor wrappers on the shared I2C bus.
//!
//! Each wrapper owns a registry driver (`libscd` for the SCD30, `bme280`
//! for the pressure sensor) and narrows it to the calls the monitor makes.
//! [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter) is
//! generic over the two traits below, so host tests swap in scripted
//! sensors while keeping the real actuator drivers.

pub mod bme280;
pub mod scd30;

pub use self::bme280::Bme280Sensor;
pub use self::scd30::Scd30Sensor;

use crate::error::SensorError;

/// NDIR CO2 sensor sampling on its own interval.
pub trait Co2Sensor {
    /// Probe the device and start continuous measurement.
    fn begin(&mut self) -> Result<(), SensorError>;

    fn set_measurement_interval(&mut self, secs: u16) -> Result<(), SensorError>;

    fn data_ready(&mut self) -> Result<bool, SensorError>;

    fn read_co2_ppm(&mut self) -> Result<u16, SensorError>;

    /// Ambient pressure for compensation, in hPa.
    fn set_ambient_pressure(&mut self, hpa: u16) -> Result<(), SensorError>;
}

/// Barometer sampled on demand (forced mode).
pub trait PressureSensor {
    fn begin(&mut self, address: u8) -> Result<(), SensorError>;

    /// Run one forced conversion; blocks until it is done.
    fn take_forced_measurement(&mut self) -> Result<(), SensorError>;

    /// Pressure of the last conversion (Pa).
    fn read_pressure_pa(&mut self) -> Result<f32, SensorError>;
}
