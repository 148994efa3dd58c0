//! Port traits — the hexagonal boundary between the monitor loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, clock, randomness, event sinks)
//! implement these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every timing decision is testable without wall-clock delays.

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the CO2 sensor plus the optional pressure sensor.
pub trait SensorPort {
    /// Probe the CO2 sensor and start continuous measurement.
    fn co2_begin(&mut self) -> Result<(), SensorError>;

    /// Set the CO2 sensor's internal sampling interval (2–1800 s).
    fn co2_set_measurement_interval(&mut self, secs: u16) -> Result<(), SensorError>;

    /// Whether a fresh CO2 sample is waiting to be read.
    fn co2_data_available(&mut self) -> Result<bool, SensorError>;

    /// Read the latest CO2 sample (ppm).
    fn co2_read_ppm(&mut self) -> Result<u16, SensorError>;

    /// Forward ambient pressure (hPa) for CO2 compensation.
    fn co2_set_ambient_pressure(&mut self, hpa: u16) -> Result<(), SensorError>;

    /// Probe the pressure sensor at `address` and configure forced sampling.
    fn pressure_begin(&mut self, address: u8) -> Result<(), SensorError>;

    /// Trigger one forced conversion and block until it completes.
    fn pressure_take_forced_measurement(&mut self) -> Result<(), SensorError>;

    /// Compensated pressure of the last conversion (Pa).
    fn pressure_read_pa(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port.  Every call blocks until the actuation completes.
pub trait ActuatorPort {
    /// Set the RGB status LED colour and latch it.
    fn set_led(&mut self, r: u8, g: u8, b: u8);

    /// Pull the pixel data line low.  The RGB output is left as it is.
    fn force_led_line_low(&mut self);

    /// Attach the servo, move to `angle`, hold for the move time, detach.
    fn move_servo(&mut self, angle: u8);

    /// `pulses` square-wave periods with the given high/low half-period.
    fn buzz(&mut self, half_period_us: u32, pulses: u32);

    /// A fixed-frequency tone for `duration_ms`.
    fn tone(&mut self, freq_hz: u32, duration_ms: u32);

    /// Blocking pause between sound phases.
    fn pause_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain ↔ monotonic time)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source and the loop's only sleep primitive.
pub trait Clock {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;

    /// Block the control thread for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Random source (driven adapter: domain ← entropy)
// ───────────────────────────────────────────────────────────────

/// Uniform integers for chirp shapes and burst jitter.
pub trait RandomSource {
    /// A value in `[low, high)`.  Returns `low` when the range is empty.
    fn range(&mut self, low: u32, high: u32) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, test
/// recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
