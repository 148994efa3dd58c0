//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns both sensor drivers and every actuator driver, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module in
//! the system that touches actual hardware.  Actuators are generic over
//! `embedded-hal` traits and sensors over the [`Co2Sensor`] /
//! [`PressureSensor`] wrappers, so on the host the same adapter runs on
//! fakes.
//!
//! Actuator errors cannot be acted on by the domain; they are logged here.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::servo::Servo;
use crate::drivers::status_led::StatusLed;
use crate::error::SensorError;
use crate::sensors::{Co2Sensor, PressureSensor};

/// Concrete adapter that combines all hardware behind port traits.
///
/// - `CO2` / `BARO`: sensor wrappers on the shared I2C bus
/// - `PWM`: LEDC channel type for the LED and the servo
/// - `PIN`: buzzer output and the pixel data line
/// - `D` / `US`: millisecond delay (servo hold, pauses) and the buzzer's
///   microsecond delay
pub struct HardwareAdapter<CO2, BARO, PWM, PIN, D, US> {
    co2: CO2,
    pressure: BARO,
    led: StatusLed<PWM>,
    pixel_line: PIN,
    servo: Servo<PWM>,
    buzzer: Buzzer<PIN, US>,
    delay: D,
}

impl<CO2, BARO, PWM, PIN, D, US> HardwareAdapter<CO2, BARO, PWM, PIN, D, US>
where
    CO2: Co2Sensor,
    BARO: PressureSensor,
    PWM: SetDutyCycle,
    PIN: OutputPin,
    D: DelayNs,
    US: DelayNs,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        co2: CO2,
        pressure: BARO,
        led: StatusLed<PWM>,
        pixel_line: PIN,
        servo: Servo<PWM>,
        buzzer: Buzzer<PIN, US>,
        delay: D,
    ) -> Self {
        Self {
            co2,
            pressure,
            led,
            pixel_line,
            servo,
            buzzer,
            delay,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<CO2, BARO, PWM, PIN, D, US> SensorPort for HardwareAdapter<CO2, BARO, PWM, PIN, D, US>
where
    CO2: Co2Sensor,
    BARO: PressureSensor,
    PWM: SetDutyCycle,
    PIN: OutputPin,
    D: DelayNs,
    US: DelayNs,
{
    fn co2_begin(&mut self) -> Result<(), SensorError> {
        self.co2.begin()
    }

    fn co2_set_measurement_interval(&mut self, secs: u16) -> Result<(), SensorError> {
        self.co2.set_measurement_interval(secs)
    }

    fn co2_data_available(&mut self) -> Result<bool, SensorError> {
        self.co2.data_ready()
    }

    fn co2_read_ppm(&mut self) -> Result<u16, SensorError> {
        self.co2.read_co2_ppm()
    }

    fn co2_set_ambient_pressure(&mut self, hpa: u16) -> Result<(), SensorError> {
        self.co2.set_ambient_pressure(hpa)
    }

    fn pressure_begin(&mut self, address: u8) -> Result<(), SensorError> {
        self.pressure.begin(address)
    }

    fn pressure_take_forced_measurement(&mut self) -> Result<(), SensorError> {
        self.pressure.take_forced_measurement()
    }

    fn pressure_read_pa(&mut self) -> Result<f32, SensorError> {
        self.pressure.read_pressure_pa()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<CO2, BARO, PWM, PIN, D, US> ActuatorPort for HardwareAdapter<CO2, BARO, PWM, PIN, D, US>
where
    CO2: Co2Sensor,
    BARO: PressureSensor,
    PWM: SetDutyCycle,
    PIN: OutputPin,
    D: DelayNs,
    US: DelayNs,
{
    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        if let Err(e) = self.led.set_colour(r, g, b) {
            warn!("LED: duty update failed: {:?}", e);
        }
    }

    fn force_led_line_low(&mut self) {
        if let Err(e) = self.pixel_line.set_low() {
            warn!("LED: pixel line low failed: {:?}", e);
        }
    }

    fn move_servo(&mut self, angle: u8) {
        if let Err(e) = self.servo.move_to(angle, &mut self.delay) {
            warn!("Servo: move to {} failed: {:?}", angle, e);
        }
    }

    fn buzz(&mut self, half_period_us: u32, pulses: u32) {
        if let Err(e) = self.buzzer.buzz(half_period_us, pulses) {
            warn!("Buzzer: {:?}", e);
        }
    }

    fn tone(&mut self, freq_hz: u32, duration_ms: u32) {
        if let Err(e) = self.buzzer.tone(freq_hz, duration_ms) {
            warn!("Buzzer: tone failed: {:?}", e);
        }
    }

    fn pause_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
