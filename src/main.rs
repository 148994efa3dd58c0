//! co2bird Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     LogEventSink   Esp32TimeAdapter  SmallRng │
//! │  (Sensor+Actuator)   (EventSink)    (Clock)           (Random) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MonitorService (pure logic)                 │    │
//! │  │  acquire · indicator · alarm policy · chirps           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  TickSchedule (fixed cadence on the Clock)                     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::cell::RefCell;

use anyhow::Result;
use embedded_hal_bus::i2c::RefCellDevice;
use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::{OutputPin, PinDriver};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use log::{error, info, warn};

use co2bird::adapters::hardware::HardwareAdapter;
use co2bird::adapters::log_sink::LogEventSink;
use co2bird::adapters::random::SmallRngSource;
use co2bird::adapters::time::Esp32TimeAdapter;
use co2bird::app::service::{MonitorService, halt};
use co2bird::config::MonitorConfig;
use co2bird::drivers::buzzer::Buzzer;
use co2bird::drivers::servo::Servo;
use co2bird::drivers::status_led::StatusLed;
use co2bird::pins;
use co2bird::sensors::{Bme280Sensor, Scd30Sensor};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  co2bird v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (compile-time defaults) ─────────────────────
    let config = MonitorConfig::default();
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config: could not serialise ({})", e),
    }

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    info!(
        "Pins: I2C sda={} scl={} | LED r={} g={} b={} pixel={} | servo={} | buzzer={}",
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        pins::LED_R_GPIO,
        pins::LED_G_GPIO,
        pins::LED_B_GPIO,
        pins::PIXEL_LINE_GPIO,
        pins::SERVO_GPIO,
        pins::BUZZER_GPIO,
    );

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ)),
    )?;
    let bus = RefCell::new(i2c);

    let led_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(pins::LED_PWM_FREQ_HZ))
            .resolution(Resolution::Bits8),
    )?;
    let led = StatusLed::new(
        LedcDriver::new(peripherals.ledc.channel0, &led_timer, peripherals.pins.gpio25)?,
        LedcDriver::new(peripherals.ledc.channel1, &led_timer, peripherals.pins.gpio26)?,
        LedcDriver::new(peripherals.ledc.channel2, &led_timer, peripherals.pins.gpio27)?,
        config.led_brightness,
    );

    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer1,
        &TimerConfig::new()
            .frequency(Hertz(pins::SERVO_PWM_FREQ_HZ))
            .resolution(Resolution::Bits14),
    )?;
    let servo = Servo::new(
        LedcDriver::new(peripherals.ledc.channel3, &servo_timer, peripherals.pins.gpio12)?,
        config.servo_move_ms,
    );

    // Same pin type for both plain outputs.
    let pixel_line = PinDriver::output(peripherals.pins.gpio0.downgrade_output())?;
    let buzzer = Buzzer::new(
        PinDriver::output(peripherals.pins.gpio14.downgrade_output())?,
        Ets,
    );

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(
        Scd30Sensor::new(RefCellDevice::new(&bus), FreeRtos),
        Bme280Sensor::new(RefCellDevice::new(&bus), FreeRtos),
        led,
        pixel_line,
        servo,
        buzzer,
        FreeRtos,
    );
    let mut sink = LogEventSink::new();
    let mut clock = Esp32TimeAdapter::new();
    let mut rng = SmallRngSource::from_hardware();

    // ── 5. Start-up, then the monitor loop ────────────────────
    let mut service = MonitorService::new(config);
    if let Err(e) = service.start(&mut hw, &mut sink) {
        error!("Start-up failed: {}. Halting.", e);
        halt(&mut clock);
    }

    info!("Entering monitor loop");
    service.run(&mut hw, &mut clock, &mut rng, &mut sink)
}
