//! GPIO / peripheral pin assignments for the monitor board.
//!
//! Single source of truth for the wiring.  `main.rs` takes the matching
//! `peripherals.pins.gpioN` fields; keep the two in sync when rewiring.

// ---------------------------------------------------------------------------
// I²C bus (SCD30 at 0x61, BME280 at 0x76/0x77)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// SCD30 supports up to 100 kHz with clock stretching.
pub const I2C_BAUDRATE_HZ: u32 = 50_000;

// ---------------------------------------------------------------------------
// Status LED (common-cathode RGB, LEDC PWM)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 25;
pub const LED_G_GPIO: i32 = 26;
pub const LED_B_GPIO: i32 = 27;
/// LEDC frequency for the RGB status LED (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
/// Data line of the single-pixel LED header.  Only ever driven low, by the
/// buzzer alarm after each tone.
pub const PIXEL_LINE_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// Buzzer (passive piezo, bit-banged)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Servo (hobby servo, 50 Hz LEDC PWM)
// ---------------------------------------------------------------------------

pub const SERVO_GPIO: i32 = 12;
/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
