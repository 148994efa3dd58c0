//! Hobby servo driver (50 Hz frame, 544–2400 µs pulse).
//!
//! The servo is only powered while moving: [`Servo::move_to`] attaches,
//! holds the pulse for the move time and detaches again, so the horn does
//! not buzz against its end stop between gestures.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

pub const MIN_PULSE_US: u16 = 544;
pub const MAX_PULSE_US: u16 = 2400;
pub const FRAME_US: u16 = 20_000;
pub const MAX_ANGLE: u8 = 180;

/// Pulse width for `angle` degrees (clamped to 0–180).
pub fn pulse_us(angle: u8) -> u16 {
    let angle = u32::from(angle.min(MAX_ANGLE));
    let span = u32::from(MAX_PULSE_US - MIN_PULSE_US);
    MIN_PULSE_US + (span * angle / u32::from(MAX_ANGLE)) as u16
}

pub struct Servo<P> {
    pwm: P,
    move_ms: u32,
}

impl<P: SetDutyCycle> Servo<P> {
    pub fn new(pwm: P, move_ms: u32) -> Self {
        Self {
            pwm,
            move_ms,
        }
    }

    pub fn move_to(&mut self, angle: u8, delay: &mut impl DelayNs) -> Result<(), P::Error> {
        let angle = angle.min(MAX_ANGLE);
        self.pwm
            .set_duty_cycle_fraction(pulse_us(angle), FRAME_US)?;
        delay.delay_ms(self.move_ms);
        self.pwm.set_duty_cycle_fully_off()
    }
}
