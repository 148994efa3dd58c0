//! Piezo buzzer on a plain GPIO, bit-banged with a microsecond delay.
//!
//! Chirp sweeps change the half-period on every pulse, which LEDC cannot
//! follow, so both the chirps and the alarm tone toggle the pin directly.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

pub struct Buzzer<PIN, D> {
    pin: PIN,
    delay: D,
}

impl<PIN: OutputPin, D: DelayNs> Buzzer<PIN, D> {
    pub fn new(pin: PIN, delay: D) -> Self {
        Self { pin, delay }
    }

    /// `pulses` full periods of `2 × half_period_us`.
    pub fn buzz(&mut self, half_period_us: u32, pulses: u32) -> Result<(), PIN::Error> {
        for _ in 0..pulses {
            self.pin.set_high()?;
            self.delay.delay_us(half_period_us);
            self.pin.set_low()?;
            self.delay.delay_us(half_period_us);
        }
        Ok(())
    }

    /// Square wave at `freq_hz` for `duration_ms`.  `freq_hz == 0` is silence.
    pub fn tone(&mut self, freq_hz: u32, duration_ms: u32) -> Result<(), PIN::Error> {
        if freq_hz == 0 {
            self.delay.delay_ms(duration_ms);
            return Ok(());
        }
        let half_period_us = 500_000 / freq_hz;
        let cycles = u64::from(freq_hz) * u64::from(duration_ms) / 1000;
        self.buzz(half_period_us, cycles.min(u64::from(u32::MAX)) as u32)
    }
}
