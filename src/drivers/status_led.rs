//! RGB status LED driver.
//!
//! Three PWM channels drive discrete R/G/B LEDs (or a common-cathode RGB
//! LED).  Every channel is scaled by a global brightness so full-scale
//! colours stay comfortable to look at.

use embedded_hal::pwm::SetDutyCycle;

pub struct StatusLed<C> {
    red: C,
    green: C,
    blue: C,
    brightness: u8,
}

impl<C: SetDutyCycle> StatusLed<C> {
    pub fn new(red: C, green: C, blue: C, brightness: u8) -> Self {
        Self {
            red,
            green,
            blue,
            brightness,
        }
    }

    pub fn set_colour(&mut self, r: u8, g: u8, b: u8) -> Result<(), C::Error> {
        let scale = |v: u8| u16::from(v) * u16::from(self.brightness) / 255;
        let (r_duty, g_duty, b_duty) = (scale(r), scale(g), scale(b));
        self.red.set_duty_cycle_fraction(r_duty, 255)?;
        self.green.set_duty_cycle_fraction(g_duty, 255)?;
        self.blue.set_duty_cycle_fraction(b_duty, 255)
    }
}
