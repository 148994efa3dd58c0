//! Actuator drivers, generic over `embedded-hal` PWM, GPIO and delay traits.

pub mod buzzer;
pub mod servo;
pub mod status_led;
