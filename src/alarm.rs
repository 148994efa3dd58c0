//! Alarm state machine and its actuation policies.
//!
//! ```text
//!            co2 >= critical
//!   NORMAL ───────────────────▶ TRIGGERED
//!     ▲                             │
//!     └─────── co2 < critical ──────┘
//! ```
//!
//! [`AlarmState::update`] reports a transition exactly once per crossing.
//! What the firmware *does* on those crossings is an [`AlarmPolicy`]:
//! [`BirdPolicy`] (servo gestures + ambient chirps) or [`BuzzerPolicy`]
//! (fixed tone every triggered tick).  [`SelectedPolicy`] picks one from
//! [`AlarmVariant`] at start-up.

use log::{info, warn};

use crate::app::ports::ActuatorPort;
use crate::config::{AlarmVariant, MonitorConfig};

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmState {
    #[default]
    Normal,
    Triggered,
}

/// Edge reported by [`AlarmState::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmTransition {
    /// Normal → Triggered.
    Triggered,
    /// Triggered → Normal.
    Cleared,
}

impl AlarmState {
    /// Feed the latest reading.  Returns `Some` only on a crossing.
    pub fn update(&mut self, co2_ppm: u16, critical_ppm: u16) -> Option<AlarmTransition> {
        match (*self, co2_ppm >= critical_ppm) {
            (Self::Normal, true) => {
                *self = Self::Triggered;
                Some(AlarmTransition::Triggered)
            }
            (Self::Triggered, false) => {
                *self = Self::Normal;
                Some(AlarmTransition::Cleared)
            }
            _ => None,
        }
    }

    pub fn is_triggered(self) -> bool {
        self == Self::Triggered
    }
}

// ---------------------------------------------------------------------------
// Policy interface
// ---------------------------------------------------------------------------

/// Actions bound to the alarm state machine.
///
/// `on_triggered` and `on_cleared` are one-shot: the service calls them only
/// on the tick that [`AlarmState::update`] reports the matching edge.
/// `while_triggered` runs on every tick spent in Triggered, entry tick
/// included.
pub trait AlarmPolicy {
    /// Park the actuators once at start-up.
    fn on_start(&mut self, hw: &mut impl ActuatorPort);

    fn on_triggered(&mut self, hw: &mut impl ActuatorPort);

    fn while_triggered(&mut self, _hw: &mut impl ActuatorPort) {}

    fn on_cleared(&mut self, _hw: &mut impl ActuatorPort) {}

    /// Whether ambient chirps play while the alarm is not triggered.
    fn plays_ambient_sound(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Variant A — bird toy
// ---------------------------------------------------------------------------

/// Bird drops on alarm, rises again on recovery, chirps in between.
#[derive(Debug, Clone, Copy)]
pub struct BirdPolicy {
    up_deg: u8,
    down_deg: u8,
}

impl BirdPolicy {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            up_deg: config.servo_up_deg,
            down_deg: config.servo_down_deg,
        }
    }
}

impl AlarmPolicy for BirdPolicy {
    fn on_start(&mut self, hw: &mut impl ActuatorPort) {
        hw.move_servo(self.up_deg);
    }

    fn on_triggered(&mut self, hw: &mut impl ActuatorPort) {
        info!("ALARM: bird down");
        hw.move_servo(self.down_deg);
    }

    fn on_cleared(&mut self, hw: &mut impl ActuatorPort) {
        info!("ALARM: bird up");
        hw.move_servo(self.up_deg);
    }

    fn plays_ambient_sound(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Variant B — buzzer
// ---------------------------------------------------------------------------

/// Servo drops once on alarm; the buzzer sounds on every triggered tick.
///
/// There is no recovery gesture: the servo stays down after the alarm
/// clears.
#[derive(Debug, Clone, Copy)]
pub struct BuzzerPolicy {
    up_deg: u8,
    down_deg: u8,
    tone_hz: u32,
    tone_ms: u32,
}

impl BuzzerPolicy {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            up_deg: config.servo_up_deg,
            down_deg: config.servo_down_deg,
            tone_hz: config.alarm_tone_hz,
            tone_ms: config.alarm_tone_ms,
        }
    }
}

impl AlarmPolicy for BuzzerPolicy {
    fn on_start(&mut self, hw: &mut impl ActuatorPort) {
        hw.move_servo(self.up_deg);
    }

    fn on_triggered(&mut self, hw: &mut impl ActuatorPort) {
        warn!("ALARM: servo down, buzzer on");
        hw.move_servo(self.down_deg);
    }

    fn while_triggered(&mut self, hw: &mut impl ActuatorPort) {
        hw.tone(self.tone_hz, self.tone_ms);
        hw.force_led_line_low();
    }
}

// ---------------------------------------------------------------------------
// Configuration-time selection
// ---------------------------------------------------------------------------

/// Static dispatch over the two variants; no heap, no `dyn`.
#[derive(Debug, Clone, Copy)]
pub enum SelectedPolicy {
    Bird(BirdPolicy),
    Buzzer(BuzzerPolicy),
}

impl SelectedPolicy {
    pub fn from_config(config: &MonitorConfig) -> Self {
        match config.alarm_variant {
            AlarmVariant::Bird => Self::Bird(BirdPolicy::new(config)),
            AlarmVariant::Buzzer => Self::Buzzer(BuzzerPolicy::new(config)),
        }
    }
}

impl AlarmPolicy for SelectedPolicy {
    fn on_start(&mut self, hw: &mut impl ActuatorPort) {
        match self {
            Self::Bird(p) => p.on_start(hw),
            Self::Buzzer(p) => p.on_start(hw),
        }
    }

    fn on_triggered(&mut self, hw: &mut impl ActuatorPort) {
        match self {
            Self::Bird(p) => p.on_triggered(hw),
            Self::Buzzer(p) => p.on_triggered(hw),
        }
    }

    fn while_triggered(&mut self, hw: &mut impl ActuatorPort) {
        match self {
            Self::Bird(p) => p.while_triggered(hw),
            Self::Buzzer(p) => p.while_triggered(hw),
        }
    }

    fn on_cleared(&mut self, hw: &mut impl ActuatorPort) {
        match self {
            Self::Bird(p) => p.on_cleared(hw),
            Self::Buzzer(p) => p.on_cleared(hw),
        }
    }

    fn plays_ambient_sound(&self) -> bool {
        match self {
            Self::Bird(p) => p.plays_ambient_sound(),
            Self::Buzzer(p) => p.plays_ambient_sound(),
        }
    }
}
