//! Application service — the hexagonal core.
//!
//! [`MonitorService`] owns every piece of loop state (last reading, alarm
//! state, pressure availability, next sound deadline) and the selected
//! [`AlarmPolicy`].  All I/O flows through port traits injected at call
//! sites, making the entire loop testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │      MonitorService       │
//! ActuatorPort ◀──│ acquire · indicate ·      │◀── Clock, RandomSource
//!                 │ alarm · sing              │
//!                 └──────────────────────────┘
//! ```

use log::{debug, error, info, warn};

use crate::alarm::{AlarmPolicy, AlarmState, AlarmTransition, SelectedPolicy};
use crate::config::MonitorConfig;
use crate::error::{Error, Result};
use crate::indicator::{IndicatorLevel, Thresholds};
use crate::reading::{Reading, pa_to_hpa};
use crate::scheduler::TickSchedule;
use crate::sound::{self, BurstSummary};

use super::events::AppEvent;
use super::ports::{ActuatorPort, Clock, EventSink, RandomSource, SensorPort};

/// What one tick observed and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub reading: Reading,
    pub level: IndicatorLevel,
    pub transition: Option<AlarmTransition>,
    pub sound: Option<BurstSummary>,
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The monitor loop's state and logic.
pub struct MonitorService<P: AlarmPolicy = SelectedPolicy> {
    config: MonitorConfig,
    thresholds: Thresholds,
    policy: P,
    reading: Reading,
    alarm: AlarmState,
    /// Probed once in `start`, never re-probed.
    pressure_available: bool,
    /// `None` until the first burst: a burst is due immediately.
    next_sound_at_ms: Option<u64>,
    tick_count: u64,
}

impl MonitorService<SelectedPolicy> {
    /// Construct the service with the policy named by `config.alarm_variant`.
    pub fn new(config: MonitorConfig) -> Self {
        let policy = SelectedPolicy::from_config(&config);
        Self::with_policy(config, policy)
    }
}

impl<P: AlarmPolicy> MonitorService<P> {
    pub fn with_policy(config: MonitorConfig, policy: P) -> Self {
        Self {
            thresholds: Thresholds::from(&config),
            config,
            policy,
            reading: Reading::default(),
            alarm: AlarmState::Normal,
            pressure_available: false,
            next_sound_at_ms: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Park the actuators and probe both sensors.
    ///
    /// A missing CO2 sensor is fatal and returned as [`Error::Init`]; the
    /// caller is expected to [`halt`]. A missing pressure sensor only
    /// disables compensation.
    pub fn start(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.config.validate()?;

        self.policy.on_start(hw);
        hw.set_led(0, 0, 0);

        match hw.co2_begin() {
            Ok(()) => info!("SCD30 CO2 sensor detected."),
            Err(e) => {
                error!("SCD30 CO2 sensor not detected ({e}). Please check wiring. Freezing.");
                sink.emit(&AppEvent::Co2SensorMissing(e));
                return Err(Error::Init("CO2 sensor not detected"));
            }
        }
        if let Err(e) = hw.co2_set_measurement_interval(self.config.measure_interval_secs) {
            warn!("SCD30 measurement interval not accepted: {e}");
        }

        match hw.pressure_begin(self.config.pressure_i2c_address) {
            Ok(()) => {
                info!("BME280 pressure sensor detected.");
                self.pressure_available = true;
                self.reading.pressure_valid = true;
            }
            Err(e) => {
                warn!(
                    "BME280 pressure sensor not detected ({e}). Please check wiring. \
                     Continuing without ambient pressure compensation."
                );
                sink.emit(&AppEvent::PressureSensorMissing(e));
            }
        }

        sink.emit(&AppEvent::Started {
            variant: self.config.alarm_variant,
            pressure_compensation: self.pressure_available,
        });
        info!(
            "MonitorService started ({:?}, compensation={})",
            self.config.alarm_variant, self.pressure_available
        );
        Ok(())
    }

    /// Run forever: tick, then wait for the next scheduled wakeup.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &mut impl Clock,
        rng: &mut impl RandomSource,
        sink: &mut impl EventSink,
    ) -> ! {
        let mut schedule = TickSchedule::new(self.config.tick_period_ms());
        schedule.anchor(clock.now_ms());
        loop {
            self.tick(hw, &*clock, rng, sink);
            schedule.wait(clock);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One full cycle: acquire → indicate → alarm → sing.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl Clock,
        rng: &mut impl RandomSource,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count += 1;

        // 1. Sensors
        self.acquire(hw);
        sink.emit(&AppEvent::Reading(self.reading));
        let co2 = self.reading.co2_ppm;

        // 2. Status LED
        let level = IndicatorLevel::classify(co2, self.thresholds);
        let (r, g, b) = level.rgb();
        hw.set_led(r, g, b);

        // 3. Alarm
        let transition = self.alarm.update(co2, self.thresholds.critical_ppm);
        match transition {
            Some(AlarmTransition::Triggered) => {
                warn!("ALARM: CO2 {co2} ppm reached critical level");
                self.policy.on_triggered(hw);
            }
            Some(AlarmTransition::Cleared) => {
                info!("ALARM: CO2 {co2} ppm back below critical level");
                self.policy.on_cleared(hw);
            }
            None => {}
        }
        if self.alarm.is_triggered() {
            self.policy.while_triggered(hw);
        }
        if let Some(transition) = transition {
            sink.emit(&AppEvent::Alarm {
                transition,
                co2_ppm: co2,
            });
        }

        // 4. Ambient sound
        let sound = self.maybe_sing(hw, clock, rng, sink);

        TickOutcome {
            reading: self.reading,
            level,
            transition,
            sound,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn reading(&self) -> Reading {
        self.reading
    }

    pub fn alarm_state(&self) -> AlarmState {
        self.alarm
    }

    pub fn pressure_available(&self) -> bool {
        self.pressure_available
    }

    pub fn next_sound_at_ms(&self) -> Option<u64> {
        self.next_sound_at_ms
    }

    /// Total ticks executed since start-up.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Forced pressure sample → compensation → CO2 if a sample is ready.
    /// Driver errors keep the previous values; a failed pressure sample also
    /// skips compensation for the tick.
    fn acquire(&mut self, hw: &mut impl SensorPort) {
        if self.pressure_available {
            let pa = hw
                .pressure_take_forced_measurement()
                .and_then(|()| hw.pressure_read_pa());
            match pa {
                Ok(pa) => {
                    let hpa = pa_to_hpa(pa);
                    self.reading.pressure_hpa = hpa;
                    if let Err(e) = hw.co2_set_ambient_pressure(hpa) {
                        warn!("SCD30 pressure compensation failed: {e}");
                    }
                }
                Err(e) => warn!("BME280 read failed: {e}"),
            }
        }

        match hw.co2_data_available() {
            Ok(true) => match hw.co2_read_ppm() {
                Ok(ppm) => self.reading.co2_ppm = ppm,
                Err(e) => warn!("SCD30 read failed: {e}"),
            },
            Ok(false) => {}
            Err(e) => warn!("SCD30 data-ready query failed: {e}"),
        }
    }

    fn maybe_sing(
        &mut self,
        hw: &mut impl ActuatorPort,
        clock: &impl Clock,
        rng: &mut impl RandomSource,
        sink: &mut impl EventSink,
    ) -> Option<BurstSummary> {
        if !self.policy.plays_ambient_sound() || self.alarm.is_triggered() {
            return None;
        }
        if self.reading.co2_ppm >= self.thresholds.critical_ppm {
            return None;
        }
        let now = clock.now_ms();
        if self.next_sound_at_ms.is_some_and(|due| now < due) {
            return None;
        }

        let burst = sound::compose_burst(rng);
        sound::play_burst(&burst, hw);
        let summary = burst.summary();

        let next_in_ms = sound::next_interval_ms(self.config.sing_interval_secs, rng);
        self.next_sound_at_ms = Some(now + u64::from(next_in_ms));
        debug!(
            "SOUND: {} repetitions, {} sweeps, next in {} ms",
            summary.repetitions, summary.sweeps, next_in_ms
        );
        sink.emit(&AppEvent::SoundPlayed {
            burst: summary,
            next_in_ms,
        });
        Some(summary)
    }
}

/// Park the control thread forever.  Used when the CO2 sensor is missing:
/// there is no retry and no degraded mode.
pub fn halt(clock: &mut impl Clock) -> ! {
    loop {
        clock.sleep_ms(u32::MAX);
    }
}
