//! Integration tests for the MonitorService → policy → actuators pipeline.
//!
//! These run on the host (x86_64) and drive the full tick (acquire,
//! indicator, alarm, ambient sound) against mock adapters, one scripted
//! CO2 sample per tick.

use co2bird::alarm::{AlarmState, AlarmTransition};
use co2bird::app::events::AppEvent;
use co2bird::app::service::{MonitorService, TickOutcome};
use co2bird::config::{AlarmVariant, MonitorConfig};
use co2bird::error::{ConfigError, Error};
use co2bird::indicator::IndicatorLevel;

use crate::mock_hw::{
    ActuatorCall, Co2Sample, LowRng, ManualClock, MockHardware, RecordingSink, SensorCall,
};

struct Rig {
    service: MonitorService,
    hw: MockHardware,
    clock: ManualClock,
    rng: LowRng,
    sink: RecordingSink,
}

impl Rig {
    fn new(variant: AlarmVariant, hw: MockHardware) -> Self {
        let config = MonitorConfig {
            alarm_variant: variant,
            ..MonitorConfig::default()
        };
        Self {
            service: MonitorService::new(config),
            hw,
            clock: ManualClock::new(),
            rng: LowRng,
            sink: RecordingSink::new(),
        }
    }

    fn started(variant: AlarmVariant, hw: MockHardware) -> Self {
        let mut rig = Self::new(variant, hw);
        rig.service
            .start(&mut rig.hw, &mut rig.sink)
            .expect("start-up should succeed");
        rig.hw.clear();
        rig.sink.events.clear();
        rig
    }

    fn tick_with(&mut self, sample: Co2Sample) -> TickOutcome {
        self.hw.queue(sample);
        self.service
            .tick(&mut self.hw, &self.clock, &mut self.rng, &mut self.sink)
    }

    fn tick(&mut self, co2: u16) -> TickOutcome {
        self.tick_with(Co2Sample::Ready(co2))
    }
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_parks_servo_and_blanks_led() {
    let mut rig = Rig::new(AlarmVariant::Bird, MockHardware::new());
    rig.service.start(&mut rig.hw, &mut rig.sink).unwrap();

    assert_eq!(rig.hw.calls[0], ActuatorCall::MoveServo(0));
    assert_eq!(rig.hw.calls[1], ActuatorCall::SetLed { r: 0, g: 0, b: 0 });
    assert_eq!(rig.hw.measurement_interval, Some(2));
    assert_eq!(rig.hw.probed_address, Some(0x76));
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::Started {
            variant: AlarmVariant::Bird,
            pressure_compensation: false
        }
    )));
}

#[test]
fn missing_co2_sensor_is_fatal() {
    let mut hw = MockHardware::new();
    hw.co2_present = false;
    let mut rig = Rig::new(AlarmVariant::Bird, hw);

    let result = rig.service.start(&mut rig.hw, &mut rig.sink);

    assert!(matches!(result, Err(Error::Init(_))));
    assert!(rig
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::Co2SensorMissing(_))));
    assert!(!rig
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::Started { .. })));
    // Never got as far as probing the pressure sensor.
    assert_eq!(rig.hw.probed_address, None);
}

#[test]
fn missing_pressure_sensor_degrades_permanently() {
    let mut rig = Rig::new(AlarmVariant::Bird, MockHardware::new());
    rig.service.start(&mut rig.hw, &mut rig.sink).unwrap();

    assert!(!rig.service.pressure_available());
    assert!(rig
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::PressureSensorMissing(_))));

    // Plugging it in later changes nothing: detected once, never re-probed.
    rig.hw.pressure_present = true;
    rig.hw.clear();
    let out = rig.tick(700);
    assert!(!out.reading.pressure_valid);
    assert!(!rig.hw.sensor_calls.contains(&SensorCall::PressureSample));
    assert!(!rig
        .hw
        .sensor_calls
        .iter()
        .any(|c| matches!(c, SensorCall::PressureForwarded(_))));
}

#[test]
fn invalid_config_is_rejected_before_touching_hardware() {
    let config = MonitorConfig {
        warning_ppm: 2000,
        critical_ppm: 1000,
        ..MonitorConfig::default()
    };
    let mut service = MonitorService::new(config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    let result = service.start(&mut hw, &mut sink);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
    assert!(hw.calls.is_empty());
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn scenario_1_normal_reading_without_pressure() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::new());

    let out = rig.tick(500);

    assert_eq!(rig.sink.status_lines(), vec!["500 ppm"]);
    assert_eq!(out.level, IndicatorLevel::Normal);
    assert_eq!(rig.hw.last_led(), Some((0, 255, 0)));
    assert_eq!(out.transition, None);
    assert_eq!(rig.service.alarm_state(), AlarmState::Normal);
}

#[test]
fn scenario_2_warning_reading_with_pressure() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::with_pressure(101_325.0));

    let out = rig.tick(1500);

    assert_eq!(rig.sink.status_lines(), vec!["1500 ppm, 1013 hPa"]);
    assert_eq!(out.level, IndicatorLevel::Warning);
    assert_eq!(rig.hw.last_led(), Some((255, 255, 0)));
    assert_eq!(out.transition, None);
    // Warning does not suppress the ambient song.
    assert!(out.sound.is_some());
}

#[test]
fn scenario_3_rising_co2_triggers_exactly_at_threshold() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::new());

    let outcomes: Vec<_> = [1500, 1800, 1999, 2000, 2500]
        .into_iter()
        .map(|ppm| rig.tick(ppm))
        .collect();

    let transitions: Vec<_> = outcomes.iter().map(|o| o.transition).collect();
    assert_eq!(
        transitions,
        vec![None, None, None, Some(AlarmTransition::Triggered), None]
    );
    assert_eq!(outcomes[3].level, IndicatorLevel::Critical);
    assert_eq!(rig.hw.last_led(), Some((255, 0, 0)));
    assert_eq!(rig.hw.servo_moves(), vec![180]);
}

#[test]
fn scenario_4_sustained_alarm_bird_gestures_once() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::new());

    for _ in 0..5 {
        rig.tick(2500);
        rig.clock.advance(2000);
    }

    assert_eq!(rig.hw.servo_moves(), vec![180]);
    assert_eq!(rig.hw.tone_count(), 0);
}

#[test]
fn scenario_4_sustained_alarm_buzzer_tones_every_tick() {
    let mut rig = Rig::started(AlarmVariant::Buzzer, MockHardware::new());

    for _ in 0..5 {
        rig.tick(2500);
    }

    assert_eq!(rig.hw.servo_moves(), vec![180]);
    assert_eq!(rig.hw.tone_count(), 5);
    assert_eq!(rig.hw.force_low_count(), 5);
    assert!(rig.hw.calls.contains(&ActuatorCall::Tone {
        freq_hz: 2000,
        duration_ms: 200
    }));
}

#[test]
fn scenario_5_falling_co2_clears_once_bird() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::new());

    rig.tick(2500);
    let cleared = rig.tick(1800);
    let after = rig.tick(1800);

    assert_eq!(cleared.transition, Some(AlarmTransition::Cleared));
    assert_eq!(after.transition, None);
    assert_eq!(rig.hw.servo_moves(), vec![180, 0]);
}

#[test]
fn scenario_5_falling_co2_buzzer_has_no_recovery_gesture() {
    let mut rig = Rig::started(AlarmVariant::Buzzer, MockHardware::new());

    rig.tick(2500);
    let cleared = rig.tick(1800);

    assert_eq!(cleared.transition, Some(AlarmTransition::Cleared));
    assert_eq!(rig.hw.servo_moves(), vec![180]);
    assert_eq!(rig.hw.tone_count(), 1);
}

#[test]
fn alarm_events_are_emitted_per_crossing() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::new());

    for ppm in [2500, 2600, 1900, 1800, 2100] {
        rig.tick(ppm);
    }

    let alarms: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Alarm { transition, co2_ppm } => Some((*transition, *co2_ppm)),
            _ => None,
        })
        .collect();
    assert_eq!(
        alarms,
        vec![
            (AlarmTransition::Triggered, 2500),
            (AlarmTransition::Cleared, 1900),
            (AlarmTransition::Triggered, 2100),
        ]
    );
}

// ── Acquisition ───────────────────────────────────────────────

#[test]
fn pressure_is_forwarded_before_co2_is_read() {
    let mut rig = Rig::started(AlarmVariant::Buzzer, MockHardware::with_pressure(98_765.0));

    rig.tick(900);

    assert_eq!(
        rig.hw.sensor_calls,
        vec![
            SensorCall::PressureSample,
            SensorCall::PressureForwarded(987),
            SensorCall::Co2Read,
        ]
    );
}

#[test]
fn failed_pressure_sample_keeps_the_line_and_skips_compensation() {
    let mut hw = MockHardware::with_pressure(101_325.0);
    hw.pressure_failures = 1;
    let mut rig = Rig::started(AlarmVariant::Buzzer, hw);

    let out = rig.tick(700);
    assert!(out.reading.pressure_valid);
    assert_eq!(
        rig.hw.sensor_calls,
        vec![SensorCall::PressureSample, SensorCall::Co2Read]
    );

    rig.tick(710);
    rig.hw.pressure_failures = 1;
    rig.tick(720);

    assert_eq!(
        rig.sink.status_lines(),
        vec!["700 ppm, 0 hPa", "710 ppm, 1013 hPa", "720 ppm, 1013 hPa"]
    );
    let forwarded: Vec<_> = rig
        .hw
        .sensor_calls
        .iter()
        .filter(|c| matches!(c, SensorCall::PressureForwarded(_)))
        .collect();
    assert_eq!(forwarded, vec![&SensorCall::PressureForwarded(1013)]);
}

#[test]
fn stale_co2_is_carried_forward() {
    let mut rig = Rig::started(AlarmVariant::Buzzer, MockHardware::new());

    rig.tick(800);
    let not_ready = rig.tick_with(Co2Sample::NotReady);
    let failed = rig.tick_with(Co2Sample::ReadFails);

    assert_eq!(not_ready.reading.co2_ppm, 800);
    assert_eq!(failed.reading.co2_ppm, 800);
    assert_eq!(rig.sink.status_lines(), vec!["800 ppm"; 3]);
}

#[test]
fn ticks_are_counted() {
    let mut rig = Rig::started(AlarmVariant::Buzzer, MockHardware::new());
    for _ in 0..3 {
        rig.tick(400);
    }
    assert_eq!(rig.service.tick_count(), 3);
}

// ── Ambient sound ─────────────────────────────────────────────

#[test]
fn first_burst_plays_immediately_then_waits_for_deadline() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::new());

    assert!(rig.tick(600).sound.is_some());
    // LowRng: next burst at 0.5 × 10 s.
    assert_eq!(rig.service.next_sound_at_ms(), Some(5000));

    rig.clock.advance(4999);
    assert!(rig.tick(600).sound.is_none());

    rig.clock.advance(1);
    assert!(rig.tick(600).sound.is_some());
    assert_eq!(rig.service.next_sound_at_ms(), Some(10_000));
}

#[test]
fn burst_drives_buzzer_and_pauses() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::new());

    let summary = rig.tick(600).sound.unwrap();

    assert_eq!(summary.repetitions, 1);
    assert!(rig.hw.buzz_count() > 0);
    assert!(rig
        .hw
        .calls
        .iter()
        .any(|c| matches!(c, ActuatorCall::Pause(_))));
    assert!(rig
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::SoundPlayed { next_in_ms: 5000, .. })));
}

#[test]
fn no_sound_while_critical() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::new());

    for _ in 0..10 {
        let out = rig.tick(2500);
        assert!(out.sound.is_none());
        rig.clock.advance(60_000);
    }

    assert_eq!(rig.hw.buzz_count(), 0);
}

#[test]
fn song_resumes_after_alarm_clears() {
    let mut rig = Rig::started(AlarmVariant::Bird, MockHardware::new());

    rig.tick(2500);
    rig.clock.advance(60_000);
    let out = rig.tick(1200);

    assert_eq!(out.transition, Some(AlarmTransition::Cleared));
    assert!(out.sound.is_some());
}

#[test]
fn buzzer_variant_never_sings() {
    let mut rig = Rig::started(AlarmVariant::Buzzer, MockHardware::new());

    for _ in 0..5 {
        assert!(rig.tick(600).sound.is_none());
        rig.clock.advance(60_000);
    }

    assert_eq!(rig.hw.buzz_count(), 0);
    assert_eq!(rig.service.next_sound_at_ms(), None);
}
