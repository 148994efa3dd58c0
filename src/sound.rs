//! Ambient bird-song generator.
//!
//! A burst is 1–2 repetitions of three chirp phases, each a run of
//! square-wave sweeps on the buzzer with randomized counts and pauses:
//!
//! | Phase      | Sweeps            | Half-period (µs) | Pulses/step |
//! |------------|-------------------|------------------|-------------|
//! | high chirp | angle/10 + 1      | 100 → 1          | 5           |
//! | low chirp  | 3 × (rise + tail) | 0 → 199, 90 → 81 | 1, 5        |
//! | tweet      | 2                 | 80 → 1           | count       |
//!
//! Composition ([`compose_burst`]) is separate from playback
//! ([`play_burst`]) so the structure can be checked without a buzzer.
//! Randomness comes from the injected [`RandomSource`].

use heapless::Vec;

use crate::app::ports::{ActuatorPort, RandomSource};

/// Upper bound on steps in one burst (2 repetitions × 17 steps).
pub const MAX_BURST_STEPS: usize = 40;

/// One unit of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Walk the half-period from `from_us` to `to_us` (inclusive, step 1),
    /// emitting `pulses` periods at each value.
    Sweep { from_us: u16, to_us: u16, pulses: u16 },
    /// Silence.
    Pause { ms: u16 },
}

impl Step {
    fn half_periods(from_us: u16, to_us: u16) -> impl Iterator<Item = u16> {
        let rising = from_us <= to_us;
        let (lo, hi) = if rising { (from_us, to_us) } else { (to_us, from_us) };
        let mut values = lo..=hi;
        core::iter::from_fn(move || if rising { values.next() } else { values.next_back() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Burst {
    pub repetitions: u8,
    pub steps: Vec<Step, MAX_BURST_STEPS>,
}

/// What a finished burst looked like, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstSummary {
    pub repetitions: u8,
    pub sweeps: u16,
    pub pause_ms: u32,
}

impl Burst {
    fn push(&mut self, step: Step) {
        // Capacity covers the largest composable burst.
        let pushed = self.steps.push(step);
        debug_assert!(pushed.is_ok(), "burst step capacity exceeded");
    }

    pub fn summary(&self) -> BurstSummary {
        let mut sweeps = 0;
        let mut pause_ms = 0;
        for step in &self.steps {
            match *step {
                Step::Sweep { .. } => sweeps += 1,
                Step::Pause { ms } => pause_ms += u32::from(ms),
            }
        }
        BurstSummary {
            repetitions: self.repetitions,
            sweeps,
            pause_ms,
        }
    }
}

fn pause(rng: &mut impl RandomSource, low: u32, high: u32) -> Step {
    Step::Pause {
        ms: rng.range(low, high) as u16,
    }
}

/// Draw one randomized burst.
pub fn compose_burst(rng: &mut impl RandomSource) -> Burst {
    let mut burst = Burst {
        repetitions: rng.range(1, 3) as u8,
        ..Burst::default()
    };

    for _ in 0..burst.repetitions {
        let angle = rng.range(20, 50) as u16;
        let count = rng.range(2, 6) as u16;

        // High chirp.
        for _ in 0..=(angle / 10) {
            burst.push(Step::Sweep { from_us: 100, to_us: 1, pulses: 5 });
        }
        burst.push(pause(rng, 80, 120));

        // Low chirp with a short high tail.
        for _ in 0..3 {
            burst.push(Step::Sweep { from_us: 0, to_us: 199, pulses: 1 });
            burst.push(Step::Sweep { from_us: 90, to_us: 81, pulses: 5 });
        }
        burst.push(pause(rng, 80, 120));

        // Tweet.
        for _ in 0..2 {
            burst.push(Step::Sweep { from_us: 80, to_us: 1, pulses: count });
        }
        burst.push(pause(rng, 800, 1200));

        // Gap between the closer tweets.
        burst.push(pause(rng, 200, 700));
    }

    burst
}

/// Play a composed burst.  Blocks for its full duration.
pub fn play_burst(burst: &Burst, hw: &mut impl ActuatorPort) {
    for step in &burst.steps {
        match *step {
            Step::Sweep { from_us, to_us, pulses } => {
                for half in Step::half_periods(from_us, to_us) {
                    hw.buzz(u32::from(half), u32::from(pulses));
                }
            }
            Step::Pause { ms } => hw.pause_ms(u32::from(ms)),
        }
    }
}

/// Time until the next burst: uniform in `[0.5, 1.5) × mean`.
pub fn next_interval_ms(mean_secs: u32, rng: &mut impl RandomSource) -> u32 {
    let mean_ms = mean_secs.saturating_mul(1000);
    rng.range(mean_ms / 2, mean_ms.saturating_add(mean_ms / 2))
}
