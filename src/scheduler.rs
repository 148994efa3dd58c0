//! Tick cadence for the monitor loop.
//!
//! Wakeups are anchored at `t0 + k × period` on the injected
//! [`Clock`](crate::app::ports::Clock).  When a blocking actuation (a chirp
//! burst, a servo move) overruns its slot the next tick runs immediately and
//! the schedule re-anchors to the current time, so missed ticks are skipped
//! rather than replayed back-to-back.

use log::debug;

use crate::app::ports::Clock;

#[derive(Debug, Clone, Copy)]
pub struct TickSchedule {
    period_ms: u32,
    next_wake_ms: Option<u64>,
}

impl TickSchedule {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            next_wake_ms: None,
        }
    }

    /// Pin the grid to `now_ms`: the first tick slot starts here.
    pub fn anchor(&mut self, now_ms: u64) {
        self.next_wake_ms = Some(now_ms);
    }

    /// Milliseconds to wait from `now_ms` until the next tick, advancing the
    /// schedule.  Without an [`anchor`](Self::anchor), the first call anchors
    /// the schedule at `now_ms`.
    pub fn delay_until_next(&mut self, now_ms: u64) -> u32 {
        let period = u64::from(self.period_ms);
        let target = match self.next_wake_ms {
            None => now_ms + period,
            Some(wake) => wake + period,
        };

        if target <= now_ms {
            debug!(
                "scheduler: tick overran by {} ms, re-anchoring",
                now_ms - target
            );
            self.next_wake_ms = Some(now_ms);
            return 0;
        }

        self.next_wake_ms = Some(target);
        (target - now_ms) as u32
    }

    /// Block on `clock` until the next tick is due.
    pub fn wait(&mut self, clock: &mut impl Clock) {
        let delay = self.delay_until_next(clock.now_ms());
        if delay > 0 {
            clock.sleep_ms(delay);
        }
    }
}
