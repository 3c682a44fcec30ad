//! Keeping the main loop at a steady pace.

use std::time::{Duration, Instant};

/// Keeps track of time between relatively steady pulses.
///
/// Ticks try to stay lined up with the original tick, but if [`Self::tick`] is called more than half a period
/// late, the next tick is reset relative to the current time instead.
pub struct Timer {
    next: Instant,
    period: Duration,
}

impl Timer {
    /// Create a new timer with the given period, in seconds. The first tick is right now.
    pub fn new(period: f32) -> Self {
        Self {
            next: Instant::now(),
            period: Duration::from_secs_f32(period),
        }
    }

    /// How much time is left before the timer ticks over. Minimum zero.
    pub fn remaining(&self) -> Duration {
        self.next
            .checked_duration_since(Instant::now())
            .unwrap_or(Duration::ZERO)
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        if now < self.next + self.period / 2 {
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }

    /// Check whether we've ticked yet; if so, advance the timer. Useful for ratelimiting.
    pub fn tick_ready(&mut self) -> bool {
        if Instant::now() >= self.next {
            self.tick();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_tick_is_immediate() {
        let mut t = Timer::new(10.0);
        assert!(t.tick_ready());
        assert!(!t.tick_ready());
        assert!(t.remaining() > Duration::from_secs(9));
    }
}
