//! Simulation clock
//!
//! Times are seconds since the clock was created, as `f32`.

use std::time::Instant;

/// Time reported before the first tick, so the first delta is never zero
pub const INITIAL_TIME: f32 = 0.001;

/// Produces the current time and the delta since the previous sample
///
/// [`Clock::tick`] samples the wall clock; [`Clock::advance`] steps by a
/// fixed amount instead, for fixed-step loops and tests. Both keep time
/// monotonic.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    origin: Instant,
    last: f32,
    now: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            last: 0.0,
            now: INITIAL_TIME,
        }
    }

    /// Sample the wall clock
    pub fn tick(&mut self) {
        self.last = self.now;
        self.now = self.origin.elapsed().as_secs_f32().max(self.now);
    }

    /// Step forward by `dt` seconds without looking at the wall clock
    pub fn advance(&mut self, dt: f32) {
        self.last = self.now;
        self.now += dt.max(0.0);
    }

    /// Seconds between the last two samples
    #[inline]
    pub fn delta_t(&self) -> f32 {
        self.now - self.last
    }

    /// Seconds since creation, as of the last sample
    #[inline]
    pub fn now(&self) -> f32 {
        self.now
    }
}
