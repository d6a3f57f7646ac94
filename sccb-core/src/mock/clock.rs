//! Virtual tick clock

use std::vec::Vec;

use sccb_hal::TickClock;

/// Tick clock that only advances when slept on
#[derive(Debug, Clone)]
pub struct SimClock {
    now: u32,
    ticks_per_second: u32,
    sleeps: Vec<u32>,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl SimClock {
    /// Create a clock at tick zero
    pub fn new(ticks_per_second: u32) -> Self {
        Self::starting_at(0, ticks_per_second)
    }

    /// Create a clock at an arbitrary tick (e.g. just before wrap-around)
    pub fn starting_at(now: u32, ticks_per_second: u32) -> Self {
        Self {
            now,
            ticks_per_second,
            sleeps: Vec::new(),
        }
    }

    /// Every sleep requested so far, in ticks
    pub fn sleeps(&self) -> &[u32] {
        &self.sleeps
    }

    /// Total ticks slept
    pub fn slept(&self) -> u64 {
        self.sleeps.iter().map(|&t| u64::from(t)).sum()
    }
}

impl TickClock for SimClock {
    fn now(&mut self) -> u32 {
        self.now
    }

    fn sleep(&mut self, ticks: u32) {
        self.sleeps.push(ticks);
        self.now = self.now.wrapping_add(ticks);
    }

    fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }
}
