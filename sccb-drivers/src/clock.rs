//! Tick clocks for the clock-stretch wait

use sccb_hal::TickClock;

/// Millisecond ticks on top of `std::time`
///
/// `sleep` parks the calling thread, so other threads keep running while a
/// slave stretches the clock.
#[cfg(any(test, feature = "std"))]
#[derive(Debug, Clone, Copy)]
pub struct StdTickClock {
    epoch: std::time::Instant,
}

#[cfg(any(test, feature = "std"))]
impl StdTickClock {
    /// Ticks per second
    pub const TICK_HZ: u32 = 1000;

    /// Create a clock counting from now
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl Default for StdTickClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "std"))]
impl TickClock for StdTickClock {
    fn now(&mut self) -> u32 {
        // Truncation is the wrap-around
        self.epoch.elapsed().as_millis() as u32
    }

    fn sleep(&mut self, ticks: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ticks)));
    }

    fn ticks_per_second(&self) -> u32 {
        Self::TICK_HZ
    }
}

/// Ticks from the embassy time driver
///
/// Best effort only: transfers run in blocking context, so `sleep` busy-waits
/// on the time driver and nothing else runs on this core meanwhile. Pair it
/// with `NoopRawMutex` from thread mode, not a critical-section mutex.
#[cfg(feature = "embassy-time")]
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbassyTickClock;

#[cfg(feature = "embassy-time")]
impl TickClock for EmbassyTickClock {
    fn now(&mut self) -> u32 {
        embassy_time::Instant::now().as_ticks() as u32
    }

    fn sleep(&mut self, ticks: u32) {
        embassy_time::block_for(embassy_time::Duration::from_ticks(u64::from(ticks)));
    }

    fn ticks_per_second(&self) -> u32 {
        u32::try_from(embassy_time::TICK_HZ).unwrap_or(u32::MAX)
    }
}
