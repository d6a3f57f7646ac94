//! Scheduler tick abstractions
//!
//! The clock-stretch wait is the only place the engine suspends. It polls
//! SCL and sleeps between polls through this trait, so platforms can plug in
//! their RTOS tick and tests can run on virtual time.

/// Scheduler tick source with a suspending sleep
pub trait TickClock {
    /// Current tick count
    ///
    /// The counter may wrap; callers compare with `wrapping_sub`.
    fn now(&mut self) -> u32;

    /// Suspend the caller for at least `ticks` ticks
    ///
    /// Unlike [`SccbPins::delay_us`](crate::SccbPins::delay_us) this should
    /// let other threads run.
    fn sleep(&mut self, ticks: u32);

    /// Number of ticks per second
    ///
    /// Used as the clock-release timeout when none is configured.
    fn ticks_per_second(&self) -> u32;

    /// Ticks elapsed since `start`
    fn elapsed_since(&mut self, start: u32) -> u32 {
        self.now().wrapping_sub(start)
    }
}

impl<T: TickClock + ?Sized> TickClock for &mut T {
    fn now(&mut self) -> u32 {
        (**self).now()
    }

    fn sleep(&mut self, ticks: u32) {
        (**self).sleep(ticks)
    }

    fn ticks_per_second(&self) -> u32 {
        (**self).ticks_per_second()
    }
}
