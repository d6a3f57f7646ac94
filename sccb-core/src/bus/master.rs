//! Unguarded SCCB master
//!
//! [`SccbMaster`] owns the pin capability, the tick clock and the per-bus
//! state. The line-level primitives live in `primitives.rs` and the
//! transfer sequencing in `transfer.rs`; both are `impl` blocks on this type.

use sccb_hal::{SccbPins, TickClock};

use crate::config::BusConfig;
use crate::error::{ConfigError, TransferError};
use crate::state::{TransactionEvent, TransactionState};
use crate::stats::BusStats;

/// Bit-banged SCCB master for one line pair
///
/// Not synchronised; wrap it in a [`Bus`](super::Bus) to share it.
pub struct SccbMaster<P, C> {
    pub(super) config: BusConfig,
    pub(super) pins: P,
    pub(super) clock: C,
    pub(super) state: TransactionState,
    pub(super) stats: BusStats,
    pub(super) last_error: Option<TransferError>,
}

impl<P: SccbPins, C: TickClock> SccbMaster<P, C> {
    /// Create a master
    ///
    /// A zero clock timeout is replaced by one second of the clock's ticks.
    /// Both lines are released so the bus starts idle.
    pub fn new(mut pins: P, clock: C, config: BusConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = config.resolve_timeout(clock.ticks_per_second());

        pins.set_sda(true);
        pins.set_scl(true);

        Ok(Self {
            config,
            pins,
            clock,
            state: TransactionState::Idle,
            stats: BusStats::default(),
            last_error: None,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Get the pin capability
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Get the pin capability mutably
    ///
    /// Driving the lines outside a transaction can leave the bus in a state
    /// the next `start()` cannot recover from.
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Get the tick clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current transaction state
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Statistics since creation
    pub fn stats(&self) -> BusStats {
        self.stats
    }

    /// Error of the most recent transfer, if it failed
    pub fn last_error(&self) -> Option<TransferError> {
        self.last_error
    }

    /// Release the pin capability and clock
    pub fn into_parts(self) -> (P, C) {
        (self.pins, self.clock)
    }

    #[inline]
    pub(super) fn half_bit(&mut self) {
        self.pins.delay_us(self.config.half_bit_delay_us);
    }

    #[inline]
    pub(super) fn full_bit(&mut self) {
        self.pins.delay_us(self.config.full_bit_delay_us());
    }

    pub(super) fn advance(&mut self, event: TransactionEvent) {
        self.state = self.state.transition(event);
    }
}
