//! Line-level transaction primitives
//!
//! Every primitive leaves SCL driven low except `stop()`, which leaves both
//! lines released. Bit timing uses the pin capability's busy-wait; only the
//! clock-stretch wait goes through the tick clock.

use sccb_hal::{SccbPins, TickClock};

use super::master::SccbMaster;
use crate::error::LineTimeout;

impl<P: SccbPins, C: TickClock> SccbMaster<P, C> {
    /// Release SCL and wait for the slave to let it go high
    ///
    /// Without SCL readback the release is assumed to be immediate. On
    /// timeout the lines stay as they are; the caller must issue a stop.
    pub fn release_scl_and_wait(&mut self) -> Result<(), LineTimeout> {
        self.pins.set_scl(true);

        if self.pins.scl_is_high() == Some(false) {
            let timeout = self.config.clock_timeout_ticks;
            let poll = self.config.poll_interval_ticks();
            let started = self.clock.now();

            loop {
                let elapsed = self.clock.elapsed_since(started);
                if elapsed >= timeout {
                    debug!("SCL held low for {} ticks", elapsed);
                    return Err(LineTimeout);
                }
                self.clock.sleep(poll.min(timeout - elapsed));
                if self.pins.scl_is_high() != Some(false) {
                    break;
                }
            }
        }

        self.half_bit();
        Ok(())
    }

    /// Issue a start condition
    pub fn start(&mut self) {
        self.pins.set_sda(true);
        if self.release_scl_and_wait().is_err() {
            debug!("SCL not released before start");
        }
        self.half_bit();
        self.pins.set_sda(false);
        self.half_bit();
        self.pins.set_scl(false);
    }

    /// Issue a stop condition
    ///
    /// SCL is released without waiting for it.
    pub fn stop(&mut self) {
        self.pins.set_sda(false);
        self.half_bit();
        self.pins.set_scl(true);
        self.half_bit();
        self.pins.set_sda(true);
        self.half_bit();
        self.stats.stops = self.stats.stops.wrapping_add(1);
    }

    /// Clock out the master NACK that ends every SCCB read
    pub fn force_nack(&mut self) {
        self.half_bit();
        self.pins.set_sda(true);
        if self.release_scl_and_wait().is_err() {
            debug!("SCL not released during NACK");
        }
        self.pins.set_scl(false);
        self.half_bit();
        self.pins.set_sda(false);
        self.half_bit();
    }

    /// Shift out one byte MSB first and clock in the acknowledge bit
    ///
    /// Returns `true` when the slave pulled SDA low during the ninth clock.
    pub fn write_byte(&mut self, byte: u8) -> Result<bool, LineTimeout> {
        for bit in (0..8).rev() {
            self.pins.set_scl(false);
            self.pins.set_sda(byte & (1 << bit) != 0);
            self.half_bit();
            self.release_scl_and_wait()?;
        }

        // SDA may only be released while SCL is low
        self.pins.set_scl(false);
        self.half_bit();
        self.pins.set_sda(true);
        self.half_bit();
        self.release_scl_and_wait()?;

        let ack = !self.pins.sda_is_high();
        self.pins.set_scl(false);
        trace!("wrote {=u8:#x}, ack {=bool}", byte, ack);
        Ok(ack)
    }

    /// Shift in one byte MSB first
    ///
    /// Must be followed by [`force_nack`](Self::force_nack).
    pub fn read_byte(&mut self) -> Result<u8, LineTimeout> {
        self.pins.set_sda(true);
        self.half_bit();

        let mut byte = 0u8;
        for _ in 0..8 {
            self.release_scl_and_wait()?;
            byte = (byte << 1) | u8::from(self.pins.sda_is_high());
            self.pins.set_scl(false);
            self.half_bit();
        }

        trace!("read {=u8:#x}", byte);
        Ok(byte)
    }
}
