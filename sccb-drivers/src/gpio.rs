//! embedded-hal GPIO adapters
//!
//! Both adapters expect the pins to be configured open-drain with external
//! pull-ups: `set_high` releases the line, `set_low` pulls it down. Pin
//! errors are not propagated. A failed write leaves the line as it was and
//! a failed read reports the line as released, which turns into a NACK or
//! a skipped stretch wait further up.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use sccb_hal::SccbPins;

fn drive<P: OutputPin>(pin: &mut P, high: bool) {
    let _ = if high { pin.set_high() } else { pin.set_low() };
}

fn sense<P: InputPin>(pin: &mut P) -> bool {
    pin.is_high().unwrap_or(true)
}

/// Open-drain SCL and SDA, both readable
///
/// Supports clock stretching.
pub struct OpenDrainPins<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
}

impl<SCL, SDA, D> OpenDrainPins<SCL, SDA, D>
where
    SCL: OutputPin + InputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    /// Wrap the pins and release both lines
    pub fn new(scl: SCL, sda: SDA, delay: D) -> Self {
        let mut pins = Self { scl, sda, delay };
        pins.set_sda(true);
        pins.set_scl(true);
        pins
    }

    /// Give the pins back
    pub fn release(self) -> (SCL, SDA, D) {
        (self.scl, self.sda, self.delay)
    }
}

impl<SCL, SDA, D> SccbPins for OpenDrainPins<SCL, SDA, D>
where
    SCL: OutputPin + InputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    fn set_sda(&mut self, high: bool) {
        drive(&mut self.sda, high);
    }

    fn set_scl(&mut self, high: bool) {
        drive(&mut self.scl, high);
    }

    fn sda_is_high(&mut self) -> bool {
        sense(&mut self.sda)
    }

    fn scl_is_high(&mut self) -> Option<bool> {
        Some(sense(&mut self.scl))
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}

/// Output-only SCL with a readable SDA
///
/// For boards where SCL cannot be read back. Clock stretching is not
/// detected; every release is taken as immediate.
pub struct OutputClockPins<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
}

impl<SCL, SDA, D> OutputClockPins<SCL, SDA, D>
where
    SCL: OutputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    /// Wrap the pins and release both lines
    pub fn new(scl: SCL, sda: SDA, delay: D) -> Self {
        let mut pins = Self { scl, sda, delay };
        pins.set_sda(true);
        pins.set_scl(true);
        pins
    }

    /// Give the pins back
    pub fn release(self) -> (SCL, SDA, D) {
        (self.scl, self.sda, self.delay)
    }
}

impl<SCL, SDA, D> SccbPins for OutputClockPins<SCL, SDA, D>
where
    SCL: OutputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    fn set_sda(&mut self, high: bool) {
        drive(&mut self.sda, high);
    }

    fn set_scl(&mut self, high: bool) {
        drive(&mut self.scl, high);
    }

    fn sda_is_high(&mut self) -> bool {
        sense(&mut self.sda)
    }

    fn scl_is_high(&mut self) -> Option<bool> {
        None
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
