//! Bus line abstractions
//!
//! Both SCCB lines are open-drain: the master only ever pulls a line low.
//! "Setting a line high" means releasing it and letting the pull-up win,
//! which is why the master must be able to read a released line back.

/// One of the two bus lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Serial clock
    Scl,
    /// Serial data
    Sda,
}

/// Pin capability used by the SCCB engine
///
/// Implementations own the physical line pair of exactly one bus. None of
/// the methods can fail: a pin driver that reports errors should map them
/// to the closest electrical meaning (a failed read of a released line is
/// best reported as "high").
pub trait SccbPins {
    /// Drive SDA low (`false`) or release it (`true`)
    fn set_sda(&mut self, high: bool);

    /// Drive SCL low (`false`) or release it (`true`)
    fn set_scl(&mut self, high: bool);

    /// Sample the SDA line
    fn sda_is_high(&mut self) -> bool;

    /// Sample the SCL line
    ///
    /// Returns `None` when the platform cannot read SCL back. Clock
    /// stretching is then not detected and timing becomes best-effort.
    fn scl_is_high(&mut self) -> Option<bool>;

    /// Busy-wait for the given number of microseconds
    ///
    /// Bit timing is far below scheduler granularity, so this must not yield.
    fn delay_us(&mut self, us: u32);

    /// Drive or release a line by name
    fn set_line(&mut self, line: Line, high: bool) {
        match line {
            Line::Scl => self.set_scl(high),
            Line::Sda => self.set_sda(high),
        }
    }

    /// Whether SCL can be read back for stretch detection
    fn can_sense_scl(&mut self) -> bool {
        self.scl_is_high().is_some()
    }
}

impl<T: SccbPins + ?Sized> SccbPins for &mut T {
    fn set_sda(&mut self, high: bool) {
        (**self).set_sda(high)
    }

    fn set_scl(&mut self, high: bool) {
        (**self).set_scl(high)
    }

    fn sda_is_high(&mut self) -> bool {
        (**self).sda_is_high()
    }

    fn scl_is_high(&mut self) -> Option<bool> {
        (**self).scl_is_high()
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
