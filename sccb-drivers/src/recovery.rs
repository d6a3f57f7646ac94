//! Hung bus recovery
//!
//! A slave interrupted in the middle of a read (master reset, debugger
//! halt) keeps SDA low while it waits for the rest of its byte to be
//! clocked out, and no start condition can get through. Clocking SCL until
//! the slave lets go of SDA, then issuing a stop, returns the bus to idle.
//!
//! Run this once at setup, before the first transfer. On a healthy bus it
//! costs a single SDA read.

use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use sccb_core::Bus;
use sccb_hal::{SccbPins, TickClock};

/// Clock pulses needed to finish any partially sent byte plus its ACK bit
pub const RECOVERY_CLOCKS: u8 = 9;

/// Half period of a recovery clock pulse, in microseconds
pub const RECOVERY_HALF_PERIOD_US: u32 = 100;

/// Successful recovery outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Recovery {
    /// SDA was already released
    NotHung,
    /// SDA was held low and got released after `clocks` pulses
    Recovered { clocks: u8 },
}

/// Recovery failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecoveryError {
    /// SDA was still low after the last clock pulse
    StillHung,
}

impl fmt::Display for RecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryError::StillHung => f.write_str("SDA still held low after recovery clocks"),
        }
    }
}

impl core::error::Error for RecoveryError {}

/// Clock SCL until SDA is released, up to `max_clocks` pulses
pub fn unhang<P: SccbPins>(pins: &mut P, max_clocks: u8) -> Result<Recovery, RecoveryError> {
    pins.set_sda(true);
    pins.set_scl(true);
    pins.delay_us(RECOVERY_HALF_PERIOD_US);

    if pins.sda_is_high() {
        return Ok(Recovery::NotHung);
    }

    for pulse in 1..=max_clocks {
        pins.set_scl(false);
        pins.delay_us(RECOVERY_HALF_PERIOD_US);
        pins.set_scl(true);
        pins.delay_us(RECOVERY_HALF_PERIOD_US);

        if pins.sda_is_high() {
            info!("SDA released after {=u8} recovery clocks", pulse);
            send_stop(pins);
            return Ok(Recovery::Recovered { clocks: pulse });
        }
    }

    warn!("SDA still low after {=u8} recovery clocks", max_clocks);
    Err(RecoveryError::StillHung)
}

/// Run [`unhang`] with the default pulse count on a bus's pins
pub fn unhang_bus<M, P, C>(bus: &Bus<M, P, C>) -> Result<Recovery, RecoveryError>
where
    M: RawMutex,
    P: SccbPins,
    C: TickClock,
{
    bus.with_pins(|pins| unhang(pins, RECOVERY_CLOCKS))
}

fn send_stop<P: SccbPins>(pins: &mut P) {
    pins.set_scl(false);
    pins.delay_us(RECOVERY_HALF_PERIOD_US);
    pins.set_sda(false);
    pins.delay_us(RECOVERY_HALF_PERIOD_US);
    pins.set_scl(true);
    pins.delay_us(RECOVERY_HALF_PERIOD_US);
    pins.set_sda(true);
    pins.delay_us(RECOVERY_HALF_PERIOD_US);
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use sccb_core::mock::{Condition, SimClock, SimPins, SimSlave, Stretch};
    use sccb_core::BusConfig;

    /// Leave the slave in the middle of a read with SDA held low
    fn interrupted_read(pins: &mut SimPins) {
        pins.set_sda(false);
        pins.set_scl(false);
        pins.set_sda(true);
        assert!(!pins.sda());
        pins.clear_trace();
    }

    fn reading_slave() -> SimSlave {
        SimSlave::new(0x21).reads_without_address().with_register(0x00)
    }

    #[test]
    fn test_idle_bus_not_hung() {
        let mut pins = SimPins::new(SimSlave::new(0x21));

        assert_eq!(unhang(&mut pins, RECOVERY_CLOCKS), Ok(Recovery::NotHung));
        assert!(pins.trace().is_empty());
        assert_eq!(pins.delay_us_total(), 100);
    }

    #[test]
    fn test_interrupted_read_recovered() {
        let mut pins = SimPins::new(reading_slave());
        interrupted_read(&mut pins);

        // Seven falls shift out bits 6..0, the eighth releases SDA
        assert_eq!(
            unhang(&mut pins, RECOVERY_CLOCKS),
            Ok(Recovery::Recovered { clocks: 8 })
        );
        assert!(pins.is_idle());
        assert_eq!(pins.conditions(), [Condition::Stop]);
    }

    #[test]
    fn test_too_few_clocks() {
        let mut pins = SimPins::new(reading_slave());
        interrupted_read(&mut pins);

        assert_eq!(unhang(&mut pins, 3), Err(RecoveryError::StillHung));
        assert!(!pins.sda());
    }

    #[test]
    fn test_recovery_stops_at_first_release() {
        let mut pins = SimPins::new(reading_slave().with_register(0x7F));
        interrupted_read(&mut pins);

        // Bit 6 onwards is one, so the first pulse frees SDA
        assert_eq!(unhang(&mut pins, 1), Ok(Recovery::Recovered { clocks: 1 }));
        assert_eq!(pins.conditions(), [Condition::Stop]);
    }

    #[test]
    fn test_stuck_clock_still_hung() {
        let mut pins = SimPins::new(reading_slave()).with_stretch(Stretch::Polls(u32::MAX));
        interrupted_read(&mut pins);

        assert_eq!(unhang(&mut pins, RECOVERY_CLOCKS), Err(RecoveryError::StillHung));
        assert!(!pins.scl());
    }

    #[test]
    fn test_bus_usable_after_recovery() {
        let mut pins = SimPins::new(reading_slave());
        interrupted_read(&mut pins);

        let bus: Bus<NoopRawMutex, _, _> =
            Bus::new("cam0", pins, SimClock::default(), BusConfig::default()).unwrap();
        assert!(matches!(unhang_bus(&bus), Ok(Recovery::Recovered { .. })));

        bus.with_pins(|pins| *pins.slave_mut() = SimSlave::new(0x21));
        bus.send(0x21, 0x42).unwrap();
        assert_eq!(bus.receive(0x21), Ok(0x42));
    }
}
