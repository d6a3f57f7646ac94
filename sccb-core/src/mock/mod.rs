//! Simulated bus for host testing
//!
//! [`SimPins`] implements the pin capability on top of an open-drain wire
//! model with a [`SimSlave`] attached, and [`SimClock`] provides virtual
//! ticks, so every timing path (including a slave that never releases the
//! clock) runs deterministically without real time passing.
//!
//! ```ignore
//! let pins = SimPins::new(SimSlave::new(0x21));
//! let mut master = SccbMaster::new(pins, SimClock::default(), BusConfig::default())?;
//! master.transfer(&mut Message::write(0x21, 0x5A))?;
//! assert_eq!(master.pins().slave().register(), 0x5A);
//! ```

pub mod clock;
pub mod pins;
pub mod slave;

pub use clock::SimClock;
pub use pins::{Condition, Edge, SimPins, Stretch};
pub use slave::{SimSlave, SlaveEvent};

#[cfg(test)]
mod tests {
    use super::*;
    use sccb_hal::SccbPins;

    /// Clock out one byte by hand (SCL low, set SDA, SCL high)
    fn clock_byte(pins: &mut SimPins, byte: u8) {
        for bit in (0..8).rev() {
            pins.set_scl(false);
            pins.set_sda(byte & (1 << bit) != 0);
            pins.set_scl(true);
        }
    }

    #[test]
    fn test_start_and_stop_detected() {
        let mut pins = SimPins::new(SimSlave::new(0x21));

        pins.set_sda(false);
        pins.set_scl(false);
        pins.set_scl(true);
        pins.set_sda(true);

        assert_eq!(pins.conditions(), [Condition::Start, Condition::Stop]);
        assert_eq!(
            pins.slave().events(),
            [SlaveEvent::Start, SlaveEvent::Stop]
        );
        assert!(pins.is_idle());
    }

    #[test]
    fn test_slave_acks_own_address() {
        let mut pins = SimPins::new(SimSlave::new(0x21));
        pins.set_sda(false); // start

        clock_byte(&mut pins, 0x42);
        pins.set_scl(false);
        pins.set_sda(true);

        // Slave pulls SDA low for the ACK
        assert!(!pins.sda());
        assert_eq!(
            pins.slave().events().last(),
            Some(&SlaveEvent::Address {
                byte: 0x42,
                acked: true
            })
        );
    }

    #[test]
    fn test_slave_ignores_other_address() {
        let mut pins = SimPins::new(SimSlave::new(0x21));
        pins.set_sda(false);

        clock_byte(&mut pins, 0x60);
        pins.set_scl(false);
        pins.set_sda(true);

        assert!(pins.sda());
        assert_eq!(pins.slave().address_attempts(), 1);
    }

    #[test]
    fn test_stretch_releases_after_polls() {
        let mut pins = SimPins::new(SimSlave::new(0x21)).with_stretch(Stretch::Polls(3));
        pins.set_sda(false); // start, slave is now busy
        pins.set_scl(false);
        pins.set_scl(true);

        assert_eq!(pins.scl_is_high(), Some(false));
        assert_eq!(pins.scl_is_high(), Some(false));
        assert_eq!(pins.scl_is_high(), Some(true));
        assert_eq!(pins.scl_polls(), 3);
    }

    #[test]
    fn test_stuck_clock() {
        let mut pins = SimPins::new(SimSlave::new(0x21)).with_stretch(Stretch::Forever);
        pins.set_scl(true);

        for _ in 0..10 {
            assert_eq!(pins.scl_is_high(), Some(false));
        }
    }

    #[test]
    fn test_blind_scl() {
        let mut pins = SimPins::new(SimSlave::new(0x21)).without_scl_sense();
        assert_eq!(pins.scl_is_high(), None);
        assert!(!pins.can_sense_scl());
    }

    #[test]
    fn test_sim_clock() {
        use sccb_hal::TickClock;

        let mut clock = SimClock::default();
        clock.sleep(5);
        clock.sleep(7);
        assert_eq!(clock.now(), 12);
        assert_eq!(clock.sleeps(), [5, 7]);
        assert_eq!(clock.slept(), 12);
        assert_eq!(clock.ticks_per_second(), 1000);
    }
}
