//! Transfer sequencing
//!
//! One call moves one byte: start, address phase with retries, data phase,
//! stop. Whatever fails in between, the final stop is issued exactly once.

use sccb_hal::{SccbPins, TickClock};

use super::master::SccbMaster;
use crate::error::TransferError;
use crate::message::{Direction, Message};
use crate::state::TransactionEvent;

impl<P: SccbPins, C: TickClock> SccbMaster<P, C> {
    /// Run one single-byte transfer
    ///
    /// On a successful read `message.byte` holds the received byte.
    pub fn transfer(&mut self, message: &mut Message) -> Result<(), TransferError> {
        self.stats.transfers = self.stats.transfers.wrapping_add(1);

        self.start();
        self.advance(TransactionEvent::Start);

        let result = self.run_phases(message);

        self.stop();
        self.advance(TransactionEvent::Stop);
        self.advance(TransactionEvent::Finish);

        self.stats.record(&result);
        self.last_error = result.err();
        result
    }

    fn run_phases(&mut self, message: &mut Message) -> Result<(), TransferError> {
        if self.config.read_addressing.addresses(message.direction) {
            self.send_address(message.address_byte())?;
        } else {
            self.advance(TransactionEvent::SkipAddress);
        }
        self.full_bit();

        match message.direction {
            Direction::Write => self.write_data(message.byte),
            Direction::Read => {
                message.byte = self.read_byte()?;
                self.force_nack();
                Ok(())
            }
        }
    }

    /// Address phase, retried with a stop/start resynchronisation
    fn send_address(&mut self, address_byte: u8) -> Result<(), TransferError> {
        self.advance(TransactionEvent::Address);
        let retries = self.config.address_retries;

        for attempt in 0..=retries {
            if attempt > 0 {
                self.stop();
                self.half_bit();
                self.start();
            }

            if self.write_byte(address_byte)? {
                self.advance(TransactionEvent::AddressAck);
                return Ok(());
            }

            self.stats.address_nacks = self.stats.address_nacks.wrapping_add(1);
            debug!(
                "address {=u8:#x} not acknowledged, attempt {=u32}",
                address_byte >> 1,
                attempt + 1
            );
            if attempt < retries {
                self.advance(TransactionEvent::AddressNack);
            }
        }

        debug!("address {=u8:#x} gave up after {=u32} attempts", address_byte >> 1, retries + 1);
        Err(TransferError::NoAcknowledge)
    }

    fn write_data(&mut self, byte: u8) -> Result<(), TransferError> {
        if self.write_byte(byte)? {
            Ok(())
        } else {
            warn!("data byte {=u8:#x} not acknowledged", byte);
            Err(TransferError::Io)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AddressPolicy, BusConfig};
    use crate::mock::{Condition, SimClock, SimPins, SimSlave, SlaveEvent, Stretch};
    use crate::state::TransactionState;
    use proptest::prelude::*;

    fn master_with(slave: SimSlave, config: BusConfig) -> SccbMaster<SimPins, SimClock> {
        SccbMaster::new(SimPins::new(slave), SimClock::default(), config).unwrap()
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let mut bus = master_with(SimSlave::new(0x21), BusConfig::default());

        bus.transfer(&mut Message::write(0x21, 0x5A)).unwrap();
        assert_eq!(bus.pins().slave().register(), 0x5A);

        let mut read = Message::read(0x21);
        bus.transfer(&mut read).unwrap();
        assert_eq!(read.byte, 0x5A);

        assert_eq!(
            bus.pins().slave().events(),
            [
                SlaveEvent::Start,
                SlaveEvent::Address {
                    byte: 0x42,
                    acked: true
                },
                SlaveEvent::Written(0x5A),
                SlaveEvent::Stop,
                SlaveEvent::Start,
                SlaveEvent::Address {
                    byte: 0x43,
                    acked: true
                },
                SlaveEvent::Read {
                    byte: 0x5A,
                    nacked: true
                },
                SlaveEvent::Stop,
            ]
        );
        assert!(bus.pins().is_idle());
        assert_eq!(bus.state(), TransactionState::Idle);
        assert_eq!(bus.stats().completed, 2);
        assert_eq!(bus.last_error(), None);
    }

    #[test]
    fn test_address_retries_then_no_acknowledge() {
        for retries in 0..4u32 {
            let config = BusConfig::default().with_retries(retries);
            let mut bus = master_with(SimSlave::new(0x21).nack_address(), config);

            let result = bus.transfer(&mut Message::write(0x21, 0x10));
            assert_eq!(result, Err(TransferError::NoAcknowledge));

            let attempts = retries as usize + 1;
            assert_eq!(bus.pins().slave().address_attempts(), attempts);

            // start (stop start)* stop
            let conditions = bus.pins().conditions();
            assert_eq!(conditions.len(), 2 * attempts);
            for pair in conditions.chunks(2) {
                assert_eq!(pair, [Condition::Start, Condition::Stop]);
            }

            let stats = bus.stats();
            assert_eq!(stats.address_nacks, retries + 1);
            assert_eq!(stats.no_acknowledge, 1);
            assert_eq!(stats.stops, retries + 1);
            assert_eq!(bus.last_error(), Some(TransferError::NoAcknowledge));
            assert!(bus.pins().is_idle());
        }
    }

    #[test]
    fn test_next_transfer_after_no_acknowledge() {
        let config = BusConfig::default().with_retries(2);
        let mut bus = master_with(SimSlave::new(0x21).nack_address(), config);

        bus.transfer(&mut Message::write(0x21, 0x10)).unwrap_err();
        *bus.pins_mut().slave_mut() = SimSlave::new(0x21);

        bus.transfer(&mut Message::write(0x21, 0x10)).unwrap();
        assert_eq!(bus.pins().slave().address_attempts(), 1);
        assert_eq!(bus.pins().slave().register(), 0x10);
    }

    #[test]
    fn test_stuck_clock_stops_exactly_once() {
        let pins = SimPins::new(SimSlave::new(0x21)).with_stretch(Stretch::Forever);
        let config = BusConfig::default().with_timeout_ticks(40).with_retries(3);
        let mut bus = SccbMaster::new(pins, SimClock::default(), config).unwrap();

        let result = bus.transfer(&mut Message::write(0x21, 0x5A));

        assert_eq!(result, Err(TransferError::Timeout));
        assert_eq!(bus.stats().stops, 1);
        assert_eq!(bus.stats().timeouts, 1);
        assert_eq!(bus.stats().address_nacks, 0);
        assert_eq!(bus.state(), TransactionState::Idle);
        // One wait in start, one on the first address bit
        assert_eq!(bus.clock().slept(), 80);
    }

    #[test]
    fn test_data_nack_is_io_error() {
        let mut bus = master_with(SimSlave::new(0x21).nack_data(), BusConfig::default());

        let result = bus.transfer(&mut Message::write(0x21, 0x77));

        assert_eq!(result, Err(TransferError::Io));
        assert_eq!(bus.stats().data_nacks, 1);
        assert_eq!(bus.stats().address_nacks, 0);
        assert!(bus.pins().is_idle());
    }

    #[test]
    fn test_read_without_address_phase() {
        let slave = SimSlave::new(0x21).reads_without_address().with_register(0xC3);
        let config = BusConfig::default().with_read_addressing(AddressPolicy::WritesOnly);
        let mut bus = master_with(slave, config);

        let mut message = Message::read(0x21);
        bus.transfer(&mut message).unwrap();

        assert_eq!(message.byte, 0xC3);
        assert_eq!(bus.pins().slave().address_attempts(), 0);
        assert_eq!(
            bus.pins().conditions(),
            [Condition::Start, Condition::Stop]
        );
    }

    #[test]
    fn test_unaddressed_read_keeps_full_bit_gap() {
        let slave = SimSlave::new(0x21).reads_without_address().with_register(0x5A);
        let config = BusConfig::default().with_read_addressing(AddressPolicy::WritesOnly);
        let mut bus = master_with(slave, config);
        let before = bus.pins().delay_us_total();

        let mut message = Message::read(0x21);
        bus.transfer(&mut message).unwrap();

        assert_eq!(message.byte, 0x5A);
        // start 3, gap 2, read 17, nack 4, stop 3 half bits of 5 us
        assert_eq!(bus.pins().delay_us_total() - before, 29 * 5);
    }

    #[test]
    fn test_read_with_stretching_slave() {
        let slave = SimSlave::new(0x21).with_register(0x3C);
        let pins = SimPins::new(slave).with_stretch(Stretch::Polls(2));
        let mut bus = SccbMaster::new(pins, SimClock::default(), BusConfig::default()).unwrap();

        let mut message = Message::read(0x21);
        bus.transfer(&mut message).unwrap();

        assert_eq!(message.byte, 0x3C);
        assert!(bus.pins().is_idle());
    }

    proptest! {
        #[test]
        fn test_any_address_and_byte(address in 0u8..0x80, byte in any::<u8>()) {
            let mut bus = master_with(SimSlave::new(address), BusConfig::default());

            bus.transfer(&mut Message::write(u16::from(address), byte)).unwrap();
            let mut read = Message::read(u16::from(address));
            bus.transfer(&mut read).unwrap();

            prop_assert_eq!(read.byte, byte);
            prop_assert_eq!(bus.stats().stops, 2);
        }
    }
}
