//! Client handle for one device on a bus

use embassy_sync::blocking_mutex::raw::RawMutex;
use sccb_hal::{SccbPins, TickClock};

use crate::bus::Bus;
use crate::error::TransferError;
use crate::message::ADDRESS_MASK;

/// A bus reference bound to one 7-bit device address
pub struct SccbDevice<'a, M: RawMutex, P, C> {
    bus: &'a Bus<M, P, C>,
    address: u16,
}

impl<'a, M: RawMutex, P: SccbPins, C: TickClock> SccbDevice<'a, M, P, C> {
    /// Bind a device address to a bus
    pub fn new(bus: &'a Bus<M, P, C>, address: u16) -> Self {
        Self {
            bus,
            address: address & ADDRESS_MASK,
        }
    }

    /// 7-bit device address
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Bus the device sits on
    pub fn bus(&self) -> &'a Bus<M, P, C> {
        self.bus
    }

    /// Write one byte to the device
    pub fn write(&self, byte: u8) -> Result<(), TransferError> {
        self.bus.send(self.address, byte)
    }

    /// Read one byte from the device
    pub fn read(&self) -> Result<u8, TransferError> {
        self.bus.receive(self.address)
    }
}
