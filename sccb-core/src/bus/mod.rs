//! SCCB bus and bus access guard
//!
//! A [`Bus`] owns one [`SccbMaster`] behind an `embassy-sync` blocking mutex,
//! so exactly one transfer runs on the lines at a time no matter how many
//! callers share the bus. The raw mutex decides what "blocking" means:
//!
//! | Raw mutex | Callers |
//! |-----------|---------|
//! | `NoopRawMutex` | single executor or thread-mode code on bare metal |
//! | [`StdRawMutex`](crate::sync::StdRawMutex) | OS threads |
//!
//! A critical-section mutex works but masks interrupts for the whole
//! transfer, including any clock stretch wait of up to the clock timeout.
//!
//! Waiting for the guard has no timeout. The only other wait is the clock
//! stretch poll inside the primitives.

mod master;
mod primitives;
mod transfer;

pub use master::SccbMaster;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::String;
use sccb_hal::{SccbPins, TickClock};

use crate::config::{bus_name, BusConfig, BusSettings, MAX_BUS_NAME_LEN};
use crate::device::SccbDevice;
use crate::error::{ConfigError, TransferError};
use crate::message::Message;
use crate::stats::BusStats;

/// A named SCCB bus shared by any number of callers
pub struct Bus<M: RawMutex, P, C> {
    name: String<MAX_BUS_NAME_LEN>,
    inner: Mutex<M, RefCell<SccbMaster<P, C>>>,
}

impl<M: RawMutex, P: SccbPins, C: TickClock> Bus<M, P, C> {
    /// Create a bus on the given pin capability
    ///
    /// Setup errors are returned here; transfers never report them.
    pub fn new(name: &str, pins: P, clock: C, config: BusConfig) -> Result<Self, ConfigError> {
        let name = bus_name(name)?;
        let master = SccbMaster::new(pins, clock, config)?;

        info!(
            "SCCB bus {=str} registered, half bit {=u32} us, timeout {=u32} ticks",
            name.as_str(),
            master.config().half_bit_delay_us,
            master.config().clock_timeout_ticks
        );

        Ok(Self {
            name,
            inner: Mutex::new(RefCell::new(master)),
        })
    }

    /// Create a bus from loaded settings
    pub fn from_settings(settings: &BusSettings, pins: P, clock: C) -> Result<Self, ConfigError> {
        Self::new(&settings.name, pins, clock, settings.bus_config()?)
    }

    fn with_master<R>(&self, f: impl FnOnce(&mut SccbMaster<P, C>) -> R) -> R {
        self.inner.lock(|master| f(&mut master.borrow_mut()))
    }

    /// Run one single-byte transfer, waiting for the bus if it is busy
    pub fn transfer(&self, message: &mut Message) -> Result<(), TransferError> {
        self.with_master(|master| master.transfer(message))
    }

    /// Write one byte to a device
    pub fn send(&self, address: u16, byte: u8) -> Result<(), TransferError> {
        self.transfer(&mut Message::write(address, byte))
    }

    /// Read one byte from a device
    pub fn receive(&self, address: u16) -> Result<u8, TransferError> {
        let mut message = Message::read(address);
        self.transfer(&mut message)?;
        Ok(message.byte)
    }

    /// Run a closure on the pin capability while holding the guard
    ///
    /// The closure must not use this bus.
    pub fn with_pins<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        self.with_master(|master| f(master.pins_mut()))
    }

    /// Handle bound to one device address
    pub fn device(&self, address: u16) -> SccbDevice<'_, M, P, C> {
        SccbDevice::new(self, address)
    }

    /// Bus name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved configuration
    pub fn config(&self) -> BusConfig {
        self.with_master(|master| *master.config())
    }

    /// Statistics since creation
    pub fn stats(&self) -> BusStats {
        self.with_master(|master| master.stats())
    }

    /// Error of the most recent transfer, if it failed
    pub fn last_error(&self) -> Option<TransferError> {
        self.with_master(|master| master.last_error())
    }

    /// Take the engine back out of the guard
    pub fn into_master(self) -> SccbMaster<P, C> {
        self.inner.into_inner().into_inner()
    }
}
