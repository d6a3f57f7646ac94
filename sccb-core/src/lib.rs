//! Board-agnostic SCCB transaction engine
//!
//! This crate contains everything above the pin capability:
//!
//! - Bus configuration and the user-facing settings surface
//! - Transaction primitives (start, stop, byte shifting, forced NACK)
//! - Transfer sequencing with address retries and timeout mapping
//! - The bus access guard that serialises callers
//! - Device handles and running statistics
//!
//! # Example
//!
//! ```ignore
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use sccb_core::{Bus, BusConfig};
//!
//! let bus: Bus<NoopRawMutex, _, _> =
//!     Bus::new("cam0", pins, clock, BusConfig::from_bitrate(100_000)?)?;
//! let sensor = bus.device(0x21);
//! sensor.write(0x12)?;
//! let id = sensor.read()?;
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod bus;
pub mod config;
pub mod device;
pub mod error;
pub mod message;
pub mod state;
pub mod stats;

#[cfg(any(test, feature = "std"))]
pub mod sync;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use bus::{Bus, SccbMaster};
pub use config::{AddressPolicy, BusConfig, BusSettings};
pub use device::SccbDevice;
pub use error::{ConfigError, LineTimeout, TransferError};
pub use message::{Direction, Message};
pub use stats::BusStats;
