//! Platform implementations for the SCCB engine
//!
//! This crate provides concrete implementations of the capabilities
//! defined in sccb-hal, plus setup helpers:
//!
//! - GPIO adapters over embedded-hal 1.0 pins (open-drain, output-only SCL)
//! - Tick clocks (std threads, embassy time driver)
//! - Hung bus recovery

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod clock;
pub mod gpio;
pub mod recovery;

#[cfg(any(test, feature = "std"))]
pub use clock::StdTickClock;
#[cfg(feature = "embassy-time")]
pub use clock::EmbassyTickClock;
pub use gpio::{OpenDrainPins, OutputClockPins};
pub use recovery::{unhang, unhang_bus, Recovery, RecoveryError};
