//! SCCB Hardware Abstraction Layer
//!
//! This crate defines the capabilities the bit-banged SCCB engine needs
//! from the platform. Chip-specific crates (or the embedded-hal adapters in
//! `sccb-drivers`) implement them, so the same transaction engine runs on
//! any board and under test on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sccb-core (bus guard, transfer, bits)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sccb-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ sccb-drivers  │       │  test mocks   │
//! │ (embedded-hal)│       │  (sccb-core)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pins::SccbPins`] - Open-drain SDA/SCL access and busy-wait delays
//! - [`clock::TickClock`] - Scheduler ticks for clock-stretch waits

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod pins;

// Re-export key traits at crate root for convenience
pub use clock::TickClock;
pub use pins::{Line, SccbPins};
