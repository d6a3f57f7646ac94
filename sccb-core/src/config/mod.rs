//! Configuration types
//!
//! [`BusConfig`] holds the immutable per-bus timing and retry parameters the
//! engine runs on. [`BusSettings`] is the user-facing configuration surface
//! (name, line identifiers, bit-rate) that validates into a `BusConfig`.

pub mod bus;
#[cfg(feature = "toml")]
pub mod loader;
pub mod settings;

pub use bus::*;
#[cfg(feature = "toml")]
pub use loader::{load_settings, LoadError};
pub use settings::*;
