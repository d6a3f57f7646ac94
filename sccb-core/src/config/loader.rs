//! TOML configuration loading
//!
//! Expects a single `[bus]` table:
//!
//! ```toml
//! [bus]
//! name = "cam0"
//! scl_pin = 22
//! sda_pin = 23
//! bitrate_hz = 100000
//! timeout_ticks = 100
//! retries = 2
//! read_addressing = "always"
//! ```
//!
//! Missing keys take their [`BusSettings::default`] values.

use serde::Deserialize;

use super::settings::BusSettings;
use crate::error::ConfigError;

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// TOML parsing failed or the `[bus]` table has the wrong shape
    TomlParse,
    /// Parsed settings failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::TomlParse => f.write_str("invalid bus configuration TOML"),
            LoadError::Invalid(e) => write!(f, "invalid bus settings: {}", e),
        }
    }
}

impl core::error::Error for LoadError {}

#[derive(Deserialize)]
struct SettingsFile {
    bus: BusSettings,
}

/// Parse and validate bus settings from TOML text
pub fn load_settings(input: &str) -> Result<BusSettings, LoadError> {
    let file: SettingsFile = ::toml::from_str(input).map_err(|_| {
        warn!("Failed to parse bus configuration TOML");
        LoadError::TomlParse
    })?;

    file.bus.validate()?;
    debug!(
        "Loaded bus settings: {} at {} Hz",
        file.bus.name.as_str(),
        file.bus.bitrate_hz
    );
    Ok(file.bus)
}
