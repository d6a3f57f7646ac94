//! Bus configuration surface
//!
//! These are the values a board or config file provides for one bus. Line
//! identifiers are opaque numbers; mapping them to real pins is the board's
//! business.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bus::{half_bit_delay_us, AddressPolicy, BusConfig, DEFAULT_BITRATE_HZ};
use crate::error::ConfigError;

/// Maximum bus name length
pub const MAX_BUS_NAME_LEN: usize = 16;

/// Default bus name
pub const DEFAULT_BUS_NAME: &str = "sccb";

/// Per-bus settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusSettings {
    /// Bus name (e.g., "sccb", "cam0")
    pub name: String<MAX_BUS_NAME_LEN>,
    /// SCL line identifier
    pub scl_pin: u8,
    /// SDA line identifier
    pub sda_pin: u8,
    /// Bit-rate in Hz
    pub bitrate_hz: u32,
    /// Clock-release timeout in ticks (0 = one second)
    pub timeout_ticks: u32,
    /// Extra address attempts after a NACK
    pub retries: u32,
    /// Whether reads run the address phase
    pub read_addressing: AddressPolicy,
}

impl Default for BusSettings {
    fn default() -> Self {
        let mut name = String::new();
        let _ = name.push_str(DEFAULT_BUS_NAME);
        Self {
            name,
            scl_pin: 0,
            sda_pin: 1,
            bitrate_hz: DEFAULT_BITRATE_HZ,
            timeout_ticks: 0,
            retries: 0,
            read_addressing: AddressPolicy::Always,
        }
    }
}

/// Copy a bus name into bounded storage
pub fn bus_name(name: &str) -> Result<String<MAX_BUS_NAME_LEN>, ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::EmptyName);
    }
    let mut stored = String::new();
    stored
        .push_str(name)
        .map_err(|_| ConfigError::NameTooLong)?;
    Ok(stored)
}

impl BusSettings {
    /// Create settings for a named bus on the given lines
    pub fn new(name: &str, scl_pin: u8, sda_pin: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            name: bus_name(name)?,
            scl_pin,
            sda_pin,
            ..Self::default()
        })
    }

    /// Check the settings for setup errors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.scl_pin == self.sda_pin {
            return Err(ConfigError::SharedLine);
        }
        half_bit_delay_us(self.bitrate_hz)?;
        Ok(())
    }

    /// Derive the engine configuration
    pub fn bus_config(&self) -> Result<BusConfig, ConfigError> {
        self.validate()?;
        Ok(BusConfig::from_bitrate(self.bitrate_hz)?
            .with_timeout_ticks(self.timeout_ticks)
            .with_retries(self.retries)
            .with_read_addressing(self.read_addressing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = BusSettings::default();
        assert_eq!(settings.name.as_str(), "sccb");
        assert_eq!(settings.bitrate_hz, 100_000);
        assert!(settings.validate().is_ok());

        let config = settings.bus_config().unwrap();
        assert_eq!(config.half_bit_delay_us, 5);
        assert_eq!(config.clock_timeout_ticks, 0);
        assert_eq!(config.address_retries, 0);
    }

    #[test]
    fn test_settings_to_config() {
        let mut settings = BusSettings::new("cam0", 22, 23).unwrap();
        settings.bitrate_hz = 400_000;
        settings.timeout_ticks = 100;
        settings.retries = 2;
        settings.read_addressing = AddressPolicy::WritesOnly;

        let config = settings.bus_config().unwrap();
        assert_eq!(config.half_bit_delay_us, 2);
        assert_eq!(config.clock_timeout_ticks, 100);
        assert_eq!(config.address_retries, 2);
        assert_eq!(config.read_addressing, AddressPolicy::WritesOnly);
    }

    #[test]
    fn test_shared_line_rejected() {
        let settings = BusSettings::new("cam0", 5, 5).unwrap();
        assert_eq!(settings.validate(), Err(ConfigError::SharedLine));
        assert_eq!(settings.bus_config(), Err(ConfigError::SharedLine));
    }

    #[test]
    fn test_bad_bitrate_rejected() {
        let mut settings = BusSettings::default();
        settings.bitrate_hz = 0;
        assert_eq!(settings.bus_config(), Err(ConfigError::ZeroBitrate));

        settings.bitrate_hz = 1_000_000;
        assert_eq!(settings.bus_config(), Err(ConfigError::BitrateTooHigh));
    }

    #[test]
    fn test_bus_name_bounds() {
        assert_eq!(bus_name(""), Err(ConfigError::EmptyName));
        assert_eq!(
            bus_name("a-very-long-bus-name"),
            Err(ConfigError::NameTooLong)
        );
        assert_eq!(bus_name("sccb1").unwrap().as_str(), "sccb1");
    }
}
