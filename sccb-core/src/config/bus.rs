//! Bus timing configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::message::Direction;

/// Standard SCCB clock rate
pub const DEFAULT_BITRATE_HZ: u32 = 100_000;

/// Fastest bit-rate a 1 µs half-bit busy-wait can produce
pub const MAX_BITRATE_HZ: u32 = 500_000;

/// Whether a message runs the address phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AddressPolicy {
    /// Send the device address before every data phase
    #[default]
    Always,
    /// Only writes are addressed; reads clock the data byte straight after
    /// the start condition (for controllers that latch the address from a
    /// preceding write)
    WritesOnly,
}

impl AddressPolicy {
    /// Check if a message in the given direction is addressed
    pub const fn addresses(self, direction: Direction) -> bool {
        match self {
            AddressPolicy::Always => true,
            AddressPolicy::WritesOnly => matches!(direction, Direction::Write),
        }
    }
}

/// Immutable per-bus parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Half of one bit period, in microseconds
    pub half_bit_delay_us: u32,
    /// How long a slave may hold SCL low, in scheduler ticks
    ///
    /// Zero selects one second of ticks when the bus is created.
    pub clock_timeout_ticks: u32,
    /// Extra address attempts after the first NACK
    pub address_retries: u32,
    /// Address phase policy for reads
    pub read_addressing: AddressPolicy,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            half_bit_delay_us: 5, // 100 kHz
            clock_timeout_ticks: 0,
            address_retries: 0,
            read_addressing: AddressPolicy::Always,
        }
    }
}

/// Half-bit delay for a bit-rate, rounded up so the bus never runs fast
pub fn half_bit_delay_us(bitrate_hz: u32) -> Result<u32, ConfigError> {
    if bitrate_hz == 0 {
        return Err(ConfigError::ZeroBitrate);
    }
    if bitrate_hz > MAX_BITRATE_HZ {
        return Err(ConfigError::BitrateTooHigh);
    }
    Ok(1_000_000u32.div_ceil(2 * bitrate_hz))
}

impl BusConfig {
    /// Create a config for the given bit-rate with default timeout and retries
    pub fn from_bitrate(bitrate_hz: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            half_bit_delay_us: half_bit_delay_us(bitrate_hz)?,
            ..Self::default()
        })
    }

    /// Set the clock-release timeout in ticks
    pub const fn with_timeout_ticks(mut self, ticks: u32) -> Self {
        self.clock_timeout_ticks = ticks;
        self
    }

    /// Set the number of address retries
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.address_retries = retries;
        self
    }

    /// Set the read addressing policy
    pub const fn with_read_addressing(mut self, policy: AddressPolicy) -> Self {
        self.read_addressing = policy;
        self
    }

    /// Check the configuration for setup errors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.half_bit_delay_us == 0 {
            return Err(ConfigError::ZeroHalfBitDelay);
        }
        Ok(())
    }

    /// Full bit period in microseconds
    pub const fn full_bit_delay_us(&self) -> u32 {
        self.half_bit_delay_us.saturating_mul(2)
    }

    /// Sleep between SCL polls while a slave stretches the clock
    pub const fn poll_interval_ticks(&self) -> u32 {
        let half = self.clock_timeout_ticks.div_ceil(2);
        if half == 0 {
            1
        } else {
            half
        }
    }

    /// Apply the default timeout if none is configured
    pub(crate) fn resolve_timeout(mut self, ticks_per_second: u32) -> Self {
        if self.clock_timeout_ticks == 0 {
            self.clock_timeout_ticks = ticks_per_second.max(1);
        }
        self
    }
}
