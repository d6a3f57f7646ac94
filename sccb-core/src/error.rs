//! Error types
//!
//! Line-level failures come out of the transaction primitives as
//! [`LineTimeout`]; the orchestrator maps everything to [`TransferError`].
//! [`ConfigError`] is only ever returned while a bus is being set up.

use core::fmt;

/// SCL was not observed high within the configured clock timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineTimeout;

/// Transfer-level errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError {
    /// A line failed to release in time (slave stretched too long or bus hung)
    Timeout,
    /// The address phase exhausted its retry budget without an ACK
    NoAcknowledge,
    /// The slave did not acknowledge the data byte of a write
    Io,
}

impl From<LineTimeout> for TransferError {
    fn from(_: LineTimeout) -> Self {
        TransferError::Timeout
    }
}

impl fmt::Display for LineTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SCL line did not release before the clock timeout")
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Timeout => f.write_str("timed out waiting for SCL to release"),
            TransferError::NoAcknowledge => f.write_str("no acknowledge from device address"),
            TransferError::Io => f.write_str("data byte was not acknowledged"),
        }
    }
}

impl core::error::Error for LineTimeout {}
impl core::error::Error for TransferError {}

/// Bus configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Bit-rate of zero
    ZeroBitrate,
    /// Bit-rate faster than a 1 µs half-bit busy-wait can produce
    BitrateTooHigh,
    /// Half-bit delay of zero
    ZeroHalfBitDelay,
    /// SCL and SDA mapped to the same line
    SharedLine,
    /// Empty bus name
    EmptyName,
    /// Bus name exceeds the name capacity
    NameTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroBitrate => f.write_str("bit-rate must be non-zero"),
            ConfigError::BitrateTooHigh => f.write_str("bit-rate exceeds 500 kHz"),
            ConfigError::ZeroHalfBitDelay => f.write_str("half-bit delay must be non-zero"),
            ConfigError::SharedLine => f.write_str("SCL and SDA must use different lines"),
            ConfigError::EmptyName => f.write_str("bus name must not be empty"),
            ConfigError::NameTooLong => f.write_str("bus name is too long"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_timeout_maps_to_timeout() {
        let err: TransferError = LineTimeout.into();
        assert_eq!(err, TransferError::Timeout);
    }

    #[test]
    fn test_display_messages() {
        use std::string::ToString;

        assert_eq!(
            TransferError::NoAcknowledge.to_string(),
            "no acknowledge from device address"
        );
        assert_eq!(
            ConfigError::SharedLine.to_string(),
            "SCL and SDA must use different lines"
        );
    }
}
