//! Bus statistics

use crate::error::TransferError;

/// Running counters for one bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusStats {
    /// Transfers started
    pub transfers: u32,
    /// Transfers that completed without error
    pub completed: u32,
    /// Address attempts that were not acknowledged
    pub address_nacks: u32,
    /// Transfers that failed with [`TransferError::NoAcknowledge`]
    pub no_acknowledge: u32,
    /// Transfers that failed with [`TransferError::Io`]
    pub data_nacks: u32,
    /// Transfers that failed with [`TransferError::Timeout`]
    pub timeouts: u32,
    /// Stop conditions issued, including those between address retries
    pub stops: u32,
}

impl BusStats {
    /// Record the outcome of one transfer
    pub(crate) fn record(&mut self, result: &Result<(), TransferError>) {
        let counter = match result {
            Ok(()) => &mut self.completed,
            Err(TransferError::NoAcknowledge) => &mut self.no_acknowledge,
            Err(TransferError::Io) => &mut self.data_nacks,
            Err(TransferError::Timeout) => &mut self.timeouts,
        };
        *counter = counter.wrapping_add(1);
    }

    /// Total failed transfers
    pub fn failures(&self) -> u32 {
        self.no_acknowledge
            .wrapping_add(self.data_nacks)
            .wrapping_add(self.timeouts)
    }
}
