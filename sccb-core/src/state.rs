//! Transaction state machine
//!
//! ```text
//! Idle -> Started -> AddressPhase{attempt} -> DataPhase -> Stopped -> Idle
//!            │              ↺ NACK                           ▲
//!            └── (unaddressed read) ──> DataPhase            │
//!            any active state ── Stop ───────────────────────┘
//! ```
//!
//! The stop/start resynchronisation between address attempts happens
//! inside the `AddressPhase` self-loop; `Stopped` is entered exactly once
//! per transaction.

/// Transaction states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionState {
    /// Bus released, no transaction in progress
    Idle,
    /// Start condition issued
    Started,
    /// Sending the address byte; `attempt` counts from zero
    AddressPhase { attempt: u32 },
    /// Transferring the data byte
    DataPhase,
    /// Final stop condition issued
    Stopped,
}

/// Events driving the transaction state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionEvent {
    /// Start condition sent
    Start,
    /// Address phase begins
    Address,
    /// Message skips the address phase
    SkipAddress,
    /// Slave acknowledged the address
    AddressAck,
    /// Slave did not acknowledge; another attempt follows
    AddressNack,
    /// Final stop condition sent
    Stop,
    /// Transfer returned to the caller
    Finish,
}

impl TransactionState {
    /// Check if a transaction is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self, TransactionState::Idle)
    }

    /// Number of address attempts made so far in this state
    pub fn address_attempts(&self) -> u32 {
        match self {
            TransactionState::AddressPhase { attempt } => attempt + 1,
            _ => 0,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: TransactionEvent) -> Self {
        use TransactionEvent::*;
        use TransactionState::*;

        match (self, event) {
            (Idle, Start) => Started,

            (Started, Address) => AddressPhase { attempt: 0 },
            (Started, SkipAddress) => DataPhase,

            (AddressPhase { .. }, AddressAck) => DataPhase,
            (AddressPhase { attempt }, AddressNack) => AddressPhase {
                attempt: attempt.saturating_add(1),
            },

            (Started | AddressPhase { .. } | DataPhase, Stop) => Stopped,

            (Stopped, Finish) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
