//! Simulated SCCB slave
//!
//! Reacts to the effective bus levels the way a camera sensor does: it
//! samples on SCL rising edges, changes SDA only while SCL is low, ACKs its
//! own address and holds a single register that reads back what was last
//! written.

use std::vec::Vec;

/// Something the slave observed, in bus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaveEvent {
    /// Start condition
    Start,
    /// Address byte received and whether it was acknowledged
    Address { byte: u8, acked: bool },
    /// Data byte written by the master
    Written(u8),
    /// Data byte read by the master; `nacked` is the master's ninth bit
    Read { byte: u8, nacked: bool },
    /// Stop condition
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Address,
    PendingRead,
    AddressAck { read: bool },
    Write,
    WriteAck,
    Read,
    Done,
    Ignored,
}

/// Simulated SCCB slave device
#[derive(Debug, Clone)]
pub struct SimSlave {
    address: u8,
    promiscuous: bool,
    ack_address: bool,
    ack_data: bool,
    unaddressed_reads: bool,
    register: u8,
    phase: Phase,
    shift: u8,
    bits: u8,
    holding_sda: bool,
    master_nack: bool,
    events: Vec<SlaveEvent>,
}

impl SimSlave {
    /// Create a slave at the given 7-bit address
    pub fn new(address: u8) -> Self {
        Self {
            address: address & 0x7F,
            promiscuous: false,
            ack_address: true,
            ack_data: true,
            unaddressed_reads: false,
            register: 0,
            phase: Phase::Idle,
            shift: 0,
            bits: 0,
            holding_sda: false,
            master_nack: false,
            events: Vec::new(),
        }
    }

    /// Create a slave that acknowledges every address byte
    pub fn promiscuous() -> Self {
        Self {
            promiscuous: true,
            ..Self::new(0)
        }
    }

    /// Never acknowledge the address
    pub fn nack_address(mut self) -> Self {
        self.ack_address = false;
        self
    }

    /// Never acknowledge written data
    pub fn nack_data(mut self) -> Self {
        self.ack_data = false;
        self
    }

    /// Answer every transaction with a read, without an address phase
    ///
    /// Models a controller that latched its address from an earlier write.
    pub fn reads_without_address(mut self) -> Self {
        self.unaddressed_reads = true;
        self
    }

    /// Preload the register returned by reads
    pub fn with_register(mut self, value: u8) -> Self {
        self.register = value;
        self
    }

    /// Current register value
    pub fn register(&self) -> u8 {
        self.register
    }

    /// Everything observed so far
    pub fn events(&self) -> &[SlaveEvent] {
        &self.events
    }

    /// Number of address bytes received
    pub fn address_attempts(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SlaveEvent::Address { .. }))
            .count()
    }

    /// Forget recorded events
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Whether the slave is pulling SDA low
    pub fn holds_sda(&self) -> bool {
        self.holding_sda
    }

    /// Whether the slave is inside an addressed transaction
    ///
    /// Clock stretching only happens here.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            Phase::Address
                | Phase::PendingRead
                | Phase::AddressAck { .. }
                | Phase::Write
                | Phase::WriteAck
                | Phase::Read
        )
    }

    pub(crate) fn on_start(&mut self) {
        self.phase = if self.unaddressed_reads {
            Phase::PendingRead
        } else {
            Phase::Address
        };
        self.shift = 0;
        self.bits = 0;
        self.holding_sda = false;
        self.events.push(SlaveEvent::Start);
    }

    pub(crate) fn on_stop(&mut self) {
        self.phase = Phase::Idle;
        self.holding_sda = false;
        self.events.push(SlaveEvent::Stop);
    }

    pub(crate) fn on_scl_rise(&mut self, sda: bool) {
        match self.phase {
            Phase::Address | Phase::Write if self.bits < 8 => {
                self.shift = (self.shift << 1) | u8::from(sda);
                self.bits += 1;
            }
            Phase::Read if self.bits == 8 => {
                self.master_nack = sda;
            }
            _ => {}
        }
    }

    pub(crate) fn on_scl_fall(&mut self) {
        match self.phase {
            Phase::Address if self.bits == 8 => {
                let byte = self.shift;
                let matched = self.promiscuous || byte >> 1 == self.address;
                let acked = matched && self.ack_address;
                self.events.push(SlaveEvent::Address { byte, acked });
                if acked {
                    self.holding_sda = true;
                    self.phase = Phase::AddressAck {
                        read: byte & 1 == 1,
                    };
                } else {
                    self.phase = Phase::Ignored;
                }
            }
            Phase::PendingRead => {
                self.phase = Phase::Read;
                self.bits = 0;
                self.drive_read_bit();
            }
            Phase::AddressAck { read } => {
                self.holding_sda = false;
                self.bits = 0;
                self.shift = 0;
                if read {
                    self.phase = Phase::Read;
                    self.drive_read_bit();
                } else {
                    self.phase = Phase::Write;
                }
            }
            Phase::Write if self.bits == 8 => {
                self.register = self.shift;
                self.events.push(SlaveEvent::Written(self.shift));
                if self.ack_data {
                    self.holding_sda = true;
                    self.phase = Phase::WriteAck;
                } else {
                    self.phase = Phase::Done;
                }
            }
            Phase::WriteAck => {
                self.holding_sda = false;
                self.phase = Phase::Done;
            }
            Phase::Read => {
                self.bits += 1;
                if self.bits < 8 {
                    self.drive_read_bit();
                } else if self.bits == 8 {
                    self.holding_sda = false;
                } else {
                    self.events.push(SlaveEvent::Read {
                        byte: self.register,
                        nacked: self.master_nack,
                    });
                    self.phase = Phase::Done;
                }
            }
            _ => {}
        }
    }

    fn drive_read_bit(&mut self) {
        let bit = 7 - self.bits;
        self.holding_sda = self.register & (1 << bit) == 0;
    }
}
