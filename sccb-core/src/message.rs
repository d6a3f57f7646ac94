//! SCCB messages
//!
//! One message transfers exactly one byte. It is not a buffer descriptor.

/// Mask of the significant bits of a 7-bit device address
pub const ADDRESS_MASK: u16 = 0x7F;

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master sends the byte
    Write,
    /// Master receives the byte
    Read,
}

impl Direction {
    /// Value of the R/W bit in the address byte
    pub const fn rw_bit(self) -> u8 {
        match self {
            Direction::Write => 0,
            Direction::Read => 1,
        }
    }
}

/// A single-byte SCCB message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    /// 7-bit device address (upper bits are ignored)
    pub address: u16,
    /// Transfer direction
    pub direction: Direction,
    /// Byte to send, or the received byte after a successful read
    pub byte: u8,
}

impl Message {
    /// Create a write message
    pub const fn write(address: u16, byte: u8) -> Self {
        Self {
            address,
            direction: Direction::Write,
            byte,
        }
    }

    /// Create a read message
    pub const fn read(address: u16) -> Self {
        Self {
            address,
            direction: Direction::Read,
            byte: 0,
        }
    }

    /// Check if this is a read
    pub const fn is_read(&self) -> bool {
        matches!(self.direction, Direction::Read)
    }

    /// Address byte sent on the wire: 7-bit address followed by the R/W bit
    pub const fn address_byte(&self) -> u8 {
        (((self.address & ADDRESS_MASK) as u8) << 1) | self.direction.rw_bit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_byte_write() {
        let msg = Message::write(0x21, 0x5A);
        assert_eq!(msg.address_byte(), 0x42);
        assert!(!msg.is_read());
    }

    #[test]
    fn test_address_byte_read() {
        let msg = Message::read(0x21);
        assert_eq!(msg.address_byte(), 0x43);
        assert!(msg.is_read());
        assert_eq!(msg.byte, 0);
    }

    #[test]
    fn test_address_is_masked_to_seven_bits() {
        // Bits above the 7-bit address are dropped
        let msg = Message::write(0x1A1, 0);
        assert_eq!(msg.address_byte(), 0x42);
    }
}
