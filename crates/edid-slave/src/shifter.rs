//! Bit/byte engine: shifts SDA into a byte on every SCL rising edge.

use crate::edge::Edges;

/// Number of clock edges that make up one byte.
pub const BITS_PER_BYTE: u8 = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct ByteShifter {
    din: u8,
    /// Bits shifted in so far, 0..=8. The ninth rising edge (the ACK slot)
    /// wraps it back to zero without shifting.
    counter: u8,
}

impl ByteShifter {
    #[must_use]
    pub const fn new() -> Self {
        Self { din: 0, counter: 0 }
    }

    #[must_use]
    pub const fn din(&self) -> u8 {
        self.din
    }

    #[must_use]
    pub const fn counter(&self) -> u8 {
        self.counter
    }

    #[must_use]
    pub const fn byte_complete(&self) -> bool {
        self.counter == BITS_PER_BYTE
    }

    /// Clock edge. A START clears the bit count, but a simultaneous SCL
    /// rising edge takes precedence and counts from the pre-tick value.
    pub fn clock(&mut self, edges: &Edges, sda_i: bool) {
        let counter = self.counter;
        if edges.scl_rising {
            if counter == BITS_PER_BYTE {
                self.counter = 0;
            } else {
                self.counter = counter + 1;
                self.din = (self.din << 1) | u8::from(sda_i);
            }
        } else if edges.start {
            self.counter = 0;
        }
    }
}
