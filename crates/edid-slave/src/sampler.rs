//! Input synchroniser and oversampler for the SCL/SDA pins.
//!
//! Each raw line goes through a two-stage [`Synchronizer`]. A free-running
//! counter then gates when the settled values are accepted: only on its
//! carry tick are they copied into the sampled registers. With the default
//! 6-bit counter that is one accepted sample every 64 ticks, which hides
//! ringing and sub-period glitches from the protocol logic.

use gate_core::Synchronizer;

/// Default oversample counter width (one sample every 64 ticks).
pub const DEFAULT_OVERSAMPLE_BITS: u8 = 6;

#[derive(Debug, Clone)]
pub struct InputSampler {
    scl_sync: Synchronizer,
    sda_sync: Synchronizer,
    /// Free-running counter, `bits` wide.
    count: u16,
    /// Registered carry-out of `count`.
    carry: bool,
    mask: u16,
    scl_i: bool,
    sda_i: bool,
}

impl InputSampler {
    /// `bits` is the oversample counter width (1..=16).
    #[must_use]
    pub fn new(bits: u8) -> Self {
        let bits = bits.clamp(1, 16);
        let mask = if bits == 16 {
            u16::MAX
        } else {
            (1u16 << bits) - 1
        };
        Self {
            scl_sync: Synchronizer::new(false),
            sda_sync: Synchronizer::new(false),
            count: 0,
            carry: false,
            mask,
            scl_i: false,
            sda_i: false,
        }
    }

    /// Sampled SCL, as seen by the protocol logic.
    #[must_use]
    pub fn scl(&self) -> bool {
        self.scl_i
    }

    /// Sampled SDA, as seen by the protocol logic.
    #[must_use]
    pub fn sda(&self) -> bool {
        self.sda_i
    }

    /// SCL after the synchroniser, before oversampling.
    #[must_use]
    pub fn scl_raw(&self) -> bool {
        self.scl_sync.output()
    }

    /// SDA after the synchroniser, before oversampling.
    #[must_use]
    pub fn sda_raw(&self) -> bool {
        self.sda_sync.output()
    }

    /// Ticks between accepted samples.
    #[must_use]
    pub fn period(&self) -> u32 {
        u32::from(self.mask) + 1
    }

    /// Clock edge: commit all sampler registers from the current pins.
    pub fn clock(&mut self, scl_pin: bool, sda_pin: bool) {
        if self.carry {
            self.scl_i = self.scl_sync.output();
            self.sda_i = self.sda_sync.output();
        }
        self.carry = self.count == self.mask;
        self.count = self.count.wrapping_add(1) & self.mask;
        self.scl_sync.clock(scl_pin);
        self.sda_sync.clock(sda_pin);
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.mask.count_ones() as u8);
    }
}
