//! Running CRC-32 over stream units.
//!
//! This is the Ethernet CRC (reflected 0x04C11DB7, init and final xor all
//! ones). Each unit is fed least significant byte first, and a frame carries
//! its CRC the same way, low unit first. Running the CRC over a frame plus
//! its own checksum always lands on [`CRC32_RESIDUE`].

use crc_all::CrcAlgo;

use crate::record::UnitWidth;

/// Final CRC-32 value over any message followed by its own CRC.
pub const CRC32_RESIDUE: u32 = 0x2144_DF1C;

const CRC32_INIT: u32 = 0xFFFF_FFFF;

const CRC32: CrcAlgo<u32> = CrcAlgo::<u32>::new(
    0x04C1_1DB7, // polynomial
    32,          // width
    CRC32_INIT,  // init
    0xFFFF_FFFF, // xorout
    true,        // reflect
);

#[derive(Debug, Clone)]
pub struct Crc32Engine {
    width: UnitWidth,
    state: u32,
}

impl Crc32Engine {
    #[must_use]
    pub const fn new(width: UnitWidth) -> Self {
        Self {
            width,
            state: CRC32_INIT,
        }
    }

    pub fn reset(&mut self) {
        self.state = CRC32_INIT;
    }

    /// Absorb one unit. Bits above the unit width are ignored.
    pub fn update(&mut self, unit: u32) {
        Self::absorb(self.width, &mut self.state, unit);
    }

    /// Finalised CRC of everything absorbed since the last reset.
    #[must_use]
    pub fn value(&self) -> u32 {
        CRC32.finish_crc(&self.state)
    }

    /// Whether absorbing `unit` would complete a frame whose trailing CRC
    /// is correct.
    #[must_use]
    pub fn next_matches(&self, unit: u32) -> bool {
        let mut state = self.state;
        Self::absorb(self.width, &mut state, unit);
        CRC32.finish_crc(&state) == CRC32_RESIDUE
    }

    #[must_use]
    pub fn width(&self) -> UnitWidth {
        self.width
    }

    fn absorb(width: UnitWidth, state: &mut u32, unit: u32) {
        let bytes = unit.to_le_bytes();
        CRC32.update_crc(state, &bytes[..width.bytes()]);
    }
}

/// CRC-32 of a whole unit sequence.
#[must_use]
pub fn crc32_units(width: UnitWidth, units: &[u32]) -> u32 {
    let mut engine = Crc32Engine::new(width);
    for &unit in units {
        engine.update(unit);
    }
    engine.value()
}

/// Split a CRC into trailing stream units, low unit first.
pub fn crc_to_units(width: UnitWidth, crc: u32) -> impl Iterator<Item = u32> {
    let bits = width.bits();
    (0..width.ratio()).map(move |i| {
        let shift = bits * i as u32;
        (crc >> shift) & width.mask()
    })
}
