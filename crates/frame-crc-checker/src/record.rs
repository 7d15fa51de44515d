//! Stream records and the checker's per-tick ports.

use crate::CheckerError;

/// Width of one payload unit on the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitWidth {
    W8,
    /// One video pixel: luma in the high byte, chroma in the low byte.
    #[default]
    W16,
    W32,
}

impl UnitWidth {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
        }
    }

    #[must_use]
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Payload units per CRC-32 word.
    #[must_use]
    pub const fn ratio(self) -> usize {
        32 / self.bits() as usize
    }

    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::W32 => u32::MAX,
            _ => (1 << self.bits()) - 1,
        }
    }

    #[must_use]
    pub const fn fits(self, unit: u32) -> bool {
        unit & !self.mask() == 0
    }
}

impl TryFrom<u32> for UnitWidth {
    type Error = CheckerError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Self::W8),
            16 => Ok(Self::W16),
            32 => Ok(Self::W32),
            other => Err(CheckerError::UnsupportedWidth(other)),
        }
    }
}

/// One payload unit with its packet delimiters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamRecord {
    pub data: u32,
    /// Start of packet.
    pub sop: bool,
    /// End of packet.
    pub eop: bool,
}

impl StreamRecord {
    #[must_use]
    pub const fn new(data: u32) -> Self {
        Self {
            data,
            sop: false,
            eop: false,
        }
    }
}

/// Pack a video pixel into a 16-bit stream unit.
#[must_use]
pub const fn pixel_unit(y: u8, cb_cr: u8) -> u32 {
    ((y as u32) << 8) | cb_cr as u32
}

/// Upstream side of the checker for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkIn {
    /// Producer has a valid record.
    pub stb: bool,
    pub record: StreamRecord,
}

impl SinkIn {
    /// No record offered this tick.
    pub const IDLE: Self = Self {
        stb: false,
        record: StreamRecord::new(0),
    };

    #[must_use]
    pub const fn valid(record: StreamRecord) -> Self {
        Self { stb: true, record }
    }
}

/// Everything the checker drives during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckerOutput {
    /// The offered sink record was accepted.
    pub sink_ack: bool,
    /// `source` holds a valid record.
    pub source_stb: bool,
    pub source: StreamRecord,
    /// CRC mismatch; only meaningful with `source.eop`.
    pub error: bool,
    pub busy: bool,
}
