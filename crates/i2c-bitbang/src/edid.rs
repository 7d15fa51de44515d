//! EDID fetch over a bit-banged DDC bus.

use std::fmt;
use std::fmt::Write as _;

use thiserror::Error;
use tracing::{debug, warn};

use crate::master::{I2cError, I2cMaster};
use crate::port::BitBangPort;

/// 8-bit bus address for writing the EEPROM offset (7-bit 0x50).
pub const EDID_WRITE_ADDRESS: u8 = 0xA0;
/// 8-bit bus address for reading the EEPROM.
pub const EDID_READ_ADDRESS: u8 = 0xA1;

const BLOCK_SIZE: usize = 128;
const EXTENSION_COUNT_OFFSET: usize = 126;

pub type EdidBlock = [u8; BLOCK_SIZE];

/// Which byte of the transaction header went unacknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NackStage {
    WriteAddress,
    Offset,
    ReadAddress,
}

impl fmt::Display for NackStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WriteAddress => "slave address",
            Self::Offset => "EEPROM offset",
            Self::ReadAddress => "slave address (read)",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadEdidError {
    #[error("NACK while writing {0}")]
    Nack(NackStage),
    #[error("checksum error in EDID block {block}")]
    Checksum { block: usize },
    #[error(transparent)]
    Bus(#[from] I2cError),
}

/// Fetch the base block and every extension block it advertises.
///
/// Writes offset 0, issues a repeated START and reads sequentially. Every
/// byte is acknowledged except the very last one. The bus is always left
/// with a STOP condition, including on error.
pub fn read_edid<P: BitBangPort>(
    master: &mut I2cMaster<P>,
) -> Result<Vec<EdidBlock>, ReadEdidError> {
    let result = read_blocks(master);
    master.stop();
    result
}

fn read_blocks<P: BitBangPort>(master: &mut I2cMaster<P>) -> Result<Vec<EdidBlock>, ReadEdidError> {
    master.start();
    if !master.write(EDID_WRITE_ADDRESS) {
        return Err(ReadEdidError::Nack(NackStage::WriteAddress));
    }
    if !master.write(0) {
        return Err(ReadEdidError::Nack(NackStage::Offset));
    }
    master.start();
    if !master.write(EDID_READ_ADDRESS) {
        return Err(ReadEdidError::Nack(NackStage::ReadAddress));
    }

    let mut blocks = Vec::new();
    let mut block = [0u8; BLOCK_SIZE];
    let mut extensions = 0usize;
    let mut index = 0usize;
    loop {
        for (i, byte) in block.iter_mut().enumerate() {
            // The extension count is only known once byte 126 of block 0
            // arrives, before the last byte is read.
            let last = i == BLOCK_SIZE - 1 && index == extensions;
            *byte = master.read(!last);
            if index == 0 && i == EXTENSION_COUNT_OFFSET {
                extensions = usize::from(*byte);
            }
        }
        if block.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)) != 0 {
            warn!(block = index, "EDID block checksum mismatch");
            return Err(ReadEdidError::Checksum { block: index });
        }
        debug!(block = index, extensions, "EDID block read");
        blocks.push(block);
        if index == extensions {
            return Ok(blocks);
        }
        index += 1;
    }
}

/// Format bytes as uppercase hex, 16 per line.
#[must_use]
pub fn format_hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for line in bytes.chunks(16) {
        for (i, b) in line.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{b:02X}");
        }
        out.push('\n');
    }
    out
}
