//! The 128-byte EDID memory image.
//!
//! The image is loaded once at configuration time and never written by the
//! protocol engine. It has a single read port addressed by the offset
//! register.

use std::path::Path;

use crate::EdidError;

/// Size of one EDID block in bytes.
pub const EDID_BLOCK_SIZE: usize = 128;

/// Fixed 8-byte pattern every EDID base block starts with.
pub const EDID_HEADER: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

/// Offset of the extension block count in the base block.
pub const EXTENSION_COUNT_OFFSET: usize = 126;

/// Offset of the checksum byte.
pub const CHECKSUM_OFFSET: usize = 127;

/// Default image: a generic digital display named "M1 DVI mixer" with a
/// single detailed timing descriptor. Checksum-valid.
#[rustfmt::skip]
pub const DEFAULT_EDID: [u8; EDID_BLOCK_SIZE] = [
    0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x3D, 0x17, 0x32, 0x12, 0x2A, 0x6A, 0xBF, 0x00,
    0x05, 0x17, 0x01, 0x03, 0x80, 0x28, 0x1E, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x2E, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0xB2, 0x0C, 0x00, 0x40, 0x41, 0x00, 0x26, 0x30, 0x18, 0x88,
    0x36, 0x00, 0x28, 0x1E, 0x00, 0x00, 0x00, 0x1E, 0x00, 0x00, 0x00, 0xFC, 0x00, 0x4D, 0x31, 0x20,
    0x44, 0x56, 0x49, 0x20, 0x6D, 0x69, 0x78, 0x65, 0x72, 0x0A, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x34,
];

/// Read-only EDID block served by the slave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdidMemory {
    data: [u8; EDID_BLOCK_SIZE],
}

impl EdidMemory {
    #[must_use]
    pub const fn new(data: [u8; EDID_BLOCK_SIZE]) -> Self {
        Self { data }
    }

    /// Build an image from a byte slice of exactly 128 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EdidError> {
        let data: [u8; EDID_BLOCK_SIZE] = bytes
            .try_into()
            .map_err(|_| EdidError::InvalidLength(bytes.len()))?;
        let memory = Self { data };
        if !memory.checksum_ok() {
            // Hardware serves whatever it is given; the source will reject it.
            tracing::warn!(
                checksum = memory.data[CHECKSUM_OFFSET],
                "EDID image checksum does not sum to zero"
            );
        }
        Ok(memory)
    }

    /// Load a raw binary image (as produced by `edid-decode --binary` and
    /// friends) from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EdidError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| EdidError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Read port. The offset register is 7 bits wide, so addressing wraps.
    #[must_use]
    pub fn read(&self, offset: u8) -> u8 {
        self.data[usize::from(offset) % EDID_BLOCK_SIZE]
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; EDID_BLOCK_SIZE] {
        &self.data
    }

    /// All 128 bytes sum to zero modulo 256.
    #[must_use]
    pub fn checksum_ok(&self) -> bool {
        block_checksum_ok(&self.data)
    }

    #[must_use]
    pub fn has_valid_header(&self) -> bool {
        self.data[..EDID_HEADER.len()] == EDID_HEADER
    }

    /// Number of extension blocks the base block advertises.
    #[must_use]
    pub fn extension_count(&self) -> u8 {
        self.data[EXTENSION_COUNT_OFFSET]
    }

    /// Copy of this image with byte 127 rewritten so the block sums to zero.
    #[must_use]
    pub fn with_fixed_checksum(&self) -> Self {
        let mut data = self.data;
        data[CHECKSUM_OFFSET] = byte_sum(&data[..CHECKSUM_OFFSET]).wrapping_neg();
        Self { data }
    }
}

impl Default for EdidMemory {
    fn default() -> Self {
        Self::new(DEFAULT_EDID)
    }
}

/// Whether a block's bytes sum to zero modulo 256.
#[must_use]
pub fn block_checksum_ok(block: &[u8]) -> bool {
    byte_sum(block) == 0
}

fn byte_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_image_is_a_valid_base_block() {
        let mem = EdidMemory::default();
        assert!(mem.has_valid_header());
        assert!(mem.checksum_ok());
        assert_eq!(mem.extension_count(), 0);
    }

    #[test]
    fn default_image_carries_monitor_name_descriptor() {
        let mem = EdidMemory::default();
        // Display product name descriptor: tag 0xFC at byte 3 of descriptor 2.
        assert_eq!(mem.read(75), 0xFC);
        assert_eq!(&mem.as_bytes()[77..89], b"M1 DVI mixer");
    }

    #[test]
    fn read_wraps_modulo_block_size() {
        let mut data = [0u8; EDID_BLOCK_SIZE];
        for (i, b) in data.iter_mut().enumerate() {
            *b = i as u8;
        }
        let mem = EdidMemory::new(data);
        assert_eq!(mem.read(127), 127);
        assert_eq!(mem.read(128), 0);
        assert_eq!(mem.read(200), 72);
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        let err = EdidMemory::from_bytes(&[0u8; 127]).unwrap_err();
        assert!(matches!(err, EdidError::InvalidLength(127)));
        let err = EdidMemory::from_bytes(&[0u8; 256]).unwrap_err();
        assert!(matches!(err, EdidError::InvalidLength(256)));
    }

    #[test]
    fn from_bytes_accepts_bad_checksum() {
        let mut data = DEFAULT_EDID;
        data[CHECKSUM_OFFSET] ^= 0xFF;
        let mem = EdidMemory::from_bytes(&data).unwrap();
        assert!(!mem.checksum_ok());
        assert!(mem.with_fixed_checksum().checksum_ok());
        assert_eq!(mem.with_fixed_checksum().read(127), 0x34);
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = EdidMemory::from_file("/nonexistent/edid.bin").unwrap_err();
        assert!(matches!(err, EdidError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/edid.bin"));
    }
}
