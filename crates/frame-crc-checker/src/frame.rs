//! Frames with a trailing CRC, as a sender would emit them.

use crate::CheckerError;
use crate::crc32::{crc_to_units, crc32_units};
use crate::record::{StreamRecord, UnitWidth, pixel_unit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: UnitWidth,
    payload: Vec<u32>,
}

impl Frame {
    pub fn new(width: UnitWidth, payload: Vec<u32>) -> Result<Self, CheckerError> {
        if payload.is_empty() {
            return Err(CheckerError::EmptyFrame);
        }
        if let Some(&unit) = payload.iter().find(|&&u| !width.fits(u)) {
            return Err(CheckerError::UnitOutOfRange {
                unit,
                bits: width.bits(),
            });
        }
        Ok(Self { width, payload })
    }

    /// A 16-bit frame from `(y, cb_cr)` pixels.
    pub fn from_pixels(pixels: &[(u8, u8)]) -> Result<Self, CheckerError> {
        Self::new(
            UnitWidth::W16,
            pixels.iter().map(|&(y, c)| pixel_unit(y, c)).collect(),
        )
    }

    /// Payload records followed by the CRC units, `sop` on the first record
    /// and `eop` on the last.
    pub fn with_crc(width: UnitWidth, payload: &[u32]) -> Result<Vec<StreamRecord>, CheckerError> {
        Ok(Self::new(width, payload.to_vec())?.records())
    }

    #[must_use]
    pub fn payload(&self) -> &[u32] {
        &self.payload
    }

    #[must_use]
    pub fn width(&self) -> UnitWidth {
        self.width
    }

    #[must_use]
    pub fn crc(&self) -> u32 {
        crc32_units(self.width, &self.payload)
    }

    #[must_use]
    pub fn records(&self) -> Vec<StreamRecord> {
        let mut records: Vec<StreamRecord> = self
            .payload
            .iter()
            .copied()
            .chain(crc_to_units(self.width, self.crc()))
            .map(StreamRecord::new)
            .collect();
        if let Some(first) = records.first_mut() {
            first.sop = true;
        }
        if let Some(last) = records.last_mut() {
            last.eop = true;
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_ratio_crc_units() {
        let records = Frame::with_crc(UnitWidth::W8, &[0x31, 0x32, 0x33]).unwrap();
        assert_eq!(records.len(), 3 + 4);
        assert!(records[0].sop);
        assert!(records[6].eop);
        assert_eq!(records.iter().filter(|r| r.sop || r.eop).count(), 2);
    }

    #[test]
    fn trailing_units_carry_crc_low_first() {
        let payload = b"123456789".iter().map(|&b| u32::from(b)).collect();
        let frame = Frame::new(UnitWidth::W8, payload).unwrap();
        let tail: Vec<u32> = frame.records()[9..].iter().map(|r| r.data).collect();
        assert_eq!(tail, vec![0x26, 0x39, 0xF4, 0xCB]);
    }

    #[test]
    fn rejects_oversized_unit() {
        assert_eq!(
            Frame::new(UnitWidth::W16, vec![1, 0x1_0000]),
            Err(CheckerError::UnitOutOfRange {
                unit: 0x1_0000,
                bits: 16,
            })
        );
    }

    #[test]
    fn rejects_empty_payload() {
        assert_eq!(
            Frame::with_crc(UnitWidth::W32, &[]),
            Err(CheckerError::EmptyFrame)
        );
    }

    #[test]
    fn pixels_pack_luma_high() {
        let frame = Frame::from_pixels(&[(0x10, 0x80), (0xEB, 0x80)]).unwrap();
        assert_eq!(frame.payload(), &[0x1080, 0xEB80]);
        assert_eq!(frame.width(), UnitWidth::W16);
    }
}
