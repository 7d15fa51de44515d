//! Streaming CRC-32 frame checker.
//!
//! Checks each packet of a unit stream against the CRC-32 carried in its
//! last `32 / width` units, and forwards the payload with the checksum
//! stripped. A one-frame-deep elastic buffer delays every unit by exactly
//! the checksum's length, so the verdict is ready on the same tick as the
//! last payload unit leaves with end-of-packet set.
//!
//! ```text
//! sink -> [elastic buffer, ratio deep] -> source (payload only, eop + error)
//!   \-> CRC-32 engine ---------------------------^
//! ```
//!
//! A mismatch only raises `error`; the frame is forwarded regardless and
//! the consumer decides what to do with it.

mod checker;
mod crc32;
mod error;
mod fifo;
mod frame;
mod record;

pub use checker::{CheckerState, CrcChecker};
pub use crc32::{CRC32_RESIDUE, Crc32Engine, crc32_units, crc_to_units};
pub use error::CheckerError;
pub use fifo::{ElasticBuffer, MAX_BUFFER_DEPTH};
pub use frame::Frame;
pub use record::{CheckerOutput, SinkIn, StreamRecord, UnitWidth, pixel_unit};
