//! I2C-slave EDID emulator.
//!
//! Serves a 128-byte EDID block to an HDMI/DVI source over the DDC bus the
//! way a monitor's EEPROM would, driven one system clock tick at a time.
//!
//! # Signal path
//!
//! ```text
//! SCL/SDA pins -> synchroniser -> oversampler -> edge detector
//!              -> byte shifter -> transaction FSM -> SDA open-drain OE
//!                                      |
//!                                      +-> memory read port (offset)
//! ```
//!
//! # Transaction FSM
//!
//! | From | Condition | To |
//! |------|-----------|----|
//! | any | START | `RCV_ADDRESS` |
//! | any | HPD enable cleared | `WAIT_START` |
//! | `RCV_ADDRESS` | 8 bits, address 0x50 | `ACK_ADDRESS0..2` |
//! | `RCV_ADDRESS` | 8 bits, other address | `WAIT_START` |
//! | `ACK_ADDRESS2` | read | `READ` |
//! | `ACK_ADDRESS2` | write | `RCV_OFFSET` |
//! | `RCV_OFFSET` | 8 bits | `ACK_OFFSET0..2` -> `RCV_ADDRESS` |
//! | `READ` | 8 bits out | `ACK_READ` |
//! | `ACK_READ` | master ACK | `READ` (offset + 1) |
//! | `ACK_READ` | master NACK | `WAIT_START` (offset + 1) |
//!
//! Protocol mismatches are not errors: the slave just stops acknowledging,
//! exactly as a passive bus device does.

mod config;
mod edge;
mod error;
mod hpd;
mod irq;
mod memory;
mod sampler;
mod shifter;
mod slave;
mod state;

pub use config::{EDID_SLAVE_ADDRESS, EdidConfig};
pub use edge::{EdgeDetector, Edges};
pub use error::EdidError;
pub use hpd::HotPlug;
pub use irq::{EdgeEventSource, EdidIrq};
pub use memory::{
    CHECKSUM_OFFSET, DEFAULT_EDID, EDID_BLOCK_SIZE, EDID_HEADER, EXTENSION_COUNT_OFFSET, EdidMemory,
    block_checksum_ok,
};
pub use sampler::{DEFAULT_OVERSAMPLE_BITS, InputSampler};
pub use shifter::ByteShifter;
pub use slave::{EdidDrive, EdidPins, EdidSlave};
pub use state::State;
