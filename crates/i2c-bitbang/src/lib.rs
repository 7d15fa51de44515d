//! Bit-banged I2C master.
//!
//! A software I2C master that toggles SCL/SDA through a register-like
//! [`BitBangPort`] with a fixed delay between edges, plus a [`SimPort`] that
//! resolves the open-drain bus against any [`gate_core::I2cTarget`] model.
//! The EDID reader on top of it fetches and checks every block a display
//! advertises.

mod edid;
mod master;
mod port;
mod sim;

pub use edid::{
    EDID_READ_ADDRESS, EDID_WRITE_ADDRESS, EdidBlock, NackStage, ReadEdidError, format_hex_dump,
    read_edid,
};
pub use master::{BUS_READY_POLLS, I2cError, I2cMaster};
pub use port::{BitBangPort, Lines};
pub use sim::SimPort;
