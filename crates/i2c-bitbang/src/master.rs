use thiserror::Error;

use crate::port::{BitBangPort, Lines};

/// How many delays `init` waits for SDA to float high.
pub const BUS_READY_POLLS: u32 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum I2cError {
    #[error("I2C bus stuck: SDA held low for {0} polls")]
    BusStuck(u32),
}

/// Bit-banged I2C master.
///
/// Each bit is clocked as: set SDA with SCL low, delay, raise SCL, delay,
/// lower SCL. SDA therefore only changes while SCL is low, except inside
/// START and STOP conditions.
pub struct I2cMaster<P> {
    port: P,
    lines: Lines,
    started: bool,
}

impl<P: BitBangPort> I2cMaster<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            lines: Lines::IDLE,
            started: false,
        }
    }

    /// Release the bus and wait for SDA to float high, then hold it idle
    /// for one more delay (bus free time before the first START).
    pub fn init(&mut self) -> Result<(), I2cError> {
        self.started = false;
        self.set(Lines::IDLE);
        for _ in 0..BUS_READY_POLLS {
            if self.port.read_sda() {
                self.port.delay();
                return Ok(());
            }
            self.port.delay();
        }
        Err(I2cError::BusStuck(BUS_READY_POLLS))
    }

    /// START, or repeated START if a transaction is already open.
    pub fn start(&mut self) {
        if self.started {
            self.set(Lines::drive(false, true));
            self.port.delay();
            self.set(self.lines.with_scl(true));
            self.port.delay();
        }
        // SDA falls while SCL is high
        self.set(Lines::drive(true, false));
        self.port.delay();
        self.set(Lines::drive(false, false));
        self.started = true;
    }

    pub fn stop(&mut self) {
        self.set(Lines::drive(false, false));
        self.port.delay();
        self.set(Lines::drive(true, false));
        // SDA rises while SCL is high
        self.set(Lines::IDLE);
        self.port.delay();
        self.started = false;
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.set(Lines::drive(false, bit));
        self.port.delay();
        self.set(self.lines.with_scl(true));
        self.port.delay();
        self.set(self.lines.with_scl(false));
    }

    /// Release SDA for one clock and sample it while SCL is high.
    pub fn read_bit(&mut self) -> bool {
        self.set(Lines::release(false));
        self.port.delay();
        self.set(self.lines.with_scl(true));
        self.port.delay();
        let bit = self.port.read_sda();
        self.port.delay();
        self.set(self.lines.with_scl(false));
        bit
    }

    /// Write a byte MSB first. Returns whether the target acknowledged.
    pub fn write(&mut self, byte: u8) -> bool {
        for i in (0..8).rev() {
            self.write_bit((byte >> i) & 1 != 0);
        }
        !self.read_bit()
    }

    /// Read a byte MSB first, then send ACK (`ack = true`) or NACK.
    pub fn read(&mut self, ack: bool) -> u8 {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | u8::from(self.read_bit());
        }
        self.write_bit(!ack);
        byte
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }

    fn set(&mut self, lines: Lines) {
        self.lines = lines;
        self.port.write(lines);
    }
}
