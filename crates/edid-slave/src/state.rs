//! EDID transaction state machine.
//!
//! The per-state table only decides what a state wants to do. Two global
//! rules are applied on top of it, in priority order: a START condition
//! forces `RcvAddress`, and a cleared HPD-enable bit forces `WaitStart`.
//! The later rule wins, so disabling HPD overrides everything.

use std::fmt;

/// FSM states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Idle until a START condition.
    #[default]
    WaitStart,
    /// Shifting in the slave address byte.
    RcvAddress,
    /// Address ACK: wait for SCL low.
    AckAddress0,
    /// Address ACK: pulling SDA low, wait for SCL high.
    AckAddress1,
    /// Address ACK: still pulling SDA low, wait for SCL low.
    AckAddress2,
    /// Shifting in the memory offset byte.
    RcvOffset,
    AckOffset0,
    AckOffset1,
    AckOffset2,
    /// Driving the current byte out, MSB first.
    Read,
    /// Waiting for the master's ACK/NACK on the ninth clock.
    AckRead,
}

impl State {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WaitStart => "WAIT_START",
            Self::RcvAddress => "RCV_ADDRESS",
            Self::AckAddress0 => "ACK_ADDRESS0",
            Self::AckAddress1 => "ACK_ADDRESS1",
            Self::AckAddress2 => "ACK_ADDRESS2",
            Self::RcvOffset => "RCV_OFFSET",
            Self::AckOffset0 => "ACK_OFFSET0",
            Self::AckOffset1 => "ACK_OFFSET1",
            Self::AckOffset2 => "ACK_OFFSET2",
            Self::Read => "READ",
            Self::AckRead => "ACK_READ",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signals the FSM reads during one tick.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FsmInputs {
    pub scl_i: bool,
    pub sda_i: bool,
    pub scl_rising: bool,
    pub start: bool,
    pub byte_complete: bool,
    pub din: u8,
    pub is_read: bool,
    pub hpd_enable: bool,
    pub slave_address: u8,
}

/// Strobes the FSM asserts during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Actions {
    /// Pull SDA low (ACK).
    pub zero_drv: bool,
    /// Latch the R/W bit from the address byte.
    pub update_is_read: bool,
    /// Load the offset register from the received byte.
    pub oc_load: bool,
    /// Advance the offset register.
    pub oc_inc: bool,
    /// Present the next data bit and start driving.
    pub data_drv_en: bool,
    /// Stop driving data.
    pub data_drv_stop: bool,
}

/// Evaluate one tick of the FSM: the next state and this tick's strobes.
pub(crate) fn evaluate(state: State, i: &FsmInputs) -> (State, Actions) {
    let mut a = Actions::default();
    let mut next = state;

    match state {
        State::WaitStart => {}
        State::RcvAddress => {
            if i.byte_complete {
                if i.din >> 1 == i.slave_address {
                    a.update_is_read = true;
                    next = State::AckAddress0;
                } else {
                    next = State::WaitStart;
                }
            }
        }
        State::AckAddress0 => {
            if !i.scl_i {
                next = State::AckAddress1;
            }
        }
        State::AckAddress1 => {
            a.zero_drv = true;
            if i.scl_i {
                next = State::AckAddress2;
            }
        }
        State::AckAddress2 => {
            a.zero_drv = true;
            if !i.scl_i {
                next = if i.is_read {
                    State::Read
                } else {
                    State::RcvOffset
                };
            }
        }
        State::RcvOffset => {
            if i.byte_complete {
                a.oc_load = true;
                next = State::AckOffset0;
            }
        }
        State::AckOffset0 => {
            if !i.scl_i {
                next = State::AckOffset1;
            }
        }
        State::AckOffset1 => {
            a.zero_drv = true;
            if i.scl_i {
                next = State::AckOffset2;
            }
        }
        State::AckOffset2 => {
            a.zero_drv = true;
            if !i.scl_i {
                // The master must re-address the device before reading.
                next = State::RcvAddress;
            }
        }
        State::Read => {
            if !i.scl_i {
                if i.byte_complete {
                    a.data_drv_stop = true;
                    next = State::AckRead;
                } else {
                    a.data_drv_en = true;
                }
            }
        }
        State::AckRead => {
            if i.scl_rising {
                a.oc_inc = true;
                next = if i.sda_i {
                    State::WaitStart
                } else {
                    State::Read
                };
            }
        }
    }

    if i.start {
        next = State::RcvAddress;
    }
    if !i.hpd_enable {
        next = State::WaitStart;
    }

    (next, a)
}
