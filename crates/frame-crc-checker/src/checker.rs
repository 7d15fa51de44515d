//! The CRC checker pipeline.
//!
//! Units flow through an [`ElasticBuffer`] that is held at `ratio` entries,
//! so a unit only leaves once the `ratio` units behind it have arrived. When
//! the last checksum unit (end of packet) comes in, the unit leaving at the
//! same time is the last payload unit: it goes out with `eop` and the CRC
//! verdict, and the checksum units left in the buffer are dropped by the
//! following RESET.

use std::fmt;

use gate_core::{Observable, Value};

use crate::crc32::Crc32Engine;
use crate::fifo::ElasticBuffer;
use crate::record::{CheckerOutput, SinkIn, StreamRecord, UnitWidth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckerState {
    /// Clear the CRC and the buffer. Lasts exactly one tick.
    #[default]
    Reset,
    /// Waiting for a start of packet.
    Idle,
    /// Accumulating until end of packet.
    Copy,
}

impl CheckerState {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "RESET",
            Self::Idle => "IDLE",
            Self::Copy => "COPY",
        }
    }
}

impl fmt::Display for CheckerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Streaming CRC-32 checker that strips the trailing checksum.
#[derive(Debug, Clone)]
pub struct CrcChecker {
    width: UnitWidth,
    crc: Crc32Engine,
    buffer: ElasticBuffer,
    state: CheckerState,
    frames: u64,
    crc_errors: u64,
}

impl CrcChecker {
    #[must_use]
    pub fn new(width: UnitWidth) -> Self {
        Self {
            width,
            crc: Crc32Engine::new(width),
            buffer: ElasticBuffer::new(width.ratio() + 1),
            state: CheckerState::Reset,
            frames: 0,
            crc_errors: 0,
        }
    }

    /// Run one tick. `source_ack` is the downstream consumer's ready flag.
    pub fn step(&mut self, sink: SinkIn, source_ack: bool) -> CheckerOutput {
        let in_reset = self.state == CheckerState::Reset;
        let fifo_full = self.buffer.is_full_at(self.width.ratio());
        let source_stb = sink.stb && fifo_full && !in_reset;
        let fifo_out = source_stb && source_ack;
        let fifo_in = sink.stb && (!fifo_full || fifo_out) && !in_reset;

        let head = self.buffer.head().copied().unwrap_or_default();
        let error = !self.crc.next_matches(sink.record.data);
        let output = CheckerOutput {
            sink_ack: fifo_in,
            source_stb,
            source: StreamRecord {
                data: head.data,
                sop: head.sop,
                eop: sink.record.eop,
            },
            error,
            busy: self.state != CheckerState::Idle,
        };

        let next = match self.state {
            CheckerState::Reset => {
                self.crc.reset();
                self.buffer.clear();
                CheckerState::Idle
            }
            CheckerState::Idle if fifo_in && sink.record.sop => {
                self.crc.update(sink.record.data);
                CheckerState::Copy
            }
            CheckerState::Idle => CheckerState::Idle,
            CheckerState::Copy if fifo_in => {
                self.crc.update(sink.record.data);
                if sink.record.eop {
                    self.end_of_frame(error);
                    CheckerState::Reset
                } else {
                    CheckerState::Copy
                }
            }
            CheckerState::Copy => CheckerState::Copy,
        };

        if fifo_out {
            self.buffer.pop();
        }
        if fifo_in {
            // Popping first keeps the level at or below `ratio`.
            let pushed = self.buffer.push(sink.record);
            debug_assert!(pushed.is_ok(), "elastic buffer overflow");
        }

        if next != self.state {
            tracing::trace!(from = %self.state, to = %next, "CRC checker FSM");
        }
        self.state = next;
        output
    }

    fn end_of_frame(&mut self, error: bool) {
        self.frames += 1;
        if error {
            self.crc_errors += 1;
        }
        tracing::debug!(
            frame = self.frames,
            crc = format_args!("{:#010x}", self.crc.value()),
            crc_ok = !error,
            "end of frame"
        );
    }

    #[must_use]
    pub fn state(&self) -> CheckerState {
        self.state
    }

    #[must_use]
    pub fn width(&self) -> UnitWidth {
        self.width
    }

    /// Records currently held in the elastic buffer.
    #[must_use]
    pub fn level(&self) -> usize {
        self.buffer.level()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Finalised CRC of the units absorbed so far in this frame.
    #[must_use]
    pub fn crc_value(&self) -> u32 {
        self.crc.value()
    }

    #[must_use]
    pub fn busy(&self) -> bool {
        self.state != CheckerState::Idle
    }

    /// Frames completed since reset.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Completed frames whose checksum did not match.
    #[must_use]
    pub fn crc_errors(&self) -> u64 {
        self.crc_errors
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.width);
    }
}

impl Observable for CrcChecker {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "state" => Some(Value::String(self.state.name().to_string())),
            "level" => Some(Value::U8(self.buffer.level() as u8)),
            "crc" => Some(Value::U32(self.crc.value())),
            "busy" => Some(Value::Bool(self.busy())),
            "frames" => Some(Value::U64(self.frames)),
            "crc_errors" => Some(Value::U64(self.crc_errors)),
            "buffer" => Some(Value::Array(
                self.buffer.iter().map(|r| Value::U32(r.data)).collect(),
            )),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "state",
            "level",
            "crc",
            "busy",
            "frames",
            "crc_errors",
            "buffer",
        ]
    }
}
