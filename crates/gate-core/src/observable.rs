//! Observability trait for inspecting model state.
//!
//! Every model exposes its registers for debugging and test benches, the
//! way a logic analyser would tap internal signals. Queries never affect
//! simulation state.

use std::fmt;

/// A dynamically-typed register value returned by state queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Single-bit signal.
    Bool(bool),
    /// 8-bit register.
    U8(u8),
    /// 16-bit register.
    U16(u16),
    /// 32-bit register.
    U32(u32),
    /// 64-bit counter.
    U64(u64),
    /// Symbolic value, such as an FSM state name.
    String(String),
    /// Array of values.
    Array(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", u8::from(*v)),
            Value::U8(v) => write!(f, "{v:#04X}"),
            Value::U16(v) => write!(f, "{v:#06X}"),
            Value::U32(v) => write!(f, "{v:#010X}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// A model whose registers can be inspected.
pub trait Observable {
    /// Query a specific signal by path.
    ///
    /// Paths are hierarchical, separated by dots:
    /// - `state` - FSM state name
    /// - `hpd.status` - resynchronised hot-plug pin
    /// - `memory.0x7F` - one byte of a memory image
    ///
    /// Returns `None` if the path is not recognised.
    fn query(&self, path: &str) -> Option<Value>;

    /// List all available query paths.
    fn query_paths(&self) -> &'static [&'static str];
}
