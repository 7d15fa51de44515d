//! Core traits and types for tick-accurate gateware models.
//!
//! Every model advances on a single global system clock tick. Within a tick,
//! all register reads observe the values committed at the end of the
//! previous tick; new values only become visible after the tick returns.

mod clock;
mod i2c;
mod observable;
mod sync;
mod tickable;
mod ticks;

pub use clock::SystemClock;
pub use i2c::I2cTarget;
pub use observable::{Observable, Value};
pub use sync::Synchronizer;
pub use tickable::Tickable;
pub use ticks::Ticks;
