//! Trait for models advanced by the system clock.

use crate::Ticks;

/// A synchronous model that can be advanced by clock ticks.
///
/// Inputs are latched onto the model (pins, handshake lines) before calling
/// `tick()`. One call evaluates all combinational logic from the currently
/// committed registers and then commits every register at once.
pub trait Tickable {
    /// Advance the model by one system clock tick.
    fn tick(&mut self);

    /// Advance the model by multiple ticks with inputs held constant.
    ///
    /// Default implementation calls `tick()` in a loop. Implementations may
    /// override for efficiency, but must produce identical results.
    fn tick_n(&mut self, count: Ticks) {
        for _ in 0..count.get() {
            self.tick();
        }
    }
}
