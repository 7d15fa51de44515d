//! Open-drain I2C seam between bus models and the targets they drive.

use crate::Tickable;

/// An I2C target that can be attached to a simulated open-drain bus.
///
/// The bus resolves SCL and SDA (pull-ups, master drive, target drive) at
/// the simulation boundary and hands the target only the resolved levels.
/// The target never sees the master's drive directly, and only ever pulls
/// SDA low.
pub trait I2cTarget: Tickable {
    /// Resolved line levels presented to the target's pins for the next tick.
    fn set_bus(&mut self, scl: bool, sda: bool);

    /// Whether the target is currently pulling SDA low.
    fn sda_pulled_low(&self) -> bool;
}
