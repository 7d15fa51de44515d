//! Register-level view of the two bus lines.

/// Value written to the master's line-control register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lines {
    /// SCL level (the master never releases SCL; no clock stretching).
    pub scl: bool,
    /// SDA output enable.
    pub sda_oe: bool,
    /// SDA level when enabled.
    pub sda_out: bool,
}

impl Lines {
    /// SCL high, SDA released: the idle bus.
    pub const IDLE: Self = Self::release(true);

    /// SDA driven to `sda` by the master.
    #[must_use]
    pub const fn drive(scl: bool, sda: bool) -> Self {
        Self {
            scl,
            sda_oe: true,
            sda_out: sda,
        }
    }

    /// SDA released to the pull-up.
    #[must_use]
    pub const fn release(scl: bool) -> Self {
        Self {
            scl,
            sda_oe: false,
            sda_out: false,
        }
    }

    #[must_use]
    pub const fn with_scl(self, scl: bool) -> Self {
        Self { scl, ..self }
    }

    /// Level the master alone puts on SDA; a released line floats high.
    #[must_use]
    pub const fn sda_level(self) -> bool {
        !self.sda_oe || self.sda_out
    }
}

/// Access to the bus lines the master bit-bangs.
pub trait BitBangPort {
    /// Write the line-control register.
    fn write(&mut self, lines: Lines);

    /// Read the SDA input.
    fn read_sda(&mut self) -> bool;

    /// Wait one bit-phase delay.
    fn delay(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_sda_floats_high() {
        assert!(Lines::IDLE.sda_level());
        assert!(Lines::release(false).sda_level());
        assert!(Lines::drive(false, true).sda_level());
        assert!(!Lines::drive(false, false).sda_level());
    }
}
