//! System clock configuration.

use crate::Ticks;

/// The system clock every model register is synchronous to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock {
    /// Clock frequency in Hz (e.g., `50_000_000` for a 50 MHz fabric clock).
    pub frequency_hz: u64,
}

impl SystemClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Ticks per cycle of a slower signal (integer division, never zero).
    #[must_use]
    pub const fn ticks_per_cycle(&self, signal_hz: u64) -> Ticks {
        if signal_hz == 0 || signal_hz >= self.frequency_hz {
            return Ticks::new(1);
        }
        Ticks::new(self.frequency_hz / signal_hz)
    }

    /// Ticks per half cycle, e.g. how long a bit-banged SCL stays high.
    #[must_use]
    pub const fn ticks_per_half_cycle(&self, signal_hz: u64) -> Ticks {
        let full = self.ticks_per_cycle(signal_hz).get();
        if full < 2 {
            Ticks::new(1)
        } else {
            Ticks::new(full / 2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_mode_i2c_on_50mhz() {
        let clock = SystemClock::new(50_000_000);
        assert_eq!(clock.ticks_per_cycle(100_000), Ticks::new(500));
        assert_eq!(clock.ticks_per_half_cycle(100_000), Ticks::new(250));
    }

    #[test]
    fn degenerate_rates_clamp_to_one_tick() {
        let clock = SystemClock::new(1_000);
        assert_eq!(clock.ticks_per_cycle(0), Ticks::new(1));
        assert_eq!(clock.ticks_per_cycle(5_000), Ticks::new(1));
        assert_eq!(clock.ticks_per_half_cycle(1_000), Ticks::new(1));
    }
}
