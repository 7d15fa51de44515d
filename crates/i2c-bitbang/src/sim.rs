//! Cycle-level bus simulation.
//!
//! `SimPort` wires a master's register writes onto a simulated open-drain
//! bus shared with one [`I2cTarget`]. Time only advances inside
//! [`BitBangPort::delay`], which runs the target for one half bus period.

use gate_core::{I2cTarget, SystemClock, Ticks};

use crate::port::{BitBangPort, Lines};

pub struct SimPort<T> {
    target: T,
    lines: Lines,
    half_period: Ticks,
    elapsed: Ticks,
}

impl<T: I2cTarget> SimPort<T> {
    /// Drive `target` with an SCL of `bus_hz` derived from `clock`.
    pub fn new(target: T, clock: SystemClock, bus_hz: u64) -> Self {
        Self::with_half_period(target, clock.ticks_per_half_cycle(bus_hz))
    }

    pub fn with_half_period(target: T, half_period: Ticks) -> Self {
        Self {
            target,
            lines: Lines::IDLE,
            half_period,
            elapsed: Ticks::ZERO,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }

    /// Master-side register state.
    pub fn lines(&self) -> Lines {
        self.lines
    }

    #[must_use]
    pub fn half_period(&self) -> Ticks {
        self.half_period
    }

    /// Target ticks run so far.
    #[must_use]
    pub fn elapsed(&self) -> Ticks {
        self.elapsed
    }

    /// Wired-AND of both drivers; the pull-up wins when nobody pulls low.
    #[must_use]
    pub fn sda(&self) -> bool {
        self.lines.sda_level() && !self.target.sda_pulled_low()
    }

    #[must_use]
    pub fn scl(&self) -> bool {
        self.lines.scl
    }

    /// Run the target for `n` ticks with the bus held as it is.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            let sda = self.sda();
            self.target.set_bus(self.lines.scl, sda);
            self.target.tick();
        }
        self.elapsed += Ticks::new(n);
    }
}

impl<T: I2cTarget> BitBangPort for SimPort<T> {
    fn write(&mut self, lines: Lines) {
        self.lines = lines;
    }

    fn read_sda(&mut self) -> bool {
        self.sda()
    }

    fn delay(&mut self) {
        self.run(self.half_period.get());
    }
}
