//! Edge detection on the sampled bus lines.

/// One-tick pulses derived from the sampled lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edges {
    pub scl_rising: bool,
    pub sda_rising: bool,
    pub sda_falling: bool,
    /// SDA falling while SCL is high: a new transaction.
    pub start: bool,
}

/// Previous-tick copies of the sampled lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    scl_r: bool,
    sda_r: bool,
}

impl EdgeDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scl_r: false,
            sda_r: false,
        }
    }

    /// Combinational edges for the current sampled values.
    #[must_use]
    pub fn detect(&self, scl_i: bool, sda_i: bool) -> Edges {
        let sda_falling = !sda_i && self.sda_r;
        Edges {
            scl_rising: scl_i && !self.scl_r,
            sda_rising: sda_i && !self.sda_r,
            sda_falling,
            start: scl_i && sda_falling,
        }
    }

    pub fn clock(&mut self, scl_i: bool, sda_i: bool) {
        self.scl_r = scl_i;
        self.sda_r = sda_i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulses_last_exactly_one_tick() {
        let mut det = EdgeDetector::new();
        det.clock(false, false);
        let e = det.detect(true, false);
        assert!(e.scl_rising);
        det.clock(true, false);
        assert!(!det.detect(true, false).scl_rising);
    }

    #[test]
    fn start_requires_scl_high() {
        let mut det = EdgeDetector::new();
        det.clock(true, true);
        assert!(det.detect(true, false).start);

        det.clock(false, true);
        let e = det.detect(false, false);
        assert!(e.sda_falling);
        assert!(!e.start);
    }

    #[test]
    fn stop_shape_is_not_start() {
        let mut det = EdgeDetector::new();
        det.clock(true, false);
        let e = det.detect(true, true);
        assert!(e.sda_rising);
        assert!(!e.start);
    }
}
