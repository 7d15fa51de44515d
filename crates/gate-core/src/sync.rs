//! Two-stage resynchroniser for asynchronous inputs.

/// Two flip-flops in series, clocked by the system clock.
///
/// An asynchronous pin sampled by the first stage may go metastable; the
/// second stage gives it a full tick to settle before anything downstream
/// reads it. The output therefore lags the pin by two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synchronizer {
    stage1: bool,
    stage2: bool,
}

impl Synchronizer {
    #[must_use]
    pub const fn new(reset: bool) -> Self {
        Self {
            stage1: reset,
            stage2: reset,
        }
    }

    /// The settled (second-stage) value.
    #[must_use]
    pub const fn output(&self) -> bool {
        self.stage2
    }

    /// Clock edge: shift `input` into the chain.
    pub fn clock(&mut self, input: bool) {
        self.stage2 = self.stage1;
        self.stage1 = input;
    }

    pub fn reset(&mut self, value: bool) {
        self.stage1 = value;
        self.stage2 = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lags_input_by_two_ticks() {
        let mut sync = Synchronizer::new(false);
        sync.clock(true);
        assert!(!sync.output());
        sync.clock(true);
        assert!(sync.output());
    }

    #[test]
    fn single_tick_glitch_still_passes_through_with_delay() {
        // The synchroniser only guards against metastability; glitch
        // rejection is the oversampler's job.
        let mut sync = Synchronizer::new(true);
        sync.clock(false);
        sync.clock(true);
        assert!(!sync.output());
        sync.clock(true);
        assert!(sync.output());
    }
}
