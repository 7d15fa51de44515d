//! Hot-plug detect.
//!
//! The HPD notification pin, when one is wired, is resynchronised into the
//! system clock domain and exposed as a read-only status bit. A separate
//! software-writable enable bit drives the HPD enable pin towards the
//! source and gates the whole EDID engine.

use gate_core::Synchronizer;

#[derive(Debug, Clone)]
pub struct HotPlug {
    /// `None` when no notification pin is wired: status reads connected.
    notif: Option<Synchronizer>,
    enable: bool,
    enable_at_reset: bool,
}

impl HotPlug {
    #[must_use]
    pub fn new(pin_wired: bool, enable_at_reset: bool) -> Self {
        Self {
            notif: pin_wired.then(|| Synchronizer::new(false)),
            enable: enable_at_reset,
            enable_at_reset,
        }
    }

    /// Resynchronised HPD notification (the status CSR).
    #[must_use]
    pub fn status(&self) -> bool {
        self.notif.as_ref().is_none_or(Synchronizer::output)
    }

    /// HPD enable storage bit.
    #[must_use]
    pub fn enable(&self) -> bool {
        self.enable
    }

    pub fn set_enable(&mut self, enable: bool) {
        if enable != self.enable {
            tracing::debug!(enable, "HPD enable changed");
        }
        self.enable = enable;
    }

    pub fn clock(&mut self, notif_pin: bool) {
        if let Some(sync) = &mut self.notif {
            sync.clock(notif_pin);
        }
    }

    pub fn reset(&mut self) {
        if let Some(sync) = &mut self.notif {
            sync.reset(false);
        }
        self.enable = self.enable_at_reset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwired_pin_reads_connected() {
        let hpd = HotPlug::new(false, false);
        assert!(hpd.status());
    }

    #[test]
    fn wired_pin_is_resynchronised() {
        let mut hpd = HotPlug::new(true, false);
        assert!(!hpd.status());
        hpd.clock(true);
        assert!(!hpd.status());
        hpd.clock(true);
        assert!(hpd.status());
    }

    #[test]
    fn reset_restores_enable_storage() {
        let mut hpd = HotPlug::new(true, true);
        hpd.set_enable(false);
        assert!(!hpd.enable());
        hpd.reset();
        assert!(hpd.enable());
    }
}
