//! "EDID read started" interrupt.
//!
//! The trigger is "FSM is in `WAIT_START`". An edge event source raises a
//! pending flag on *either* edge of the trigger and captures the trigger's
//! level at that moment as its status, so the consumer can tell a read
//! starting (captured 0) from a read ending (captured 1).

/// Event source that fires on both edges of its trigger.
#[derive(Debug, Clone, Copy)]
pub struct EdgeEventSource {
    trigger_r: bool,
    pending: bool,
    captured_trigger: bool,
    reset_value: bool,
}

impl EdgeEventSource {
    #[must_use]
    pub const fn new(trigger_reset_value: bool) -> Self {
        Self {
            trigger_r: trigger_reset_value,
            pending: false,
            captured_trigger: false,
            reset_value: trigger_reset_value,
        }
    }

    #[must_use]
    pub const fn status(&self) -> bool {
        self.captured_trigger
    }

    #[must_use]
    pub const fn pending(&self) -> bool {
        self.pending
    }

    /// Clock edge. A clear in the same tick as a new edge wins, and while an
    /// event is pending further edges are not captured.
    pub fn clock(&mut self, trigger: bool, clear: bool) {
        if !self.pending && (self.trigger_r ^ trigger) {
            self.pending = true;
            self.captured_trigger = trigger;
        }
        if clear {
            self.pending = false;
        }
        self.trigger_r = trigger;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.reset_value);
    }
}

/// Event manager for the EDID block: one source plus enable and a
/// write-one-to-clear pending register.
#[derive(Debug, Clone, Copy)]
pub struct EdidIrq {
    read_started: EdgeEventSource,
    enable: bool,
    clear_strobe: bool,
}

impl EdidIrq {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            // FSM resets into WAIT_START, so the trigger starts high.
            read_started: EdgeEventSource::new(true),
            enable: false,
            clear_strobe: false,
        }
    }

    #[must_use]
    pub const fn status(&self) -> bool {
        self.read_started.status()
    }

    #[must_use]
    pub const fn pending(&self) -> bool {
        self.read_started.pending()
    }

    #[must_use]
    pub const fn enable(&self) -> bool {
        self.enable
    }

    pub fn set_enable(&mut self, enable: bool) {
        self.enable = enable;
    }

    /// Write 1 to the pending register. Like a CSR write strobe, it takes
    /// effect on the next tick.
    pub fn clear(&mut self) {
        self.clear_strobe = true;
    }

    /// Interrupt line towards the CPU.
    #[must_use]
    pub const fn irq(&self) -> bool {
        self.read_started.pending() && self.enable
    }

    pub fn clock(&mut self, trigger: bool) {
        self.read_started.clock(trigger, self.clear_strobe);
        self.clear_strobe = false;
    }

    pub fn reset(&mut self) {
        self.read_started.reset();
        self.enable = false;
        self.clear_strobe = false;
    }
}

impl Default for EdidIrq {
    fn default() -> Self {
        Self::new()
    }
}
