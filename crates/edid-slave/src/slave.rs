//! The EDID slave: pins in, open-drain SDA drive out.

use gate_core::{I2cTarget, Observable, Tickable, Value};

use crate::EdidError;
use crate::config::EdidConfig;
use crate::edge::EdgeDetector;
use crate::hpd::HotPlug;
use crate::irq::EdidIrq;
use crate::memory::EdidMemory;
use crate::sampler::InputSampler;
use crate::shifter::ByteShifter;
use crate::state::{self, FsmInputs, State};

/// Raw pin levels presented to the slave for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdidPins {
    pub scl: bool,
    /// Resolved SDA line level (pull-up, master and slave drive combined).
    pub sda: bool,
    /// HPD notification pin. Ignored when no pin is wired.
    pub hpd_notif: bool,
}

impl Default for EdidPins {
    /// An idle bus: both lines pulled high, display present.
    fn default() -> Self {
        Self {
            scl: true,
            sda: true,
            hpd_notif: true,
        }
    }
}

/// Outputs driven by the slave during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdidDrive {
    /// SDA output enable. The driven level is always 0: the slave only
    /// ever pulls the line low and relies on the external pull-up for 1.
    pub sda_oe: bool,
    /// HPD enable pin towards the source.
    pub hpd_en: bool,
    /// "EDID read started" interrupt line.
    pub irq: bool,
}

/// I2C-slave EDID emulator.
pub struct EdidSlave {
    slave_address: u8,
    memory: EdidMemory,
    /// Pin levels latched for the next tick.
    pins: EdidPins,

    sampler: InputSampler,
    edges: EdgeDetector,
    shifter: ByteShifter,
    state: State,

    is_read: bool,
    /// 7-bit read pointer.
    offset: u8,
    /// Registered memory read port output.
    dat_r: u8,
    /// Data bit currently presented on SDA during a read.
    data_bit: bool,
    data_drv: bool,
    /// Registered SDA drive enable (the pad's OE).
    sda_drv_reg: bool,

    hpd: HotPlug,
    irq: EdidIrq,
    ticks: u64,
}

impl EdidSlave {
    /// Create a slave from the given configuration.
    pub fn new(config: &EdidConfig) -> Result<Self, EdidError> {
        config.validate()?;
        let memory = config.memory()?;
        Ok(Self::from_parts(config, memory))
    }

    /// Create a slave with default settings serving `memory`.
    #[must_use]
    pub fn with_memory(memory: EdidMemory) -> Self {
        Self::from_parts(&EdidConfig::default(), memory)
    }

    fn from_parts(config: &EdidConfig, memory: EdidMemory) -> Self {
        Self {
            slave_address: config.slave_address,
            memory,
            pins: EdidPins::default(),
            sampler: InputSampler::new(config.oversample_bits),
            edges: EdgeDetector::new(),
            shifter: ByteShifter::new(),
            state: State::WaitStart,
            is_read: false,
            offset: 0,
            dat_r: 0,
            data_bit: false,
            data_drv: false,
            sda_drv_reg: false,
            hpd: HotPlug::new(config.hpd_pin_wired, config.hpd_enable_at_reset),
            irq: EdidIrq::new(),
            ticks: 0,
        }
    }

    /// Latch pin levels for the following ticks.
    pub fn set_pins(&mut self, pins: EdidPins) {
        self.pins = pins;
    }

    /// Run one tick with `pins` and return what the slave drove during it.
    pub fn step(&mut self, pins: EdidPins) -> EdidDrive {
        self.pins = pins;
        let drive = self.drive();
        self.tick();
        drive
    }

    /// Outputs currently driven (all registered).
    #[must_use]
    pub fn drive(&self) -> EdidDrive {
        EdidDrive {
            sda_oe: self.sda_drv_reg,
            hpd_en: self.hpd.enable(),
            irq: self.irq.irq(),
        }
    }

    // CSR-style accessors

    /// Write the HPD enable storage bit. Clearing it holds the FSM idle.
    pub fn set_hpd_enable(&mut self, enable: bool) {
        self.hpd.set_enable(enable);
    }

    #[must_use]
    pub fn hpd_enable(&self) -> bool {
        self.hpd.enable()
    }

    /// Resynchronised HPD notification.
    #[must_use]
    pub fn hpd_status(&self) -> bool {
        self.hpd.status()
    }

    /// Level on the HPD enable output pin.
    #[must_use]
    pub fn hpd_en_pin(&self) -> bool {
        self.hpd.enable()
    }

    #[must_use]
    pub fn irq(&self) -> &EdidIrq {
        &self.irq
    }

    pub fn irq_mut(&mut self) -> &mut EdidIrq {
        &mut self.irq
    }

    // Debug taps

    #[must_use]
    pub fn scl_raw(&self) -> bool {
        self.sampler.scl_raw()
    }

    #[must_use]
    pub fn sda_raw(&self) -> bool {
        self.sampler.sda_raw()
    }

    #[must_use]
    pub fn scl_i(&self) -> bool {
        self.sampler.scl()
    }

    #[must_use]
    pub fn sda_i(&self) -> bool {
        self.sampler.sda()
    }

    #[must_use]
    pub fn sda_oe(&self) -> bool {
        self.sda_drv_reg
    }

    /// Inverted OE, as seen on a logic analyser probing the pad output.
    #[must_use]
    pub fn sda_o(&self) -> bool {
        !self.sda_drv_reg
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn offset(&self) -> u8 {
        self.offset
    }

    #[must_use]
    pub fn counter(&self) -> u8 {
        self.shifter.counter()
    }

    #[must_use]
    pub fn din(&self) -> u8 {
        self.shifter.din()
    }

    #[must_use]
    pub fn is_read(&self) -> bool {
        self.is_read
    }

    #[must_use]
    pub fn memory(&self) -> &EdidMemory {
        &self.memory
    }

    /// Ticks since construction or the last reset.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Return every register to its reset value. The memory image is kept.
    pub fn reset(&mut self) {
        self.pins = EdidPins::default();
        self.sampler.reset();
        self.edges = EdgeDetector::new();
        self.shifter = ByteShifter::new();
        self.state = State::WaitStart;
        self.is_read = false;
        self.offset = 0;
        self.dat_r = 0;
        self.data_bit = false;
        self.data_drv = false;
        self.sda_drv_reg = false;
        self.hpd.reset();
        self.irq.reset();
        self.ticks = 0;
    }

    fn log_transition(&self, next: State, inputs: &FsmInputs) {
        if self.state == State::RcvAddress && inputs.byte_complete {
            if next == State::AckAddress0 {
                tracing::debug!(
                    address = inputs.din >> 1,
                    read = inputs.din & 1 != 0,
                    "EDID address matched"
                );
            } else if next == State::WaitStart {
                tracing::debug!(address = inputs.din >> 1, "address not ours, ignoring");
            }
        }
        if self.state == State::RcvOffset && inputs.byte_complete {
            tracing::debug!(offset = inputs.din & 0x7F, "EDID offset set");
        }
        if next != self.state {
            tracing::trace!(from = %self.state, to = %next, tick = self.ticks, "EDID FSM");
        }
    }
}

impl Tickable for EdidSlave {
    fn tick(&mut self) {
        let scl_i = self.sampler.scl();
        let sda_i = self.sampler.sda();
        let edges = self.edges.detect(scl_i, sda_i);
        let inputs = FsmInputs {
            scl_i,
            sda_i,
            scl_rising: edges.scl_rising,
            start: edges.start,
            byte_complete: self.shifter.byte_complete(),
            din: self.shifter.din(),
            is_read: self.is_read,
            hpd_enable: self.hpd.enable(),
            slave_address: self.slave_address,
        };
        let (next, act) = state::evaluate(self.state, &inputs);
        let sda_drv = act.zero_drv || (self.data_drv && !self.data_bit);

        // Commit. Everything read on the right-hand side below is the value
        // registered at the end of the previous tick.
        if act.update_is_read {
            self.is_read = inputs.din & 1 != 0;
        }
        if act.data_drv_en {
            let bit = 7 - self.shifter.counter();
            self.data_bit = (self.dat_r >> bit) & 1 != 0;
        }
        self.dat_r = self.memory.read(self.offset);
        if act.oc_load {
            self.offset = inputs.din & 0x7F;
        } else if act.oc_inc {
            self.offset = (self.offset + 1) & 0x7F;
        }
        if act.data_drv_en {
            self.data_drv = true;
        } else if act.data_drv_stop {
            self.data_drv = false;
        }
        self.sda_drv_reg = sda_drv;

        self.shifter.clock(&edges, sda_i);
        self.edges.clock(scl_i, sda_i);
        self.sampler.clock(self.pins.scl, self.pins.sda);
        self.hpd.clock(self.pins.hpd_notif);
        self.irq.clock(self.state == State::WaitStart);

        self.log_transition(next, &inputs);
        self.state = next;
        self.ticks += 1;
    }
}

impl I2cTarget for EdidSlave {
    fn set_bus(&mut self, scl: bool, sda: bool) {
        self.pins.scl = scl;
        self.pins.sda = sda;
    }

    fn sda_pulled_low(&self) -> bool {
        self.sda_drv_reg
    }
}

impl Observable for EdidSlave {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("memory.") {
            let hex = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X"));
            let offset = match hex {
                Some(hex) => u8::from_str_radix(hex, 16).ok(),
                None => rest.parse().ok(),
            };
            return offset.map(|o| Value::U8(self.memory.read(o)));
        }
        match path {
            "state" => Some(self.state.name().into()),
            "offset" => Some(self.offset.into()),
            "counter" => Some(self.shifter.counter().into()),
            "din" => Some(self.shifter.din().into()),
            "is_read" => Some(self.is_read.into()),
            "sda_oe" => Some(self.sda_drv_reg.into()),
            "scl_i" => Some(self.sampler.scl().into()),
            "sda_i" => Some(self.sampler.sda().into()),
            "hpd.status" => Some(self.hpd.status().into()),
            "hpd.enable" => Some(self.hpd.enable().into()),
            "irq.status" => Some(self.irq.status().into()),
            "irq.pending" => Some(self.irq.pending().into()),
            "irq.enable" => Some(self.irq.enable().into()),
            "ticks" => Some(self.ticks.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "state",
            "offset",
            "counter",
            "din",
            "is_read",
            "sda_oe",
            "scl_i",
            "sda_i",
            "hpd.status",
            "hpd.enable",
            "irq.status",
            "irq.pending",
            "irq.enable",
            "ticks",
            "memory.<offset>",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pin-level driver for a single slave, holding each level for a whole
    /// number of sample periods so every phase is observed.
    struct Bench {
        slave: EdidSlave,
        hold: u32,
        scl: bool,
        sda: bool,
    }

    impl Bench {
        fn new() -> Self {
            let config = EdidConfig {
                hpd_enable_at_reset: true,
                ..EdidConfig::default()
            };
            let mut slave = EdidSlave::new(&config).unwrap();
            slave.tick_n(gate_core::Ticks::new(200));
            Self {
                slave,
                hold: 200,
                scl: true,
                sda: true,
            }
        }

        fn set(&mut self, scl: bool, sda: bool) {
            self.scl = scl;
            self.sda = sda;
            for _ in 0..self.hold {
                let line = self.sda && !self.slave.sda_oe();
                self.slave.step(EdidPins {
                    scl: self.scl,
                    sda: line,
                    hpd_notif: true,
                });
            }
        }

        fn start(&mut self) {
            self.set(self.scl, true);
            self.set(true, true);
            self.set(true, false);
            self.set(false, false);
        }

        /// Clock one bit; returns the resolved SDA level while SCL was high.
        fn bit(&mut self, sda: bool) -> bool {
            self.set(false, sda);
            self.set(true, sda);
            let seen = self.sda && !self.slave.sda_oe();
            self.set(false, sda);
            seen
        }

        fn write_byte(&mut self, byte: u8) -> bool {
            for i in (0..8).rev() {
                self.bit((byte >> i) & 1 != 0);
            }
            !self.bit(true)
        }
    }

    #[test]
    fn idle_bus_leaves_fsm_waiting() {
        let mut b = Bench::new();
        b.set(true, true);
        assert_eq!(b.slave.state(), State::WaitStart);
        assert!(!b.slave.sda_oe());
    }

    #[test]
    fn start_enters_address_reception() {
        let mut b = Bench::new();
        b.start();
        assert_eq!(b.slave.state(), State::RcvAddress);
        assert_eq!(b.slave.counter(), 0);
    }

    #[test]
    fn acks_own_address() {
        let mut b = Bench::new();
        b.start();
        assert!(b.write_byte(0xA0));
        assert_eq!(b.slave.state(), State::RcvOffset);
        assert!(!b.slave.is_read());
    }

    #[test]
    fn ignores_foreign_address() {
        let mut b = Bench::new();
        b.start();
        assert!(!b.write_byte(0xA4));
        assert_eq!(b.slave.state(), State::WaitStart);
    }

    #[test]
    fn offset_write_loads_pointer_and_rearms_address() {
        let mut b = Bench::new();
        b.start();
        assert!(b.write_byte(0xA0));
        assert!(b.write_byte(0x12));
        assert_eq!(b.slave.offset(), 0x12);
        assert_eq!(b.slave.state(), State::RcvAddress);
    }

    #[test]
    fn offset_byte_is_truncated_to_seven_bits() {
        let mut b = Bench::new();
        b.start();
        b.write_byte(0xA0);
        b.write_byte(0x85);
        assert_eq!(b.slave.offset(), 0x05);
    }

    #[test]
    fn hpd_disable_forces_idle_within_one_tick() {
        let mut b = Bench::new();
        b.start();
        b.write_byte(0xA0);
        assert_ne!(b.slave.state(), State::WaitStart);
        b.slave.set_hpd_enable(false);
        b.slave.tick();
        assert_eq!(b.slave.state(), State::WaitStart);
        assert!(!b.slave.drive().hpd_en);
    }

    #[test]
    fn disabled_engine_never_acks() {
        let mut b = Bench::new();
        b.slave.set_hpd_enable(false);
        b.start();
        assert!(!b.write_byte(0xA0));
        assert_eq!(b.slave.state(), State::WaitStart);
    }

    #[test]
    fn leaving_wait_start_raises_interrupt() {
        let mut b = Bench::new();
        b.slave.irq_mut().set_enable(true);
        assert!(!b.slave.irq().pending());
        b.start();
        assert!(b.slave.irq().pending());
        assert!(
            !b.slave.irq().status(),
            "captured trigger is the WAIT_START flag"
        );
        assert!(b.slave.drive().irq);
    }

    #[test]
    fn observable_paths_report_registers() {
        let mut b = Bench::new();
        b.start();
        b.write_byte(0xA0);
        b.write_byte(0x7F);
        assert_eq!(b.slave.query("state"), Some(Value::from("RCV_ADDRESS")));
        assert_eq!(b.slave.query("offset"), Some(Value::U8(0x7F)));
        assert_eq!(b.slave.query("memory.0x7F"), Some(Value::U8(0x34)));
        assert_eq!(b.slave.query("memory.0"), Some(Value::U8(0x00)));
        assert_eq!(b.slave.query("hpd.enable"), Some(Value::Bool(true)));
        assert_eq!(b.slave.query("bogus"), None);
    }

    #[test]
    fn reset_returns_to_power_on_state() {
        let mut b = Bench::new();
        b.start();
        b.write_byte(0xA0);
        b.write_byte(0x20);
        b.slave.reset();
        assert_eq!(b.slave.state(), State::WaitStart);
        assert_eq!(b.slave.offset(), 0);
        assert_eq!(b.slave.ticks(), 0);
        assert!(
            b.slave.hpd_enable(),
            "HPD enable returns to its configured reset value"
        );
        assert_eq!(b.slave.memory().read(0x7F), 0x34);
    }

    #[test]
    fn unwired_hpd_pin_reads_connected() {
        let config = EdidConfig {
            hpd_pin_wired: false,
            ..EdidConfig::default()
        };
        let mut slave = EdidSlave::new(&config).unwrap();
        slave.step(EdidPins {
            hpd_notif: false,
            ..EdidPins::default()
        });
        assert!(slave.hpd_status());
    }

    #[test]
    fn wired_hpd_pin_follows_input() {
        let mut slave = EdidSlave::new(&EdidConfig::default()).unwrap();
        for _ in 0..3 {
            slave.step(EdidPins {
                hpd_notif: false,
                ..EdidPins::default()
            });
        }
        assert!(!slave.hpd_status());
        for _ in 0..3 {
            slave.step(EdidPins::default());
        }
        assert!(slave.hpd_status());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EdidConfig {
            oversample_bits: 17,
            ..EdidConfig::default()
        };
        assert!(EdidSlave::new(&config).is_err());
    }
}
