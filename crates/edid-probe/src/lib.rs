//! Host-side EDID probe.
//!
//! Builds an EDID slave, attaches it to a simulated DDC bus and reads it
//! back with the bit-banged master, the same way a source's firmware would
//! after a hot-plug event.

use std::path::Path;

use edid_slave::{EdidConfig, EdidError, EdidMemory, EdidSlave};
use gate_core::{SystemClock, Ticks};
use i2c_bitbang::{EdidBlock, I2cError, I2cMaster, ReadEdidError, SimPort, read_edid};
use thiserror::Error;

/// How long HPD enable is held low when toggling it.
pub const HPD_TOGGLE_TICKS: u64 = 65_536;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Edid(#[from] EdidError),
    #[error("I2C bus: {0}")]
    Bus(#[from] I2cError),
    #[error("EDID read failed: {0}")]
    Read(#[from] ReadEdidError),
    #[error("failed to read config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub config: EdidConfig,
    pub clock: SystemClock,
    pub bus_hz: u64,
    /// Pulse HPD enable low before reading, forcing a rescan.
    pub toggle_hpd: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            config: EdidConfig::default(),
            clock: SystemClock::new(50_000_000),
            bus_hz: 100_000,
            toggle_hpd: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub blocks: Vec<EdidBlock>,
    pub hpd_status: bool,
    /// "EDID read started" event pending after the read.
    pub irq_pending: bool,
    /// Trigger level captured by that event (0 = read started).
    pub irq_status: bool,
    pub elapsed: Ticks,
}

/// Load a slave configuration: JSON config first, then an image file
/// overriding its memory.
pub fn load_config(
    config_path: Option<&Path>,
    image_path: Option<&Path>,
) -> Result<EdidConfig, ProbeError> {
    let mut config = match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| ProbeError::Config {
                path: path.display().to_string(),
                source,
            })?;
            EdidConfig::from_json(&text)?
        }
        None => EdidConfig::default(),
    };
    if let Some(path) = image_path {
        config.memory = Some(EdidMemory::from_file(path)?.as_bytes().to_vec());
    }
    Ok(config)
}

pub fn probe(options: &ProbeOptions) -> Result<ProbeReport, ProbeError> {
    let mut slave = EdidSlave::new(&options.config)?;
    slave.irq_mut().set_enable(true);

    let mut port = SimPort::new(slave, options.clock, options.bus_hz);
    if options.toggle_hpd {
        tracing::info!("toggling HPD for EDID rescan");
        port.target_mut().set_hpd_enable(false);
        port.run(HPD_TOGGLE_TICKS);
    }
    port.target_mut().set_hpd_enable(true);
    tracing::debug!(half_period = port.half_period().get(), "bus configured");

    let mut master = I2cMaster::new(port);
    master.init()?;
    let blocks = read_edid(&mut master)?;

    let port = master.into_port();
    let slave = port.target();
    Ok(ProbeReport {
        blocks,
        hpd_status: slave.hpd_status(),
        irq_pending: slave.irq().pending(),
        irq_status: slave.irq().status(),
        elapsed: port.elapsed(),
    })
}
