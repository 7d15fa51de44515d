//! Read an emulated EDID back over a simulated DDC bus.
//!
//! ```text
//! edid-probe [--image edid.bin] [--config edid.json] [--bus-khz 100]
//!            [--clock-mhz 50] [--toggle-hpd]
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=edid_slave=trace`).

use std::path::PathBuf;
use std::process;

use clap::Parser;
use edid_probe::{ProbeOptions, load_config, probe};
use gate_core::SystemClock;
use i2c_bitbang::format_hex_dump;
use tracing_subscriber::EnvFilter;

/// Fastest fabric clock accepted on the command line.
const MAX_CLOCK_MHZ: u64 = 1_000;
/// Fastest SCL accepted on the command line (high-speed mode is 3.4 MHz).
const MAX_BUS_KHZ: u64 = 5_000;

#[derive(Parser, Debug)]
#[command(
    name = "edid-probe",
    about = "Read an emulated EDID back over a simulated DDC bus"
)]
struct Args {
    /// Raw 128-byte EDID image to serve (defaults to the built-in image)
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// JSON slave configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SCL frequency in kHz
    #[arg(long, value_name = "KHZ", default_value_t = 100)]
    #[arg(value_parser = clap::value_parser!(u64).range(1..=MAX_BUS_KHZ))]
    bus_khz: u64,

    /// System clock frequency in MHz
    #[arg(long, value_name = "MHZ", default_value_t = 50)]
    #[arg(value_parser = clap::value_parser!(u64).range(1..=MAX_CLOCK_MHZ))]
    clock_mhz: u64,

    /// Pulse HPD enable low before reading
    #[arg(long, action = clap::ArgAction::SetTrue)]
    toggle_hpd: bool,
}

impl Args {
    fn clock(&self) -> SystemClock {
        SystemClock::new(self.clock_mhz * 1_000_000)
    }

    fn bus_hz(&self) -> u64 {
        self.bus_khz * 1_000
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match load_config(args.config.as_deref(), args.image.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            process::exit(1);
        }
    };
    let options = ProbeOptions {
        config,
        clock: args.clock(),
        bus_hz: args.bus_hz(),
        toggle_hpd: args.toggle_hpd,
    };

    let report = match probe(&options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("EDID probe failed: {e}");
            process::exit(1);
        }
    };

    for (i, block) in report.blocks.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", format_hex_dump(block));
    }
    let hpd = if report.hpd_status {
        "connected"
    } else {
        "disconnected"
    };
    eprintln!(
        "{} block(s), HPD {hpd}, read-started IRQ pending={} status={}, {} ticks",
        report.blocks.len(),
        u8::from(report.irq_pending),
        u8::from(report.irq_status),
        report.elapsed.get()
    );
}
