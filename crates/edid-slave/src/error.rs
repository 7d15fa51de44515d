use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building an EDID slave.
///
/// Bus-level failures (wrong slave address, master NACK) are never errors:
/// the engine silently returns to idle, exactly like a passive I2C device.
#[derive(Debug, Error)]
pub enum EdidError {
    #[error("invalid EDID image length: {0} bytes (expected 128)")]
    InvalidLength(usize),

    #[error("failed to read EDID image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[cfg(feature = "json")]
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
