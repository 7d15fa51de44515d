//! EDID slave configuration.

use crate::EdidError;
use crate::memory::EdidMemory;
use crate::sampler::DEFAULT_OVERSAMPLE_BITS;

/// 7-bit I2C address of the DDC EDID EEPROM.
pub const EDID_SLAVE_ADDRESS: u8 = 0x50;

/// Build-time configuration of one EDID slave instance.
///
/// With the `json` feature this can be loaded from a file such as:
///
/// ```json
/// { "hpd_pin_wired": false, "hpd_enable_at_reset": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EdidConfig {
    /// Override image; `None` serves [`crate::DEFAULT_EDID`].
    pub memory: Option<Vec<u8>>,
    /// Whether an HPD notification pin is wired. Without one, HPD status
    /// is hard-wired to "connected".
    pub hpd_pin_wired: bool,
    /// Reset value of the HPD enable storage bit. Off by default: firmware
    /// must enable the engine.
    pub hpd_enable_at_reset: bool,
    /// 7-bit slave address matched against the address byte.
    pub slave_address: u8,
    /// Oversample counter width; one sample is accepted every
    /// `2^oversample_bits` ticks.
    pub oversample_bits: u8,
}

impl Default for EdidConfig {
    fn default() -> Self {
        Self {
            memory: None,
            hpd_pin_wired: true,
            hpd_enable_at_reset: false,
            slave_address: EDID_SLAVE_ADDRESS,
            oversample_bits: DEFAULT_OVERSAMPLE_BITS,
        }
    }
}

impl EdidConfig {
    pub fn validate(&self) -> Result<(), EdidError> {
        if self.slave_address > 0x7F {
            return Err(EdidError::InvalidConfig("slave address must fit in 7 bits"));
        }
        if !(1..=16).contains(&self.oversample_bits) {
            return Err(EdidError::InvalidConfig(
                "oversample_bits must be between 1 and 16",
            ));
        }
        if let Some(bytes) = &self.memory {
            EdidMemory::from_bytes(bytes)?;
        }
        Ok(())
    }

    /// The memory image this configuration selects.
    pub fn memory(&self) -> Result<EdidMemory, EdidError> {
        match &self.memory {
            Some(bytes) => EdidMemory::from_bytes(bytes),
            None => Ok(EdidMemory::default()),
        }
    }

    #[cfg(feature = "json")]
    pub fn from_json(text: &str) -> Result<Self, EdidError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}
