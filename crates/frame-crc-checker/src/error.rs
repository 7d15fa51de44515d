use thiserror::Error;

/// Errors raised while configuring a checker or building test frames.
///
/// A CRC mismatch is not an error: it is reported on the `error` output at
/// end of packet and the frame is still forwarded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckerError {
    #[error("unsupported unit width: {0} bits (expected 8, 16 or 32)")]
    UnsupportedWidth(u32),

    #[error("unit {unit:#x} does not fit in {bits} bits")]
    UnitOutOfRange { unit: u32, bits: u32 },

    #[error("a frame needs at least one payload unit")]
    EmptyFrame,
}
