use alloc::string::String;
use enough::StopReason;

use crate::raster::Dimensions;

/// Errors from PGM decoding/encoding and the LSB transform.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StegoError {
    #[error("allocation of {bytes} bytes failed")]
    Allocation { bytes: usize },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("raster dimensions mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("pixel buffer has wrong length: need {needed} bytes, got {actual}")]
    BufferSize { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for StegoError {
    fn from(r: StopReason) -> Self {
        StegoError::Cancelled(r)
    }
}

/// Malformed PGM input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("bad magic: expected {expected}, found {found:?}")]
    BadMagic {
        expected: &'static str,
        found: String,
    },

    #[error("bad dimensions: {0}")]
    BadDimensions(String),

    #[error("truncated pixel data: expected {expected} samples, found {found}")]
    TruncatedData { expected: usize, found: usize },

    #[error("unsupported maxval {0} (8-bit samples only)")]
    UnsupportedMaxval(u32),
}
