//! PGM grayscale: P2 (ASCII) and P5 (raw binary).
//!
//! Both decoders take the expected [`Dimensions`] up front and fill a
//! caller-owned [`Raster`]; a header that disagrees with them is rejected.

mod decode;
mod encode;

pub use decode::{decode_binary, decode_binary_into, decode_text, decode_text_into};
pub use encode::{encode_binary, encode_text};

use crate::error::{FormatError, StegoError};
use crate::raster::{Dimensions, Raster};
use alloc::vec::Vec;
use enough::Stop;

/// Which PGM sub-format to use.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PgmVariant {
    /// P2: decimal ASCII samples, whitespace separated.
    Text,
    /// P5: raw 8-bit samples.
    Binary,
}

impl PgmVariant {
    /// Two-byte magic token.
    pub fn magic(self) -> &'static str {
        match self {
            PgmVariant::Text => "P2",
            PgmVariant::Binary => "P5",
        }
    }

    /// Detect the variant from the leading magic (leading whitespace allowed).
    pub fn detect(data: &[u8]) -> Option<Self> {
        let start = data.iter().position(|&b| !decode::is_pnm_whitespace(b))?;
        match data.get(start..start + 2)? {
            b"P2" => Some(PgmVariant::Text),
            b"P5" => Some(PgmVariant::Binary),
            _ => None,
        }
    }
}

/// Parsed PGM header (internal).
pub(crate) struct PgmHeader {
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
    /// Offset of the first pixel byte/token.
    pub data_offset: usize,
}

impl PgmHeader {
    pub(crate) fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Decode P2 or P5, picked by the magic bytes.
pub fn decode(data: &[u8], dims: Dimensions, stop: impl Stop) -> Result<Raster, StegoError> {
    match PgmVariant::detect(data) {
        Some(PgmVariant::Text) => decode_text(data, dims, stop),
        Some(PgmVariant::Binary) => decode_binary(data, dims, stop),
        None => Err(FormatError::BadMagic {
            expected: "P2 or P5",
            found: decode::leading_token(data),
        }
        .into()),
    }
}

/// Encode `raster` in the given variant.
pub fn encode(raster: &Raster, variant: PgmVariant, stop: impl Stop) -> Result<Vec<u8>, StegoError> {
    match variant {
        PgmVariant::Text => encode_text(raster, stop),
        PgmVariant::Binary => encode_binary(raster, stop),
    }
}
