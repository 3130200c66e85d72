//! 4-bit LSB embedding.
//!
//! The top nibble of each secret pixel replaces the bottom nibble of the
//! matching cover pixel. Extraction shifts the bottom nibble back up and
//! zero-fills below it, so the recovered image is the secret reduced to
//! 4 bits per pixel: `extract(embed(c, s)) == s & 0xF0` for every pixel,
//! whatever the cover holds. The lost low nibble is inherent to the scheme.

use crate::error::StegoError;
use crate::raster::Raster;

/// `(cover & 0xF0) | (secret >> 4)`
#[inline]
pub const fn embed_pixel(cover: u8, secret: u8) -> u8 {
    (cover & 0xF0) | (secret >> 4)
}

/// `(stego & 0x0F) << 4`
#[inline]
pub const fn extract_pixel(stego: u8) -> u8 {
    (stego & 0x0F) << 4
}

fn check_same_size(expected: &Raster, actual: &Raster) -> Result<(), StegoError> {
    if expected.dimensions() != actual.dimensions() {
        return Err(StegoError::DimensionMismatch {
            expected: expected.dimensions(),
            actual: actual.dimensions(),
        });
    }
    Ok(())
}

/// Hide `secret` in a copy of `cover`.
pub fn embed(cover: &Raster, secret: &Raster) -> Result<Raster, StegoError> {
    check_same_size(cover, secret)?;
    let mut stego = Raster::try_new(cover.dimensions())?;
    for ((s, &c), &h) in stego
        .pixels_mut()
        .iter_mut()
        .zip(cover.pixels())
        .zip(secret.pixels())
    {
        *s = embed_pixel(c, h);
    }
    Ok(stego)
}

/// Hide `secret` in `cover`, overwriting its low nibbles.
pub fn embed_in_place(cover: &mut Raster, secret: &Raster) -> Result<(), StegoError> {
    check_same_size(cover, secret)?;
    for (c, &h) in cover.pixels_mut().iter_mut().zip(secret.pixels()) {
        *c = embed_pixel(*c, h);
    }
    Ok(())
}

/// Recover the 4-bit approximation of the hidden image into a new raster.
pub fn extract(stego: &Raster) -> Result<Raster, StegoError> {
    let mut out = Raster::try_new(stego.dimensions())?;
    extract_into(stego, &mut out)?;
    Ok(out)
}

/// Recover the 4-bit approximation of the hidden image into `out`.
pub fn extract_into(stego: &Raster, out: &mut Raster) -> Result<(), StegoError> {
    check_same_size(stego, out)?;
    for (o, &s) in out.pixels_mut().iter_mut().zip(stego.pixels()) {
        *o = extract_pixel(s);
    }
    Ok(())
}
