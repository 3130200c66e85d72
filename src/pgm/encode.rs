//! PGM encoders: P2 (ASCII) and P5 (raw).

use alloc::format;
use alloc::vec::Vec;
use enough::Stop;

use crate::error::StegoError;
use crate::raster::Raster;

/// Encode `raster` as ASCII PGM (P2).
///
/// Header is `P2\n{w} {h}\n255\n`. Every sample is written as decimal followed
/// by one space, and each row of `w` samples ends with a newline, so a row
/// reads `"12 0 255 \n"`.
pub fn encode_text(raster: &Raster, stop: impl Stop) -> Result<Vec<u8>, StegoError> {
    encode_text_impl(raster, &stop)
}

/// Encode `raster` as raw PGM (P5): `P5\n{w} {h}\n255\n` then the samples verbatim.
pub fn encode_binary(raster: &Raster, stop: impl Stop) -> Result<Vec<u8>, StegoError> {
    encode_binary_impl(raster, &stop)
}

fn encode_text_impl(raster: &Raster, stop: &dyn Stop) -> Result<Vec<u8>, StegoError> {
    let header = format!("P2\n{} {}\n255\n", raster.width(), raster.height());
    let pixels = raster.pixels();
    // at most "255 " per sample plus one newline per row
    let body = pixels
        .len()
        .saturating_mul(4)
        .saturating_add(raster.height() as usize);
    let mut out = Vec::with_capacity(header.len().saturating_add(body));
    out.extend_from_slice(header.as_bytes());

    stop.check()?;

    for (row_idx, row) in raster.rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for &v in row {
            push_decimal(&mut out, v);
            out.push(b' ');
        }
        out.push(b'\n');
    }

    log::debug!("encoded P2 {} ({} bytes)", raster.dimensions(), out.len());
    Ok(out)
}

fn encode_binary_impl(raster: &Raster, stop: &dyn Stop) -> Result<Vec<u8>, StegoError> {
    let header = format!("P5\n{} {}\n255\n", raster.width(), raster.height());
    let pixels = raster.pixels();
    let mut out = Vec::with_capacity(header.len() + pixels.len());
    out.extend_from_slice(header.as_bytes());

    stop.check()?;

    out.extend_from_slice(pixels);

    log::debug!("encoded P5 {} ({} bytes)", raster.dimensions(), out.len());
    Ok(out)
}

fn push_decimal(out: &mut Vec<u8>, v: u8) {
    if v >= 100 {
        out.push(b'0' + v / 100);
    }
    if v >= 10 {
        out.push(b'0' + (v / 10) % 10);
    }
    out.push(b'0' + v % 10);
}
