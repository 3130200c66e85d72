//! PGM decoders: P2 (ASCII) and P5 (raw).

use alloc::format;
use alloc::string::String;
use enough::Stop;

use super::PgmHeader;
use crate::error::{FormatError, StegoError};
use crate::raster::{Dimensions, Raster};

/// Token separator: ASCII whitespace plus vertical tab (0x0b).
pub(crate) fn is_pnm_whitespace(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// Byte cursor over PGM text with the tokenizing rules both variants share.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_pnm_whitespace) {
            self.pos += 1;
        }
    }

    /// Skip whitespace and whole `#` comments (through the newline or EOF).
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b'#') => {
                    while let Some(b) = self.peek() {
                        self.pos += 1;
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                Some(b) if is_pnm_whitespace(b) => self.pos += 1,
                _ => return,
            }
        }
    }

    /// Up to two non-whitespace bytes after optional leading whitespace.
    fn magic(&mut self) -> &'a [u8] {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos - start < 2 && self.peek().is_some_and(|b| !is_pnm_whitespace(b)) {
            self.pos += 1;
        }
        &self.data[start..self.pos]
    }

    /// Optional sign followed by at least one digit. Leading whitespace is skipped.
    fn signed_digits(&mut self) -> Option<(bool, &'a [u8])> {
        self.skip_whitespace();
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        Some((negative, &self.data[start..self.pos]))
    }

    /// Signed decimal integer; `None` on a missing token or overflow.
    fn int(&mut self) -> Option<i64> {
        let (negative, digits) = self.signed_digits()?;
        let magnitude = digits.iter().try_fold(0i64, |acc, &d| {
            acc.checked_mul(10)?.checked_add(i64::from(d - b'0'))
        })?;
        Some(if negative { -magnitude } else { magnitude })
    }

    /// Decimal sample narrowed to 8 bits modulo 256 (`256 -> 0`, `-1 -> 255`).
    fn sample(&mut self) -> Option<u8> {
        let (negative, digits) = self.signed_digits()?;
        let low = digits
            .iter()
            .fold(0u8, |acc, &d| acc.wrapping_mul(10).wrapping_add(d - b'0'));
        Some(if negative { low.wrapping_neg() } else { low })
    }

    /// Unsigned decimal integer without sign; `None` on a missing token or overflow.
    fn unsigned(&mut self) -> Option<u32> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        self.data[start..self.pos].iter().try_fold(0u32, |acc, &d| {
            acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
        })
    }
}

/// The first (at most two byte) token, for error messages.
pub(crate) fn leading_token(data: &[u8]) -> String {
    String::from_utf8_lossy(Cursor::new(data).magic()).into_owned()
}

fn check_magic(found: &[u8], expected: &'static str) -> Result<(), FormatError> {
    if found == expected.as_bytes() {
        Ok(())
    } else {
        Err(FormatError::BadMagic {
            expected,
            found: String::from_utf8_lossy(found).into_owned(),
        })
    }
}

fn check_dimensions(width: i64, height: i64, expected: Dimensions) -> Result<(), FormatError> {
    if width != i64::from(expected.width) || height != i64::from(expected.height) {
        return Err(FormatError::BadDimensions(format!(
            "{width}x{height} does not match expected {expected}"
        )));
    }
    Ok(())
}

/// Parse a P2 header: magic, comment lines, width, height, maxval.
///
/// Comments are only recognized directly after the magic token.
fn parse_text_header(cursor: &mut Cursor<'_>, expected: Dimensions) -> Result<PgmHeader, FormatError> {
    check_magic(cursor.magic(), "P2")?;
    cursor.skip_whitespace_and_comments();

    let width = cursor
        .int()
        .ok_or_else(|| FormatError::BadDimensions("missing or invalid width".into()))?;
    let height = cursor
        .int()
        .ok_or_else(|| FormatError::BadDimensions("missing or invalid height".into()))?;
    let maxval = cursor
        .int()
        .ok_or_else(|| FormatError::BadDimensions("missing or invalid maxval".into()))?;
    check_dimensions(width, height, expected)?;

    Ok(PgmHeader {
        width: expected.width,
        height: expected.height,
        maxval: maxval.clamp(0, i64::from(u32::MAX)) as u32,
        data_offset: cursor.pos,
    })
}

/// Parse a P5 header. Comments may appear between any header tokens; exactly
/// one whitespace byte separates maxval from the raw samples.
pub(crate) fn parse_binary_header(data: &[u8], expected: Dimensions) -> Result<PgmHeader, StegoError> {
    let mut cursor = Cursor::new(data);
    check_magic(cursor.magic(), "P5")?;

    let mut field = |name: &str| {
        cursor.skip_whitespace_and_comments();
        cursor
            .unsigned()
            .ok_or_else(|| FormatError::BadDimensions(format!("missing or invalid {name}")))
    };
    let width = field("width")?;
    let height = field("height")?;
    let maxval = field("maxval")?;
    check_dimensions(i64::from(width), i64::from(height), expected)?;

    if maxval == 0 || maxval > 255 {
        return Err(FormatError::UnsupportedMaxval(maxval).into());
    }

    match cursor.peek() {
        Some(b) if is_pnm_whitespace(b) => cursor.pos += 1,
        Some(_) => {
            return Err(FormatError::BadDimensions(
                "maxval must be followed by a single whitespace byte".into(),
            )
            .into());
        }
        None => {
            return Err(FormatError::TruncatedData {
                expected: expected.pixel_count(),
                found: 0,
            }
            .into());
        }
    }

    Ok(PgmHeader {
        width,
        height,
        maxval,
        data_offset: cursor.pos,
    })
}

/// Decode ASCII PGM (P2) into a freshly allocated raster of size `dims`.
pub fn decode_text(data: &[u8], dims: Dimensions, stop: impl Stop) -> Result<Raster, StegoError> {
    let mut raster = Raster::try_new(dims)?;
    decode_text_impl(data, &mut raster, &stop)?;
    Ok(raster)
}

/// Decode ASCII PGM (P2) into an existing raster.
///
/// The header must declare exactly the raster's dimensions. Samples are
/// narrowed to 8 bits without checking them against maxval. On error the
/// raster may be partially overwritten.
pub fn decode_text_into(data: &[u8], raster: &mut Raster, stop: impl Stop) -> Result<(), StegoError> {
    decode_text_impl(data, raster, &stop)
}

fn decode_text_impl(data: &[u8], raster: &mut Raster, stop: &dyn Stop) -> Result<(), StegoError> {
    let mut cursor = Cursor::new(data);
    let header = parse_text_header(&mut cursor, raster.dimensions())?;
    if header.maxval != 255 {
        log::debug!(
            "P2 maxval {} (not 255); samples are passed through unscaled",
            header.maxval
        );
    }

    stop.check()?;

    let expected = raster.pixels().len();
    let mut found = 0usize;
    for (row_idx, row) in raster.rows_mut().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            *px = cursor
                .sample()
                .ok_or(FormatError::TruncatedData { expected, found })?;
            found += 1;
        }
    }

    log::debug!(
        "decoded P2 {} ({} samples, header {} bytes)",
        header.dimensions(),
        found,
        header.data_offset
    );
    Ok(())
}

/// Decode raw PGM (P5) into a freshly allocated raster of size `dims`.
pub fn decode_binary(data: &[u8], dims: Dimensions, stop: impl Stop) -> Result<Raster, StegoError> {
    let mut raster = Raster::try_new(dims)?;
    decode_binary_impl(data, &mut raster, &stop)?;
    Ok(raster)
}

/// Decode raw PGM (P5) into an existing raster.
///
/// Only 8-bit samples (maxval 1..=255) are accepted. Bytes past the last
/// sample are ignored.
pub fn decode_binary_into(data: &[u8], raster: &mut Raster, stop: impl Stop) -> Result<(), StegoError> {
    decode_binary_impl(data, raster, &stop)
}

fn decode_binary_impl(data: &[u8], raster: &mut Raster, stop: &dyn Stop) -> Result<(), StegoError> {
    let header = parse_binary_header(data, raster.dimensions())?;

    stop.check()?;

    let expected = raster.pixels().len();
    let available = data.len().saturating_sub(header.data_offset);
    let samples = data
        .get(header.data_offset..header.data_offset + expected)
        .ok_or(FormatError::TruncatedData {
            expected,
            found: available,
        })?;
    raster.pixels_mut().copy_from_slice(samples);

    log::debug!(
        "decoded P5 {} (maxval {}, header {} bytes)",
        header.dimensions(),
        header.maxval,
        header.data_offset
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::{StopReason, Unstoppable};

    struct Fired;

    impl Stop for Fired {
        fn check(&self) -> Result<(), StopReason> {
            Err(StopReason::Cancelled)
        }
    }

    const DIMS: Dimensions = Dimensions::new(3, 2);

    fn text(body: &str) -> Result<Raster, StegoError> {
        decode_text(body.as_bytes(), DIMS, Unstoppable)
    }

    fn format_err(result: Result<Raster, StegoError>) -> FormatError {
        match result {
            Err(StegoError::Format(e)) => e,
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn decodes_simple_text() {
        let r = text("P2\n3 2\n255\n0 1 2\n253 254 255\n").unwrap();
        assert_eq!(r.pixels(), &[0, 1, 2, 253, 254, 255]);
    }

    #[test]
    fn samples_may_span_lines_arbitrarily() {
        let r = text("P2 3 2 255 10\n20\t30\r\n40   50\n\n60").unwrap();
        assert_eq!(r.pixels(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn vertical_tab_separates_tokens() {
        let r = text("P2\n3\x0b2\n255\n1\x0b2 3\x0b4 5 6\x0b").unwrap();
        assert_eq!(r.pixels(), &[1, 2, 3, 4, 5, 6]);
        let r = decode_binary(b"P5\x0b3 2\x0b255\x0b\x01\x02\x03\x04\x05\x06", DIMS, Unstoppable).unwrap();
        assert_eq!(r.pixels(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn samples_are_truncated_to_eight_bits() {
        let r = text("P2\n3 2\n255\n256 -1 300\n+7 511 -256\n").unwrap();
        assert_eq!(r.pixels(), &[0, 255, 44, 7, 255, 0]);
    }

    #[test]
    fn maxval_is_not_enforced() {
        let r = text("P2\n3 2\n15\n200 0 0\n0 0 16\n").unwrap();
        assert_eq!(r.pixels(), &[200, 0, 0, 0, 0, 16]);
    }

    #[test]
    fn comment_lines_after_magic_are_skipped() {
        let plain = text("P2\n3 2\n255\n1 2 3 4 5 6\n").unwrap();
        let commented = text("P2\n# made by hand\n# second line\n3 2\n255\n1 2 3 4 5 6\n").unwrap();
        assert_eq!(plain, commented);
    }

    #[test]
    fn comment_at_end_of_input_is_skipped() {
        let e = format_err(text("P2\n# only a comment"));
        assert!(matches!(e, FormatError::BadDimensions(_)));
    }

    #[test]
    fn comment_inside_header_values_is_not_supported() {
        let e = format_err(text("P2\n3 # width\n2\n255\n1 2 3 4 5 6\n"));
        assert!(matches!(e, FormatError::BadDimensions(_)));
    }

    #[test]
    fn rejects_wrong_magic() {
        let e = format_err(text("P3\n3 2\n255\n1 2 3 4 5 6\n"));
        assert_eq!(
            e,
            FormatError::BadMagic {
                expected: "P2",
                found: "P3".into()
            }
        );
        assert!(matches!(format_err(text("")), FormatError::BadMagic { .. }));
        assert!(matches!(format_err(text("P")), FormatError::BadMagic { .. }));
        assert!(matches!(
            format_err(text("# c\nP2\n3 2\n255\n1 2 3 4 5 6")),
            FormatError::BadMagic { .. }
        ));
    }

    #[test]
    fn rejects_wrong_dimensions() {
        let e = format_err(text("P2\n2 3\n255\n1 2 3 4 5 6\n"));
        assert!(matches!(e, FormatError::BadDimensions(_)));
        let e = format_err(text("P2\nthree 2\n255\n"));
        assert!(matches!(e, FormatError::BadDimensions(_)));
        let e = format_err(text("P2\n3 2\n"));
        assert!(matches!(e, FormatError::BadDimensions(_)));
        let e = format_err(text("P2\n99999999999999999999 2\n255\n"));
        assert!(matches!(e, FormatError::BadDimensions(_)));
    }

    #[test]
    fn rejects_short_pixel_data() {
        let e = format_err(text("P2\n3 2\n255\n1 2 3 4 5\n"));
        assert_eq!(
            e,
            FormatError::TruncatedData {
                expected: 6,
                found: 5
            }
        );
    }

    #[test]
    fn rejects_garbage_sample() {
        let e = format_err(text("P2\n3 2\n255\n1 2x 3 4 5 6\n"));
        assert_eq!(
            e,
            FormatError::TruncatedData {
                expected: 6,
                found: 2
            }
        );
    }

    #[test]
    fn ignores_trailing_data() {
        let r = text("P2\n3 2\n255\n1 2 3 4 5 6 7 8 junk").unwrap();
        assert_eq!(r.pixels(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn decode_into_reuses_buffer() {
        let mut r = Raster::try_new(DIMS).unwrap();
        decode_text_into(b"P2\n3 2\n255\n6 5 4 3 2 1", &mut r, Unstoppable).unwrap();
        assert_eq!(r.pixels(), &[6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn decodes_binary() {
        let mut data = b"P5\n3 2\n255\n".to_vec();
        data.extend_from_slice(&[9, 8, 7, b'\n', b' ', 0]);
        let r = decode_binary(&data, DIMS, Unstoppable).unwrap();
        assert_eq!(r.pixels(), &[9, 8, 7, b'\n', b' ', 0]);
    }

    #[test]
    fn binary_header_allows_comments() {
        let data = b"P5 # w h\n3\n# h\n2 255\n\x01\x02\x03\x04\x05\x06";
        let r = decode_binary(data, DIMS, Unstoppable).unwrap();
        assert_eq!(r.pixels(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn binary_rejects_sixteen_bit() {
        let data = b"P5\n3 2\n65535\n";
        let e = format_err(decode_binary(data, DIMS, Unstoppable));
        assert_eq!(e, FormatError::UnsupportedMaxval(65535));
    }

    #[test]
    fn binary_rejects_truncated() {
        let data = b"P5\n3 2\n255\n\x01\x02";
        let e = format_err(decode_binary(data, DIMS, Unstoppable));
        assert_eq!(
            e,
            FormatError::TruncatedData {
                expected: 6,
                found: 2
            }
        );
        let e = format_err(decode_binary(b"P5\n3 2\n255", DIMS, Unstoppable));
        assert!(matches!(e, FormatError::TruncatedData { found: 0, .. }));
    }

    #[test]
    fn binary_rejects_text_magic_and_bad_dims() {
        let e = format_err(decode_binary(b"P2\n3 2\n255\n", DIMS, Unstoppable));
        assert!(matches!(e, FormatError::BadMagic { expected: "P5", .. }));
        let e = format_err(decode_binary(b"P5\n4 2\n255\n", DIMS, Unstoppable));
        assert!(matches!(e, FormatError::BadDimensions(_)));
        let e = format_err(decode_binary(b"P5\n3 2\n255x", DIMS, Unstoppable));
        assert!(matches!(e, FormatError::BadDimensions(_)));
    }

    #[test]
    fn leading_token_is_at_most_two_bytes() {
        assert_eq!(leading_token(b"  P7\nWIDTH"), "P7");
        assert_eq!(leading_token(b"BM\x00"), "BM");
        assert_eq!(leading_token(b""), "");
    }

    #[test]
    fn stop_token_cancels_decode() {
        let result = decode_text(b"P2\n3 2\n255\n1 2 3 4 5 6\n", DIMS, Fired);
        assert!(matches!(result, Err(StegoError::Cancelled(StopReason::Cancelled))));

        let result = decode_binary(b"P5\n3 2\n255\n\x01\x02\x03\x04\x05\x06", DIMS, Fired);
        assert!(matches!(result, Err(StegoError::Cancelled(StopReason::Cancelled))));

        let mut raster = Raster::try_new(DIMS).unwrap();
        let result = decode_text_into(b"P2\n3 2\n255\n1 2 3 4 5 6\n", &mut raster, Fired);
        assert!(matches!(result, Err(StegoError::Cancelled(_))));
    }

    #[test]
    fn malformed_header_is_reported_before_cancellation() {
        let e = format_err(decode_text(b"P3\n3 2\n255\n", DIMS, Fired));
        assert!(matches!(e, FormatError::BadMagic { .. }));
    }
}
