//! PPM decoder: P6, maxval 1..=255.

use enough::Stop;

use crate::buffer::Image;
use crate::error::DecodeError;
use crate::limits::{Limits, check_limits};
use crate::pixel::Color;

/// Parsed P6 header.
#[derive(Debug, PartialEq, Eq)]
struct PpmHeader {
    width: u32,
    height: u32,
    maxval: u32,
    data_offset: usize,
}

/// Skip whitespace and `#` comments. Returns how many bytes were skipped.
fn skip_separators(data: &[u8], pos: &mut usize) -> usize {
    let start = *pos;
    while let Some(&b) = data.get(*pos) {
        if b == b'#' {
            while let Some(&c) = data.get(*pos) {
                *pos += 1;
                if c == b'\n' || c == b'\r' {
                    break;
                }
            }
        } else if b.is_ascii_whitespace() {
            *pos += 1;
        } else {
            break;
        }
    }
    *pos - start
}

/// Read one decimal header field preceded by at least one separator.
fn read_field(data: &[u8], pos: &mut usize, name: &str) -> Result<u32, DecodeError> {
    if skip_separators(data, pos) == 0 {
        if *pos >= data.len() {
            return Err(DecodeError::Truncated);
        }
        return Err(DecodeError::InvalidHeader(format!(
            "expected whitespace before PPM {name}"
        )));
    }
    let start = *pos;
    let mut value: u32 = 0;
    while let Some(&b) = data.get(*pos) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .ok_or_else(|| DecodeError::InvalidHeader(format!("PPM {name} overflows u32")))?;
        *pos += 1;
    }
    if *pos == start {
        if *pos >= data.len() {
            return Err(DecodeError::Truncated);
        }
        return Err(DecodeError::InvalidHeader(format!(
            "PPM {name} is not a number"
        )));
    }
    Ok(value)
}

fn parse_header(data: &[u8]) -> Result<PpmHeader, DecodeError> {
    let magic = data.get(..2).ok_or(DecodeError::Truncated)?;
    if magic != b"P6" {
        if magic[0] == b'P' {
            return Err(DecodeError::UnsupportedVariant(format!(
                "PNM type {} (only binary PPM P6)",
                char::from(magic[1])
            )));
        }
        return Err(DecodeError::InvalidHeader("not a PPM file".into()));
    }

    let mut pos = 2;
    let width = read_field(data, &mut pos, "width")?;
    let height = read_field(data, &mut pos, "height")?;
    let maxval = read_field(data, &mut pos, "maxval")?;

    // Exactly one whitespace byte separates the header from the raster.
    match data.get(pos) {
        None => return Err(DecodeError::Truncated),
        Some(b) if b.is_ascii_whitespace() => pos += 1,
        Some(_) => {
            return Err(DecodeError::InvalidHeader(
                "expected whitespace after PPM maxval".into(),
            ));
        }
    }

    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        });
    }
    if maxval == 0 {
        return Err(DecodeError::InvalidHeader("PPM maxval is zero".into()));
    }
    if maxval > 255 {
        return Err(DecodeError::UnsupportedVariant(format!(
            "16-bit PPM (maxval {maxval})"
        )));
    }

    Ok(PpmHeader {
        width,
        height,
        maxval,
        data_offset: pos,
    })
}

/// Decode a P6 PPM into an [`Image`] (alpha = 255).
pub(crate) fn decode_ppm(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, DecodeError> {
    let header = parse_header(data)?;
    check_limits(limits, header.width, header.height)?;

    let row_bytes = (header.width as usize)
        .checked_mul(3)
        .ok_or(DecodeError::Truncated)?;
    let expected = row_bytes
        .checked_mul(header.height as usize)
        .ok_or(DecodeError::Truncated)?;
    let raster = data
        .get(header.data_offset..)
        .filter(|r| r.len() >= expected)
        .ok_or(DecodeError::Truncated)?;

    stop.check()?;

    let maxval = header.maxval;
    let scale = |v: u8| -> u8 {
        if maxval == 255 {
            v
        } else {
            let v = u32::from(v).min(maxval);
            ((v * 255 + maxval / 2) / maxval) as u8
        }
    };

    let mut image = Image::new(header.width, header.height, Color::BLACK);
    for (y, src) in raster[..expected].chunks_exact(row_bytes).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (px, rgb) in image.line_mut(y as u32).iter_mut().zip(src.chunks_exact(3)) {
            *px = Color::opaque(scale(rgb[0]), scale(rgb[1]), scale(rgb[2]));
        }
    }

    log::debug!(
        "decoded PPM {}x{} (maxval {})",
        header.width,
        header.height,
        header.maxval
    );
    Ok(image)
}
