//! 24-bit uncompressed BMP decoder.

use enough::Stop;

use super::header::{FileHeader, InfoHeader, MAGIC, read_headers, row_stride};
use crate::buffer::Image;
use crate::error::DecodeError;
use crate::limits::{Limits, check_limits};
use crate::pixel::Color;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), DecodeError> {
        if pos > self.data.len() {
            return Err(DecodeError::Truncated);
        }
        self.pos = pos;
        Ok(())
    }

    fn read_slice(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(n).ok_or(DecodeError::Truncated)?;
        let out = self.data.get(self.pos..end).ok_or(DecodeError::Truncated)?;
        self.pos = end;
        Ok(out)
    }
}

// ── Header validation ───────────────────────────────────────────────

/// Validated geometry of a 24-bit BMP.
#[derive(Debug)]
struct BmpLayout {
    width: u32,
    height: u32,
    /// True when the first stored row is the bottom row of the image.
    bottom_up: bool,
    stride: usize,
    pixel_data_offset: usize,
}

/// Parse both headers and check that this is a variant we decode.
fn parse_bmp_header(data: &[u8]) -> Result<BmpLayout, DecodeError> {
    let (file, info) = read_headers(data).ok_or(DecodeError::Truncated)?;
    validate(&file, &info)
}

fn validate(file: &FileHeader, info: &InfoHeader) -> Result<BmpLayout, DecodeError> {
    if file.magic != MAGIC {
        return Err(DecodeError::InvalidMagic);
    }
    if info.planes != 1 {
        return Err(DecodeError::UnsupportedVariant(format!(
            "BMP planes field is {}, expected 1",
            info.planes
        )));
    }
    if info.bits_per_pixel != 24 {
        return Err(DecodeError::UnsupportedVariant(format!(
            "BMP bit depth {} unsupported (only 24)",
            info.bits_per_pixel
        )));
    }
    if info.compression != 0 {
        return Err(DecodeError::UnsupportedVariant(format!(
            "BMP compression {} unsupported (only uncompressed)",
            info.compression
        )));
    }
    if info.width <= 0 || info.height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: i64::from(info.width),
            height: i64::from(info.height),
        });
    }

    let width = info.width.unsigned_abs();
    let height = info.height.unsigned_abs();
    let stride = row_stride(width as usize).ok_or(DecodeError::InvalidDimensions {
        width: i64::from(info.width),
        height: i64::from(info.height),
    })?;

    Ok(BmpLayout {
        width,
        height,
        bottom_up: info.height > 0,
        stride,
        pixel_data_offset: file.pixel_data_offset as usize,
    })
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode a 24-bit BMP into an [`Image`] (alpha = 255).
pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, DecodeError> {
    let layout = parse_bmp_header(data)?;
    check_limits(limits, layout.width, layout.height)?;

    // Every row must be present before anything is allocated.
    let needed = layout
        .stride
        .checked_mul(layout.height as usize)
        .and_then(|n| n.checked_add(layout.pixel_data_offset))
        .ok_or(DecodeError::Truncated)?;
    if data.len() < needed {
        return Err(DecodeError::Truncated);
    }

    stop.check()?;

    let mut cursor = Cursor::new(data);
    cursor.set_position(layout.pixel_data_offset)?;

    let mut image = Image::new(layout.width, layout.height, Color::BLACK);
    let last = layout.height - 1;
    for i in 0..layout.height {
        if i % 16 == 0 {
            stop.check()?;
        }
        let row = cursor.read_slice(layout.stride)?;
        let dst_y = if layout.bottom_up { last - i } else { i };
        for (px, bgr) in image.line_mut(dst_y).iter_mut().zip(row.chunks_exact(3)) {
            *px = Color::from_bgr([bgr[0], bgr[1], bgr[2]]);
        }
    }

    log::debug!(
        "decoded BMP {}x{} ({}, stride {})",
        layout.width,
        layout.height,
        if layout.bottom_up { "bottom-up" } else { "top-down" },
        layout.stride
    );

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    const A: [u8; 3] = [0x10, 0x20, 0x30]; // B, G, R
    const B: [u8; 3] = [0x40, 0x50, 0x60];

    /// Hand-built 1-pixel-wide BMP with the given rows in file order.
    fn build(height: i32, rows: &[[u8; 3]], offset: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(
            &FileHeader {
                magic: MAGIC,
                file_size: 0,
                reserved: 0,
                pixel_data_offset: offset,
            }
            .to_bytes(),
        );
        data.extend_from_slice(
            &InfoHeader {
                header_size: 40,
                width: 1,
                height,
                planes: 1,
                bits_per_pixel: 24,
                compression: 0,
                image_data_size: 0,
                x_pixels_per_meter: 0,
                y_pixels_per_meter: 0,
                colors_used: 0,
                colors_important: 0,
            }
            .to_bytes(),
        );
        data.resize(offset as usize, 0xAA);
        for row in rows {
            data.extend_from_slice(row);
            data.push(0); // pad to 4
        }
        data
    }

    fn decode(data: &[u8]) -> Result<Image, DecodeError> {
        decode_bmp(data, None, &Unstoppable)
    }

    #[test]
    fn positive_height_is_bottom_up() {
        let img = decode(&build(2, &[A, B], 54)).unwrap();
        assert_eq!((img.width(), img.height()), (1, 2));
        assert_eq!(img.line(0)[0], Color::from_bgr(B));
        assert_eq!(img.line(1)[0], Color::from_bgr(A));
    }

    #[test]
    fn negative_height_is_top_down() {
        let img = decode(&build(-2, &[A, B], 54)).unwrap();
        assert_eq!((img.width(), img.height()), (1, 2));
        assert_eq!(img.line(0)[0], Color::from_bgr(A));
        assert_eq!(img.line(1)[0], Color::from_bgr(B));
    }

    #[test]
    fn channels_are_bgr_and_alpha_opaque() {
        let img = decode(&build(1, &[[1, 2, 3]], 54)).unwrap();
        assert_eq!(img.line(0)[0], Color::new(3, 2, 1, 255));
    }

    #[test]
    fn honors_pixel_data_offset_gap() {
        let img = decode(&build(1, &[A], 70)).unwrap();
        assert_eq!(img.line(0)[0], Color::from_bgr(A));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = build(1, &[A], 54);
        data[0] = b'X';
        assert!(matches!(decode(&data), Err(DecodeError::InvalidMagic)));
    }

    #[test]
    fn rejects_unsupported_variants() {
        let mut data = build(1, &[A], 54);
        data[28..30].copy_from_slice(&32u16.to_le_bytes());
        assert!(matches!(
            decode(&data),
            Err(DecodeError::UnsupportedVariant(_))
        ));

        let mut data = build(1, &[A], 54);
        data[30..34].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(
            decode(&data),
            Err(DecodeError::UnsupportedVariant(_))
        ));

        let mut data = build(1, &[A], 54);
        data[26..28].copy_from_slice(&2u16.to_le_bytes());
        assert!(matches!(
            decode(&data),
            Err(DecodeError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn rejects_invalid_dimensions() {
        let data = build(0, &[], 54);
        assert!(matches!(
            decode(&data),
            Err(DecodeError::InvalidDimensions { width: 1, height: 0 })
        ));

        let mut data = build(1, &[A], 54);
        data[18..22].copy_from_slice(&(-1i32).to_le_bytes());
        assert!(matches!(
            decode(&data),
            Err(DecodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn truncated_inputs() {
        let data = build(2, &[A, B], 54);
        assert!(matches!(decode(&data[..53]), Err(DecodeError::Truncated)));
        assert!(matches!(
            decode(&data[..data.len() - 1]),
            Err(DecodeError::Truncated)
        ));

        // offset past end of file
        let mut data = build(1, &[A], 54);
        data[10..14].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(decode(&data), Err(DecodeError::Truncated)));
    }

    #[test]
    fn huge_header_without_data_does_not_allocate() {
        let mut data = build(1, &[A], 54);
        data[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
        data[22..26].copy_from_slice(&i32::MAX.to_le_bytes());
        assert!(decode(&data).is_err());
    }

    #[test]
    fn limits_checked_before_decode() {
        let data = build(2, &[A, B], 54);
        let limits = Limits {
            max_height: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            decode_bmp(&data, Some(&limits), &Unstoppable),
            Err(DecodeError::LimitExceeded(_))
        ));
    }
}
