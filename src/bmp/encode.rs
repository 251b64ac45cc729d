//! BMP encoder: uncompressed 24-bit, always bottom-up.

use std::io::Write;

use enough::Stop;

use super::header::{FileHeader, HEADERS_SIZE, InfoHeader, MAGIC, row_stride};
use crate::buffer::Image;
use crate::error::EncodeError;

/// ~300 DPI.
const PIXELS_PER_METER: i32 = 11811;
/// Written as-is for byte-identical output; readers ignore it for 24-bit.
const COLORS_IMPORTANT: u32 = 0x0100_0000;

/// Sizes derived from the image geometry.
struct Geometry {
    stride: usize,
    data_size: u32,
    file_size: u32,
}

fn geometry(width: u32, height: u32) -> Result<Geometry, EncodeError> {
    let too_large = EncodeError::DimensionsTooLarge { width, height };
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(too_large);
    }
    let stride = row_stride(width as usize).ok_or(EncodeError::DimensionsTooLarge {
        width,
        height,
    })?;
    let data_size = u32::try_from(stride)
        .ok()
        .and_then(|s| s.checked_mul(height))
        .ok_or(EncodeError::DimensionsTooLarge { width, height })?;
    let file_size = data_size
        .checked_add(HEADERS_SIZE as u32)
        .ok_or(too_large)?;
    Ok(Geometry {
        stride,
        data_size,
        file_size,
    })
}

fn headers(width: u32, height: u32, geo: &Geometry) -> (FileHeader, InfoHeader) {
    let file = FileHeader {
        magic: MAGIC,
        file_size: geo.file_size,
        reserved: 0,
        pixel_data_offset: HEADERS_SIZE as u32,
    };
    let info = InfoHeader {
        header_size: InfoHeader::SIZE as u32,
        width: width as i32,
        height: height as i32, // positive = bottom-up
        planes: 1,
        bits_per_pixel: 24,
        compression: 0,
        image_data_size: geo.data_size,
        x_pixels_per_meter: PIXELS_PER_METER,
        y_pixels_per_meter: PIXELS_PER_METER,
        colors_used: 0,
        colors_important: COLORS_IMPORTANT,
    };
    (file, info)
}

/// Stream `image` as a 24-bit BMP into `out`, one row at a time.
///
/// Bytes already handed to `out` stay there if a later write fails.
pub(crate) fn write_bmp<W: Write>(
    mut out: W,
    image: &Image,
    stop: &dyn Stop,
) -> Result<(), EncodeError> {
    let width = image.width();
    let height = image.height();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let geo = geometry(width, height)?;

    stop.check()?;

    let (file, info) = headers(width, height, &geo);
    out.write_all(&file.to_bytes())?;
    out.write_all(&info.to_bytes())?;

    // Padding bytes stay zero; pixel bytes are overwritten every row.
    let mut row = vec![0u8; geo.stride];
    for (i, y) in (0..height).rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for (dst, px) in row.chunks_exact_mut(3).zip(image.line(y)) {
            dst.copy_from_slice(&px.to_bgr());
        }
        out.write_all(&row)?;
    }
    out.flush()?;

    log::debug!(
        "encoded BMP {width}x{height} ({} bytes, stride {})",
        geo.file_size,
        geo.stride
    );
    Ok(())
}

/// Encode `image` to an in-memory BMP.
pub(crate) fn encode_bmp(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, EncodeError> {
    let capacity = geometry(image.width(), image.height())
        .map(|g| g.file_size as usize)
        .unwrap_or(0);
    let mut out = Vec::with_capacity(capacity);
    write_bmp(&mut out, image, stop)?;
    Ok(out)
}
