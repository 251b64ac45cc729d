//! PPM encoder: P6, maxval 255.
//!
//! Credits: Draws from zune-ppm by Caleb Etemesi (MIT/Apache-2.0/Zlib).

use std::io::Write;

use enough::Stop;

use crate::buffer::Image;
use crate::error::EncodeError;

/// Stream `image` as binary PPM. Alpha is dropped.
pub(crate) fn write_ppm<W: Write>(
    mut out: W,
    image: &Image,
    stop: &dyn Stop,
) -> Result<(), EncodeError> {
    let width = image.width();
    let height = image.height();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let row_bytes = (width as usize)
        .checked_mul(3)
        .ok_or(EncodeError::DimensionsTooLarge { width, height })?;

    stop.check()?;

    write!(out, "P6\n{width} {height}\n255\n")?;

    let mut row = Vec::with_capacity(row_bytes);
    for (y, line) in image.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        row.clear();
        for px in line {
            row.extend_from_slice(&[px.r, px.g, px.b]);
        }
        out.write_all(&row)?;
    }
    out.flush()?;

    log::debug!("encoded PPM {width}x{height}");
    Ok(())
}

/// Encode `image` to an in-memory PPM.
pub(crate) fn encode_ppm(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    write_ppm(&mut out, image, stop)?;
    Ok(out)
}
