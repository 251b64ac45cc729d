//! JPEG load/save, delegated to the `image` crate (`jpeg` feature).
//!
//! Without the feature the entry points still exist and report that JPEG
//! support was not compiled in.

use std::io::Write;

use enough::Stop;

use crate::buffer::Image;
use crate::error::{DecodeError, EncodeError};
use crate::limits::Limits;

/// Quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[cfg(feature = "jpeg")]
mod imp {
    use std::io::{Cursor, Write};

    use enough::Stop;
    use image::codecs::jpeg::{JpegDecoder, JpegEncoder};
    use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageError};

    use crate::buffer::Image;
    use crate::error::{DecodeError, EncodeError};
    use crate::limits::{Limits, check_limits};
    use crate::pixel::Color;

    fn decode_err(e: ImageError) -> DecodeError {
        match e {
            ImageError::Unsupported(e) => DecodeError::UnsupportedVariant(e.to_string()),
            ImageError::Limits(e) => DecodeError::LimitExceeded(e.to_string()),
            ImageError::IoError(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                DecodeError::Truncated
            }
            other => DecodeError::Codec(other.to_string()),
        }
    }

    fn encode_err(e: ImageError) -> EncodeError {
        match e {
            ImageError::IoError(e) => EncodeError::Io(e),
            other => EncodeError::Codec(other.to_string()),
        }
    }

    pub(super) fn decode(
        data: &[u8],
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Image, DecodeError> {
        let decoder = JpegDecoder::new(Cursor::new(data)).map_err(decode_err)?;
        let (width, height) = decoder.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions {
                width: i64::from(width),
                height: i64::from(height),
            });
        }
        check_limits(limits, width, height)?;
        stop.check()?;

        let rgb = DynamicImage::from_decoder(decoder)
            .map_err(decode_err)?
            .into_rgb8();

        let mut image = Image::new(width, height, Color::BLACK);
        let row_bytes = width as usize * 3;
        for (y, src) in rgb.as_raw().chunks_exact(row_bytes).enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            for (px, c) in image.line_mut(y as u32).iter_mut().zip(src.chunks_exact(3)) {
                *px = Color::opaque(c[0], c[1], c[2]);
            }
        }

        log::debug!("decoded JPEG {width}x{height}");
        Ok(image)
    }

    pub(super) fn write<W: Write>(
        mut out: W,
        image: &Image,
        quality: u8,
        stop: &dyn Stop,
    ) -> Result<(), EncodeError> {
        let width = image.width();
        let height = image.height();
        if width == 0 || height == 0 {
            return Err(EncodeError::InvalidDimensions { width, height });
        }
        // JPEG stores dimensions as u16
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(EncodeError::DimensionsTooLarge { width, height });
        }

        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for (y, line) in image.rows().enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            for px in line {
                rgb.extend_from_slice(&[px.r, px.g, px.b]);
            }
        }

        JpegEncoder::new_with_quality(&mut out, quality)
            .encode(&rgb, width, height, ExtendedColorType::Rgb8)
            .map_err(encode_err)?;
        out.flush()?;

        log::debug!("encoded JPEG {width}x{height} (quality {quality})");
        Ok(())
    }
}

/// Decode a baseline or progressive JPEG into an [`Image`] (alpha = 255).
pub(crate) fn decode_jpeg(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, DecodeError> {
    #[cfg(feature = "jpeg")]
    {
        imp::decode(data, limits, stop)
    }
    #[cfg(not(feature = "jpeg"))]
    {
        let _ = (data, limits, stop);
        Err(DecodeError::UnsupportedVariant(
            "JPEG support not compiled in (enable the `jpeg` feature)".into(),
        ))
    }
}

/// Stream `image` as JPEG at `quality` (1..=100). Alpha is dropped.
pub(crate) fn write_jpeg<W: Write>(
    out: W,
    image: &Image,
    quality: u8,
    stop: &dyn Stop,
) -> Result<(), EncodeError> {
    let quality = quality.clamp(1, 100);
    #[cfg(feature = "jpeg")]
    {
        imp::write(out, image, quality, stop)
    }
    #[cfg(not(feature = "jpeg"))]
    {
        let _ = (out, image, quality, stop);
        Err(EncodeError::Codec(
            "JPEG support not compiled in (enable the `jpeg` feature)".into(),
        ))
    }
}
