use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use enough::Stop;

use crate::buffer::Image;
use crate::error::EncodeError;
use crate::format::Format;
use crate::jpeg::DEFAULT_JPEG_QUALITY;

/// Encode an [`Image`] into a chosen [`Format`].
///
/// ```no_run
/// use zenconvert::{Color, EncodeRequest, Format, Image, Unstoppable};
///
/// let image = Image::new(4, 4, Color::WHITE);
/// let bmp = EncodeRequest::new(Format::Bmp).encode(&image, Unstoppable)?;
/// assert_eq!(&bmp[..2], b"BM");
/// EncodeRequest::new(Format::Jpeg)
///     .with_jpeg_quality(80)
///     .save("white.jpg", &image, Unstoppable)?;
/// # Ok::<(), zenconvert::EncodeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    format: Format,
    jpeg_quality: u8,
}

impl EncodeRequest {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// JPEG quality, clamped to 1..=100. Ignored by other formats.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Encode into a new buffer.
    pub fn encode(&self, image: &Image, stop: impl Stop) -> Result<Vec<u8>, EncodeError> {
        match self.format {
            Format::Bmp => crate::bmp::encode(image, &stop),
            Format::Ppm => crate::pnm::encode(image, &stop),
            Format::Jpeg => {
                let mut out = Vec::new();
                crate::jpeg::write_jpeg(&mut out, image, self.jpeg_quality, &stop)?;
                Ok(out)
            }
        }
    }

    /// Stream into `out`. On failure, whatever was already written stays written.
    pub fn write_to<W: Write>(
        &self,
        out: W,
        image: &Image,
        stop: impl Stop,
    ) -> Result<(), EncodeError> {
        self.write_dyn(out, image, &stop)
    }

    /// Create (or truncate) `path` and stream the encoded image into it.
    ///
    /// Not atomic: a failure part-way leaves a partial file behind. An empty
    /// image is rejected before the file is touched.
    pub fn save(
        &self,
        path: impl AsRef<Path>,
        image: &Image,
        stop: impl Stop,
    ) -> Result<(), EncodeError> {
        self.save_dyn(path.as_ref(), image, &stop)
    }

    pub(crate) fn save_dyn(
        &self,
        path: &Path,
        image: &Image,
        stop: &dyn Stop,
    ) -> Result<(), EncodeError> {
        if image.is_empty() {
            return Err(EncodeError::InvalidDimensions {
                width: image.width(),
                height: image.height(),
            });
        }
        let file = File::create(path)?;
        self.write_dyn(BufWriter::new(file), image, stop)
    }

    fn write_dyn<W: Write>(
        &self,
        out: W,
        image: &Image,
        stop: &dyn Stop,
    ) -> Result<(), EncodeError> {
        match self.format {
            Format::Bmp => crate::bmp::write(out, image, stop),
            Format::Ppm => crate::pnm::write(out, image, stop),
            Format::Jpeg => crate::jpeg::write_jpeg(out, image, self.jpeg_quality, stop),
        }
    }
}
