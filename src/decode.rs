use enough::Stop;

use crate::buffer::Image;
use crate::error::DecodeError;
use crate::format::Format;
use crate::limits::Limits;

/// Decode an in-memory file of a known [`Format`].
///
/// ```no_run
/// use zenconvert::{DecodeRequest, Format, Limits, Unstoppable};
///
/// let data = std::fs::read("photo.bmp")?;
/// let limits = Limits { max_pixels: Some(64 << 20), ..Default::default() };
/// let image = DecodeRequest::new(Format::Bmp, &data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{}", image.width(), image.height());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    format: Format,
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(format: Format, data: &'a [u8]) -> Self {
        Self {
            format,
            data,
            limits: None,
        }
    }

    /// Reject images larger than `limits` before allocating pixels.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Image, DecodeError> {
        self.decode_dyn(&stop)
    }

    pub(crate) fn decode_dyn(self, stop: &dyn Stop) -> Result<Image, DecodeError> {
        match self.format {
            Format::Bmp => crate::bmp::decode(self.data, self.limits, stop),
            Format::Ppm => crate::pnm::decode(self.data, self.limits, stop),
            Format::Jpeg => crate::jpeg::decode_jpeg(self.data, self.limits, stop),
        }
    }
}
