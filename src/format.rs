//! The closed set of supported formats and extension-based dispatch.

use std::path::Path;

use enough::Unstoppable;

use crate::buffer::Image;
use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::{ConvertError, DecodeError, EncodeError, Side};

/// A container format with a load/save codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Binary PPM (P6).
    Ppm,
    /// JPEG (delegated to the `image` crate).
    Jpeg,
    /// 24-bit uncompressed Windows bitmap.
    Bmp,
}

impl Format {
    /// File extensions (without the dot) this format is known by.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Ppm => &["ppm"],
            Format::Jpeg => &["jpg", "jpeg"],
            Format::Bmp => &["bmp"],
        }
    }

    /// Exact, case-sensitive extension match (`"JPG"` is not `"jpg"`).
    pub fn from_extension(ext: &str) -> Option<Format> {
        [Format::Ppm, Format::Jpeg, Format::Bmp]
            .into_iter()
            .find(|f| f.extensions().contains(&ext))
    }

    /// Read and decode `path`.
    pub fn try_load(self, path: impl AsRef<Path>) -> Result<Image, DecodeError> {
        let data = std::fs::read(path)?;
        DecodeRequest::new(self, &data).decode(Unstoppable)
    }

    /// Encode `image` into `path` with default settings.
    pub fn try_save(self, path: impl AsRef<Path>, image: &Image) -> Result<(), EncodeError> {
        EncodeRequest::new(self).save(path, image, Unstoppable)
    }

    /// Sentinel-style load: the empty image on any failure.
    ///
    /// The cause is logged at `warn` level and otherwise discarded; use
    /// [`Format::try_load`] to get it.
    pub fn load(self, path: impl AsRef<Path>) -> Image {
        let path = path.as_ref();
        match self.try_load(path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("{self:?} load of {} failed: {e}", path.display());
                Image::empty()
            }
        }
    }

    /// Sentinel-style save: `true` on success.
    ///
    /// The cause of a failure is logged at `warn` level and otherwise
    /// discarded; use [`Format::try_save`] to get it.
    pub fn save(self, path: impl AsRef<Path>, image: &Image) -> bool {
        let path = path.as_ref();
        match self.try_save(path, image) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{self:?} save to {} failed: {e}", path.display());
                false
            }
        }
    }
}

/// Maps file extensions to formats.
///
/// The default table knows `.ppm`, `.jpg` and `.jpeg`. BMP is always
/// available through [`Format::Bmp`] directly; [`Dispatcher::with_bmp`]
/// additionally routes `.bmp` paths to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatcher {
    bmp: bool,
}

impl Dispatcher {
    /// The default table plus `.bmp`.
    pub fn with_bmp() -> Self {
        Self { bmp: true }
    }

    /// Format for `path`'s extension, if any.
    pub fn format_for(&self, path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        match Format::from_extension(ext)? {
            Format::Bmp if !self.bmp => None,
            f => Some(f),
        }
    }

    /// Like [`Dispatcher::format_for`], but reports which side failed.
    pub fn resolve(&self, path: &Path, side: Side) -> Result<Format, ConvertError> {
        let format = self
            .format_for(path)
            .ok_or_else(|| ConvertError::FormatUnknown {
                side,
                path: path.to_path_buf(),
            })?;
        log::debug!("{side} {} resolved to {format:?}", path.display());
        Ok(format)
    }
}
