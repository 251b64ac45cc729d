use crate::pixel::Color;

/// An owned, row-major grid of [`Color`] values.
///
/// Row stride equals `width`; there is no padding between rows. The
/// zero-sized image (`0x0`) is the *empty* sentinel that sentinel-style
/// loaders return on failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    /// Create a `width` x `height` image filled with `fill`.
    ///
    /// If either dimension is zero the empty image is returned.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// The `0x0` sentinel.
    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Whether this is the `0x0` sentinel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row `y`, `width` pixels long.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    pub fn line(&self, y: u32) -> &[Color] {
        let range = self.row_range(y);
        &self.pixels[range]
    }

    /// Mutable row `y`.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    pub fn line_mut(&mut self, y: u32) -> &mut [Color] {
        let range = self.row_range(y);
        &mut self.pixels[range]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Color]> + '_ {
        // chunks_exact(0) panics, and the empty image has no rows anyway
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    fn row_range(&self, y: u32) -> core::ops::Range<usize> {
        assert!(
            y < self.height,
            "row {y} out of range for image of height {}",
            self.height
        );
        let w = self.width as usize;
        let start = y as usize * w;
        start..start + w
    }

    /// Copy into an [`imgref::ImgVec`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.pixels.iter().map(|&c| c.into()).collect(),
            self.width as usize,
            self.height as usize,
        )
    }

    /// Build from any [`imgref::ImgRef`] of RGBA8 pixels (stride is honored).
    ///
    /// Returns the empty image if the width or height do not fit in `u32`.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGBA8>) -> Self {
        let (Ok(width), Ok(height)) = (u32::try_from(img.width()), u32::try_from(img.height()))
        else {
            return Self::empty();
        };
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            width,
            height,
            pixels: img.pixels().map(Color::from).collect(),
        }
    }
}
