/// One RGBA pixel, 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black `(0, 0, 0, 255)`.
    pub const BLACK: Color = Color::opaque(0, 0, 0);
    /// Opaque white `(255, 255, 255, 255)`.
    pub const WHITE: Color = Color::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color with alpha 255.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build from bytes in B, G, R order (BMP pixel order), alpha 255.
    #[inline]
    pub(crate) const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self::opaque(bgr[2], bgr[1], bgr[0])
    }

    #[inline]
    pub(crate) const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGBA8> for Color {
    fn from(px: rgb::RGBA8) -> Self {
        Color::new(px.r, px.g, px.b, px.a)
    }
}

#[cfg(feature = "rgb")]
impl From<Color> for rgb::RGBA8 {
    fn from(c: Color) -> Self {
        rgb::RGBA8::new(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_constants() {
        assert_eq!(Color::BLACK, Color::new(0, 0, 0, 255));
        assert_eq!(Color::WHITE, Color::new(255, 255, 255, 255));
    }

    #[test]
    fn bgr_swizzle() {
        let c = Color::from_bgr([1, 2, 3]);
        assert_eq!(c, Color::new(3, 2, 1, 255));
        assert_eq!(c.to_bgr(), [1, 2, 3]);
    }
}
