//! # zenconvert
//!
//! Raster image conversion between BMP, PPM and JPEG, built around a
//! byte-exact 24-bit BMP codec.
//!
//! ## Supported Formats
//!
//! - **BMP**: 24-bit uncompressed, `BITMAPINFOHEADER`. Bottom-up and
//!   top-down files decode; the encoder always writes bottom-up.
//! - **PPM**: binary P6, maxval up to 255.
//! - **JPEG** (`jpeg` feature, on by default): delegated to the `image` crate.
//!
//! Every format decodes into the same [`Image`] of RGBA [`Color`]s and
//! encodes from it. Alpha is not stored by any of them and comes back as 255.
//!
//! ## Two API styles
//!
//! The `try_*` functions, [`DecodeRequest`], [`EncodeRequest`] and
//! [`ConvertRequest`] return a `Result` carrying the specific failure.
//! The plain `load_*` / `save_*` functions and [`Format::load`] /
//! [`Format::save`] keep the sentinel contract instead: an empty `0x0`
//! [`Image`] or `false` on failure, with the cause logged through `log`.
//!
//! ## Non-Goals
//!
//! - Palette, 16/32-bit, RLE or bitfield BMPs
//! - Streaming or partial decode
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use zenconvert::{Color, Format, Image, Unstoppable};
//!
//! let mut image = Image::new(2, 1, Color::BLACK);
//! image.line_mut(0)[1] = Color::WHITE;
//!
//! let bytes = zenconvert::encode_bmp(&image, Unstoppable)?;
//! let back = zenconvert::decode_bmp(&bytes, Unstoppable)?;
//! assert_eq!(back, image);
//!
//! // Sentinel style
//! let loaded = Format::Ppm.load("input.ppm");
//! if !loaded.is_empty() && zenconvert::save_bmp("output.bmp", &loaded) {
//!     println!("converted");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod buffer;
mod convert;
mod decode;
mod encode;
mod error;
mod format;
mod jpeg;
mod limits;
mod pixel;
mod pnm;

use std::io::Write;
use std::path::Path;

// Re-exports
pub use buffer::Image;
pub use convert::ConvertRequest;
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{ConvertError, DecodeError, EncodeError, Side};
pub use format::{Dispatcher, Format};
pub use jpeg::DEFAULT_JPEG_QUALITY;
pub use limits::Limits;
pub use pixel::Color;

// ── BMP ──────────────────────────────────────────────────────────────

/// Decode an in-memory 24-bit BMP.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Image, DecodeError> {
    bmp::decode(data, None, &stop)
}

/// Encode `image` as a 24-bit bottom-up BMP.
pub fn encode_bmp(image: &Image, stop: impl Stop) -> Result<Vec<u8>, EncodeError> {
    bmp::encode(image, &stop)
}

/// Stream `image` as BMP into `out`.
pub fn write_bmp<W: Write>(out: W, image: &Image, stop: impl Stop) -> Result<(), EncodeError> {
    bmp::write(out, image, &stop)
}

pub fn try_load_bmp(path: impl AsRef<Path>) -> Result<Image, DecodeError> {
    Format::Bmp.try_load(path)
}

pub fn try_save_bmp(path: impl AsRef<Path>, image: &Image) -> Result<(), EncodeError> {
    Format::Bmp.try_save(path, image)
}

/// Load a BMP file; the empty image on any failure.
pub fn load_bmp(path: impl AsRef<Path>) -> Image {
    Format::Bmp.load(path)
}

/// Save as BMP; `false` on any failure. A partial file may remain.
pub fn save_bmp(path: impl AsRef<Path>, image: &Image) -> bool {
    Format::Bmp.save(path, image)
}

// ── PPM ──────────────────────────────────────────────────────────────

/// Decode an in-memory binary PPM.
pub fn decode_ppm(data: &[u8], stop: impl Stop) -> Result<Image, DecodeError> {
    pnm::decode(data, None, &stop)
}

/// Encode `image` as binary PPM (maxval 255).
pub fn encode_ppm(image: &Image, stop: impl Stop) -> Result<Vec<u8>, EncodeError> {
    pnm::encode(image, &stop)
}

pub fn try_load_ppm(path: impl AsRef<Path>) -> Result<Image, DecodeError> {
    Format::Ppm.try_load(path)
}

pub fn try_save_ppm(path: impl AsRef<Path>, image: &Image) -> Result<(), EncodeError> {
    Format::Ppm.try_save(path, image)
}

pub fn load_ppm(path: impl AsRef<Path>) -> Image {
    Format::Ppm.load(path)
}

pub fn save_ppm(path: impl AsRef<Path>, image: &Image) -> bool {
    Format::Ppm.save(path, image)
}

// ── JPEG ─────────────────────────────────────────────────────────────

pub fn decode_jpeg(data: &[u8], stop: impl Stop) -> Result<Image, DecodeError> {
    jpeg::decode_jpeg(data, None, &stop)
}

pub fn encode_jpeg(image: &Image, quality: u8, stop: impl Stop) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    jpeg::write_jpeg(&mut out, image, quality, &stop)?;
    Ok(out)
}

pub fn try_load_jpeg(path: impl AsRef<Path>) -> Result<Image, DecodeError> {
    Format::Jpeg.try_load(path)
}

pub fn try_save_jpeg(path: impl AsRef<Path>, image: &Image) -> Result<(), EncodeError> {
    Format::Jpeg.try_save(path, image)
}

pub fn load_jpeg(path: impl AsRef<Path>) -> Image {
    Format::Jpeg.load(path)
}

pub fn save_jpeg(path: impl AsRef<Path>, image: &Image) -> bool {
    Format::Jpeg.save(path, image)
}
