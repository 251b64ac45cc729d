//! 24-bit uncompressed BMP decoder and encoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.
//!
//! Wire format: 14-byte file header, 40-byte info header, little-endian
//! fields, BGR pixel rows padded to a multiple of 4 bytes. A positive
//! height stores rows bottom-up, a negative one top-down. The encoder
//! always writes bottom-up.

mod decode;
mod encode;
mod header;

pub(crate) use decode::decode_bmp as decode;
pub(crate) use encode::{encode_bmp as encode, write_bmp as write};
