//! Binary PPM (P6) decoder and encoder (internal).
//!
//! Use top-level [`crate::decode_ppm`], [`crate::encode_ppm`], etc.
//!
//! Credits: header tokenizer draws from zune-ppm by Caleb Etemesi
//! (MIT/Apache-2.0/Zlib licensed).

mod decode;
mod encode;

pub(crate) use decode::decode_ppm as decode;
pub(crate) use encode::{encode_ppm as encode, write_ppm as write};
