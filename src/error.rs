use std::path::PathBuf;

use enough::StopReason;

/// Errors from decoding an image (BMP, PPM or JPEG).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid BMP magic bytes (expected \"BM\")")]
    InvalidMagic,

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("unexpected end of input")]
    Truncated,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for DecodeError {
    fn from(r: StopReason) -> Self {
        DecodeError::Cancelled(r)
    }
}

/// Errors from encoding an image.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("cannot encode an image of {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for EncodeError {
    fn from(r: StopReason) -> Self {
        EncodeError::Cancelled(r)
    }
}

/// Which path of a conversion an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Input,
    Output,
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Side::Input => f.write_str("input"),
            Side::Output => f.write_str("output"),
        }
    }
}

/// Errors from a whole input-to-output conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("unknown format of the {side} file: {}", path.display())]
    FormatUnknown { side: Side, path: PathBuf },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
}

impl ConvertError {
    /// Process exit code for this failure.
    ///
    /// `2` for an unknown input format, `3` for an unknown output format,
    /// `1` for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::FormatUnknown {
                side: Side::Input, ..
            } => 2,
            ConvertError::FormatUnknown {
                side: Side::Output,
                ..
            } => 3,
            ConvertError::Decode { .. } | ConvertError::Encode { .. } => 1,
        }
    }
}
