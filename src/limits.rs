use crate::error::DecodeError;
use crate::pixel::Color;

/// Caps on what a decoder will allocate. All fields default to `None`.
///
/// Checked after the header is parsed and before any pixel buffer exists.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum `width * height`.
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded [`crate::Image`] pixels.
    pub max_memory_bytes: Option<u64>,
}

fn exceeded(what: &str, value: impl core::fmt::Display, max: u64) -> DecodeError {
    DecodeError::LimitExceeded(format!("{what} {value} exceeds limit {max}"))
}

impl Limits {
    fn check_dimensions(&self, width: u32, height: u32) -> Result<(), DecodeError> {
        if let Some(max) = self.max_width
            && u64::from(width) > max
        {
            return Err(exceeded("width", width, max));
        }
        if let Some(max) = self.max_height
            && u64::from(height) > max
        {
            return Err(exceeded("height", height, max));
        }
        if let Some(max) = self.max_pixels {
            // u32 * u32 always fits in u64
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max {
                return Err(exceeded("pixel count", pixels, max));
            }
        }
        Ok(())
    }

    /// Size of a `width` x `height` [`crate::Image`] against `max_memory_bytes`.
    ///
    /// A size that does not fit in `u64` always exceeds the limit.
    fn check_memory(&self, width: u32, height: u32) -> Result<(), DecodeError> {
        let Some(max) = self.max_memory_bytes else {
            return Ok(());
        };
        let bytes = u64::from(width)
            .checked_mul(u64::from(height))
            .and_then(|px| px.checked_mul(core::mem::size_of::<Color>() as u64));
        match bytes {
            Some(bytes) if bytes <= max => Ok(()),
            Some(bytes) => Err(exceeded("allocation of", format_args!("{bytes} bytes"), max)),
            None => Err(exceeded(
                "allocation for",
                format_args!("{width}x{height} pixels"),
                max,
            )),
        }
    }
}

/// Run every limit for an image about to be allocated.
pub(crate) fn check_limits(
    limits: Option<&Limits>,
    width: u32,
    height: u32,
) -> Result<(), DecodeError> {
    if let Some(limits) = limits {
        limits.check_dimensions(width, height)?;
        limits.check_memory(width, height)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_everything() {
        assert!(check_limits(Some(&Limits::default()), u32::MAX, u32::MAX).is_ok());
        assert!(check_limits(None, u32::MAX, u32::MAX).is_ok());
    }

    #[test]
    fn pixel_and_memory_limits() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(check_limits(Some(&limits), 10, 10).is_ok());
        assert!(matches!(
            check_limits(Some(&limits), 10, 11),
            Err(DecodeError::LimitExceeded(_))
        ));

        let limits = Limits {
            max_memory_bytes: Some(16),
            ..Default::default()
        };
        // 4 bytes per Color
        assert!(check_limits(Some(&limits), 2, 2).is_ok());
        assert!(check_limits(Some(&limits), 3, 2).is_err());
    }

    #[test]
    fn memory_size_overflowing_u64_is_exceeded() {
        let limits = Limits {
            max_memory_bytes: Some(u64::MAX),
            ..Default::default()
        };
        // u32::MAX^2 * 4 does not fit in u64
        assert!(matches!(
            check_limits(Some(&limits), u32::MAX, u32::MAX),
            Err(DecodeError::LimitExceeded(_))
        ));
        // 2^31 * 2^31 * 4 = 2^64, one past u64::MAX; must not wrap to 0
        assert!(matches!(
            check_limits(Some(&limits), 1 << 31, 1 << 31),
            Err(DecodeError::LimitExceeded(_))
        ));
        // 2^31 * 2^30 * 4 = 2^63 fits
        assert!(check_limits(Some(&limits), 1 << 31, 1 << 30).is_ok());
    }
}
