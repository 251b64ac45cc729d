//! BITMAPFILEHEADER / BITMAPINFOHEADER wire codec.
//!
//! Each field is read and written individually, little-endian, at its fixed
//! offset. Nothing here depends on the in-memory layout of the structs.

/// `"BM"` read as a little-endian u16.
pub(crate) const MAGIC: u16 = 0x4D42;

/// 14-byte file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FileHeader {
    pub magic: u16,
    pub file_size: u32,
    pub reserved: u32,
    pub pixel_data_offset: u32,
}

/// 40-byte DIB header (BITMAPINFOHEADER).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive = rows stored bottom-up, negative = top-down.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_data_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// Both headers, back to back.
pub(crate) const HEADERS_SIZE: usize = FileHeader::SIZE + InfoHeader::SIZE;

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn i32_at(b: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

impl FileHeader {
    pub const SIZE: usize = 14;

    pub fn from_bytes(b: &[u8; Self::SIZE]) -> Self {
        Self {
            magic: u16_at(b, 0),
            file_size: u32_at(b, 2),
            reserved: u32_at(b, 6),
            pixel_data_offset: u32_at(b, 10),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut a = [0u8; Self::SIZE];
        a[0..2].copy_from_slice(&self.magic.to_le_bytes());
        a[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        a[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        a[10..14].copy_from_slice(&self.pixel_data_offset.to_le_bytes());
        a
    }
}

impl InfoHeader {
    pub const SIZE: usize = 40;

    pub fn from_bytes(b: &[u8; Self::SIZE]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: i32_at(b, 4),
            height: i32_at(b, 8),
            planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_data_size: u32_at(b, 20),
            x_pixels_per_meter: i32_at(b, 24),
            y_pixels_per_meter: i32_at(b, 28),
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut a = [0u8; Self::SIZE];
        a[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        a[4..8].copy_from_slice(&self.width.to_le_bytes());
        a[8..12].copy_from_slice(&self.height.to_le_bytes());
        a[12..14].copy_from_slice(&self.planes.to_le_bytes());
        a[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        a[16..20].copy_from_slice(&self.compression.to_le_bytes());
        a[20..24].copy_from_slice(&self.image_data_size.to_le_bytes());
        a[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        a[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        a[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        a[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        a
    }
}

/// Split the two headers off the front of `data`.
///
/// Returns `None` if fewer than 54 bytes are available.
pub(crate) fn read_headers(data: &[u8]) -> Option<(FileHeader, InfoHeader)> {
    let file: &[u8; FileHeader::SIZE] = data.get(..FileHeader::SIZE)?.try_into().ok()?;
    let info: &[u8; InfoHeader::SIZE] =
        data.get(FileHeader::SIZE..HEADERS_SIZE)?.try_into().ok()?;
    Some((FileHeader::from_bytes(file), InfoHeader::from_bytes(info)))
}

/// Bytes per file row for 24-bit pixels: `width * 3` rounded up to a multiple of 4.
pub(crate) fn row_stride(width: usize) -> Option<usize> {
    width
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}
