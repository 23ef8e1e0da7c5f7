use crate::dibdepth::DibDepth;
use crate::error::{Dimension, FormatError};
use byteorder::{ByteOrder, LittleEndian};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

// The fields we read end with the bits-per-pixel word at offset 14.
const MIN_HEADER_LEN: u64 = 16;

//===========================================================================//

/// The leading fields of the BITMAPINFOHEADER that starts every legacy
/// (non-PNG) image inside an ICO file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct BitmapInfoHeader {
    /// Size of the header in bytes; the color plane starts right after it.
    pub header_size: u32,
    /// Width of the bitmap, in pixels.
    pub width: i32,
    /// Stored height, which counts the rows of both the color plane and the
    /// AND mask.
    pub height: i32,
    /// Color depth of the color plane.
    pub bits_per_pixel: u16,
}

impl BitmapInfoHeader {
    /// Reads the header fields from the start of a bitmap payload.
    pub fn read(data: &[u8]) -> Result<BitmapInfoHeader, FormatError> {
        ensure_len!(data, MIN_HEADER_LEN);
        Ok(BitmapInfoHeader {
            header_size: LittleEndian::read_u32(&data[0..4]),
            width: LittleEndian::read_i32(&data[4..8]),
            height: LittleEndian::read_i32(&data[8..12]),
            bits_per_pixel: LittleEndian::read_u16(&data[14..16]),
        })
    }

    /// Returns the visible height of the image, in pixels.
    pub fn image_height(&self) -> u32 {
        self.height.unsigned_abs() / 2
    }
}

//===========================================================================//

/// Returns the byte offset, relative to the start of a plane, of the row that
/// holds visible row `y` (counted from the top).  Bitmap planes store their
/// rows bottom-up, so row 0 of the plane is the last visible row.
pub fn row_offset(y: u32, row_size: usize, height: u32) -> usize {
    debug_assert!(y < height);
    ((height - 1 - y) as usize) * row_size
}

/// Size in bytes of one AND-mask row: one bit per pixel, padded to a 4-byte
/// boundary.
pub(crate) fn mask_row_size(width: u32) -> u64 {
    ((width as u64 + 31) / 32) * 4
}

//===========================================================================//

/// Decodes a legacy bitmap payload into top-to-bottom RGBA data of exactly
/// `4 * width * height` bytes.  The `width` and `height` are the (already
/// normalized) dimensions from the directory entry.
///
/// 32 bpp bitmaps take alpha from their fourth channel.  24 bpp bitmaps take
/// it from the 1-bit AND mask that follows the color plane: a set bit makes
/// the pixel fully transparent, a clear bit fully opaque.  Every offset is
/// checked against `data` before the output buffer is allocated.
pub fn decode_dib(
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<Vec<u8>, FormatError> {
    let header = BitmapInfoHeader::read(data)?;
    log::trace!(
        "DIB header: size={} width={} height={} bpp={}",
        header.header_size,
        header.width,
        header.height,
        header.bits_per_pixel
    );
    let depth = match DibDepth::from_bits_per_pixel(header.bits_per_pixel) {
        Some(depth) => depth,
        None => fail!(FormatError::UnsupportedBitDepth {
            bits_per_pixel: header.bits_per_pixel,
        }),
    };
    if header.width as i64 != width as i64 {
        fail!(FormatError::DimensionMismatch {
            dimension: Dimension::Width,
            expected: width as i64,
            found: header.width as i64,
        });
    }
    // The stored height covers the color plane plus the AND mask.
    let stored_height = header.height.unsigned_abs() as i64;
    if stored_height != 2 * (height as i64) {
        fail!(FormatError::DimensionMismatch {
            dimension: Dimension::Height,
            expected: 2 * (height as i64),
            found: stored_height,
        });
    }

    let pixel_offset = header.header_size as u64;
    let row_size = depth.row_size(width);
    let mask_offset =
        pixel_offset.saturating_add(row_size.saturating_mul(height as u64));
    let mask_row_size = mask_row_size(width);
    let end = if depth.uses_and_mask() {
        mask_offset
            .saturating_add(mask_row_size.saturating_mul(height as u64))
    } else {
        mask_offset
    };
    ensure_len!(data, end);

    // Everything below is in bounds: `end` fits within `data`.
    let pixel_offset = pixel_offset as usize;
    let row_size = row_size as usize;
    let mask_offset = mask_offset as usize;
    let mask_row_size = mask_row_size as usize;
    let bytes_per_pixel = depth.bytes_per_pixel();
    let width = width as usize;
    let mut rgba = vec![0u8; width * (height as usize) * 4];
    for y in 0..height {
        let row = &data[pixel_offset + row_offset(y, row_size, height)..]
            [..row_size];
        let mask = if depth.uses_and_mask() {
            &data[mask_offset + row_offset(y, mask_row_size, height)..]
                [..mask_row_size]
        } else {
            &[][..]
        };
        let out = &mut rgba[(y as usize) * width * 4..][..width * 4];
        for x in 0..width {
            let src = &row[x * bytes_per_pixel..][..bytes_per_pixel];
            let dst = &mut out[x * 4..][..4];
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = match depth {
                DibDepth::ThirtyTwo => src[3],
                DibDepth::TwentyFour => {
                    if ((mask[x / 8] >> (7 - (x % 8))) & 0x1) == 1 {
                        0
                    } else {
                        u8::MAX
                    }
                }
            };
        }
    }
    Ok(rgba)
}

//===========================================================================//


//===========================================================================//
