use crate::error::FormatError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::Write;

//===========================================================================//

/// The pixel content of a decoded image.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ImagePayload {
    /// The entry was already a PNG stream; these are its bytes, verbatim.
    Png(Vec<u8>),
    /// The entry was a legacy bitmap; this is straight RGBA data in row-major
    /// order from top to bottom.
    DecodedRgba(Vec<u8>),
}

//===========================================================================//

/// One image extracted from an ICO container.  Owns all of its bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct DecodedImage {
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    byte_size: u32,
    payload: ImagePayload,
}

impl DecodedImage {
    pub(crate) fn new(
        width: u32,
        height: u32,
        bits_per_pixel: u16,
        byte_size: u32,
        payload: ImagePayload,
    ) -> DecodedImage {
        if let ImagePayload::DecodedRgba(ref rgba) = payload {
            debug_assert_eq!(
                rgba.len() as u64,
                (width as u64) * (height as u64) * 4
            );
        }
        DecodedImage { width, height, bits_per_pixel, byte_size, payload }
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bits-per-pixel declared by the image's directory entry.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the size of the entry's encoded data within the container.
    pub fn byte_size(&self) -> u32 {
        self.byte_size
    }

    /// Returns the image's pixel content.
    pub fn payload(&self) -> &ImagePayload {
        &self.payload
    }

    /// Consumes the image, returning its pixel content.
    pub fn into_payload(self) -> ImagePayload {
        self.payload
    }

    /// Returns true if the entry was stored as a PNG stream.
    pub fn is_png(&self) -> bool {
        matches!(self.payload, ImagePayload::Png(_))
    }

    /// Returns the original PNG bytes, or `None` for a decoded bitmap.
    pub fn png_data(&self) -> Option<&[u8]> {
        match self.payload {
            ImagePayload::Png(ref data) => Some(data),
            ImagePayload::DecodedRgba(_) => None,
        }
    }

    /// Returns the RGBA data, or `None` if the entry was stored as a PNG.
    pub fn rgba_data(&self) -> Option<&[u8]> {
        match self.payload {
            ImagePayload::Png(_) => None,
            ImagePayload::DecodedRgba(ref rgba) => Some(rgba),
        }
    }

    /// Returns the image as a PNG stream.  PNG entries are returned
    /// unchanged; decoded bitmaps are encoded as 8-bit RGBA.
    pub fn to_png(&self) -> Result<Vec<u8>, FormatError> {
        match self.payload {
            ImagePayload::Png(ref data) => Ok(data.clone()),
            ImagePayload::DecodedRgba(ref rgba) => {
                encode_rgba_png(self.width, self.height, rgba)
            }
        }
    }

    /// Writes the image out as a PNG stream (see `to_png`).
    pub fn write_png<W: Write>(
        &self,
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.payload {
            ImagePayload::Png(ref data) => writer.write_all(data)?,
            ImagePayload::DecodedRgba(ref rgba) => {
                write_rgba_png(self.width, self.height, rgba, writer)?
            }
        }
        Ok(())
    }

    /// Returns the conventional file name for saving this image on its own,
    /// e.g. `icon_32x32.png`.
    pub fn file_name(&self) -> String {
        format!("icon_{}x{}.png", self.width, self.height)
    }
}

//===========================================================================//

/// Encodes RGBA data (row-major, top to bottom) as an 8-bit RGBA PNG stream,
/// suitable as a payload for `encode_ico`.
pub fn encode_rgba_png(
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<Vec<u8>, FormatError> {
    let mut data = Vec::new();
    write_rgba_png(width, height, rgba, &mut data)?;
    Ok(data)
}

fn write_rgba_png<W: Write>(
    width: u32,
    height: u32,
    rgba: &[u8],
    writer: W,
) -> Result<(), FormatError> {
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_color(png::ColorType::Rgba);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;
    Ok(())
}

//===========================================================================//


//===========================================================================//
