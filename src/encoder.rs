use crate::error::FormatError;
use crate::icondir::{ENTRY_LEN, HEADER_LEN, ICON_TYPE};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

//===========================================================================//

// Edge lengths must be representable, even if only as the 0-means-256 byte.
const MIN_EDGE_LENGTH: u32 = 1;
const MAX_EDGE_LENGTH: u32 = u16::MAX as u32;

// Every image the encoder writes is a 32-bit RGBA PNG.
const COLOR_PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;

//===========================================================================//

/// Builds an ICO file out of square, already PNG-encoded images.  Images are
/// written in the order they are added; the encoder never sorts them.
#[derive(Clone, Debug, Default)]
pub struct IconEncoder {
    images: Vec<(u32, Vec<u8>)>,
}

impl IconEncoder {
    /// Creates a new, empty encoder.
    pub fn new() -> IconEncoder {
        IconEncoder { images: Vec::new() }
    }

    /// Appends a square PNG image with the given edge length, in pixels.
    pub fn add_png(&mut self, edge_length: u32, png_data: Vec<u8>) {
        self.images.push((edge_length, png_data));
    }

    /// Returns the number of images added so far.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if no images have been added.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Validates every image and computes each one's data offset.  Nothing
    /// is written unless the whole set can be represented.
    fn layout(&self) -> Result<Vec<u32>, FormatError> {
        if self.images.len() > (u16::MAX as usize) {
            fail!(FormatError::TooManyImages { count: self.images.len() });
        }
        let mut offsets = Vec::with_capacity(self.images.len());
        let mut data_offset =
            HEADER_LEN + ENTRY_LEN * (self.images.len() as u64);
        for &(edge_length, ref png_data) in self.images.iter() {
            if !(MIN_EDGE_LENGTH..=MAX_EDGE_LENGTH).contains(&edge_length) {
                fail!(FormatError::SizeOutOfRange { edge_length });
            }
            let end = data_offset + png_data.len() as u64;
            if end > u32::MAX as u64 {
                fail!(FormatError::PayloadTooLarge { end });
            }
            offsets.push(data_offset as u32);
            data_offset = end;
        }
        Ok(offsets)
    }

    /// Writes the ICO file out.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<(), FormatError> {
        let offsets = self.layout()?;
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(ICON_TYPE)?;
        writer.write_u16::<LittleEndian>(self.images.len() as u16)?;
        for (&(edge_length, ref png_data), &data_offset) in
            self.images.iter().zip(offsets.iter())
        {
            // A width/height byte of zero indicates a size of 256 or more.
            let size_byte =
                if edge_length > 255 { 0 } else { edge_length as u8 };
            writer.write_u8(size_byte)?; // width
            writer.write_u8(size_byte)?; // height
            writer.write_u8(0)?; // color count
            writer.write_u8(0)?; // reserved
            writer.write_u16::<LittleEndian>(COLOR_PLANES)?;
            writer.write_u16::<LittleEndian>(BITS_PER_PIXEL)?;
            writer.write_u32::<LittleEndian>(png_data.len() as u32)?;
            writer.write_u32::<LittleEndian>(data_offset)?;
        }
        for (_, png_data) in self.images.iter() {
            writer.write_all(png_data)?;
        }
        Ok(())
    }

    /// Encodes the ICO file into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        let payload_len: usize =
            self.images.iter().map(|(_, data)| data.len()).sum();
        let mut output = Vec::with_capacity(
            (HEADER_LEN + ENTRY_LEN * self.images.len() as u64) as usize
                + payload_len,
        );
        self.write(&mut output)?;
        Ok(output)
    }
}

impl FromIterator<(u32, Vec<u8>)> for IconEncoder {
    fn from_iter<I: IntoIterator<Item = (u32, Vec<u8>)>>(
        iter: I,
    ) -> IconEncoder {
        IconEncoder { images: iter.into_iter().collect() }
    }
}

//===========================================================================//


//===========================================================================//
