use crate::classify::{classify, PayloadKind};
use crate::dib::decode_dib;
use crate::error::FormatError;
use crate::image::{DecodedImage, ImagePayload};
use byteorder::{ByteOrder, LittleEndian};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

// Sizes of the ICONDIR header and of each ICONDIRENTRY, in bytes.
pub(crate) const HEADER_LEN: u64 = 6;
pub(crate) const ENTRY_LEN: u64 = 16;

// The image type field value for icons (2 would be cursors).
pub(crate) const ICON_TYPE: u16 = 1;

//===========================================================================//

/// The fixed 6-byte header at the start of an ICO file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDirectory {
    /// Should be zero; tolerated (with a warning) when it isn't.
    pub reserved: u16,
    /// Always 1 for icons.
    pub image_type: u16,
    /// The number of directory entries that follow the header.
    pub entry_count: u16,
}

impl IconDirectory {
    fn read(data: &[u8]) -> Result<IconDirectory, FormatError> {
        // Check the type before anything else, so that non-icon data is
        // always reported as such.
        ensure_len!(data, 4);
        let image_type = LittleEndian::read_u16(&data[2..4]);
        if image_type != ICON_TYPE {
            fail!(FormatError::NotAnIcon { image_type });
        }
        ensure_len!(data, HEADER_LEN);
        let reserved = LittleEndian::read_u16(&data[0..2]);
        if reserved != 0 {
            log::warn!(
                "Ignoring non-zero reserved field in ICONDIR ({})",
                reserved
            );
        }
        let entry_count = LittleEndian::read_u16(&data[4..6]);
        Ok(IconDirectory { reserved, image_type, entry_count })
    }
}

//===========================================================================//

/// One 16-byte ICONDIRENTRY record, with its width and height already
/// normalized (a stored zero means 256).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct DirectoryEntry {
    /// Width of the image, in pixels (1 to 256).
    pub width: u32,
    /// Height of the image, in pixels (1 to 256).
    pub height: u32,
    /// Number of palette colors, or zero.
    pub color_count: u8,
    /// Should be zero.
    pub reserved: u8,
    /// Number of color planes.
    pub color_planes: u16,
    /// Declared color depth.
    pub bits_per_pixel: u16,
    /// Length of the image data, in bytes.
    pub data_size: u32,
    /// Position of the image data from the start of the file.
    pub data_offset: u32,
}

impl DirectoryEntry {
    fn read(record: &[u8]) -> DirectoryEntry {
        debug_assert_eq!(record.len() as u64, ENTRY_LEN);
        // The ICONDIRENTRY stores each dimension in a single byte, where zero
        // stands for 256.
        let width_byte = record[0];
        let height_byte = record[1];
        DirectoryEntry {
            width: if width_byte == 0 { 256 } else { width_byte as u32 },
            height: if height_byte == 0 { 256 } else { height_byte as u32 },
            color_count: record[2],
            reserved: record[3],
            color_planes: LittleEndian::read_u16(&record[4..6]),
            bits_per_pixel: LittleEndian::read_u16(&record[6..8]),
            data_size: LittleEndian::read_u32(&record[8..12]),
            data_offset: LittleEndian::read_u32(&record[12..16]),
        }
    }

    /// Returns the position just past the end of the image data.
    pub fn data_end(&self) -> u64 {
        (self.data_offset as u64) + (self.data_size as u64)
    }
}

//===========================================================================//

/// A parsed ICO file: its header and entries, borrowing the file's bytes.
#[derive(Clone, Debug)]
pub struct IconDir<'a> {
    directory: IconDirectory,
    entries: Vec<IconDirEntry<'a>>,
}

impl<'a> IconDir<'a> {
    /// Parses the header and directory of an ICO file.  Every entry's data
    /// range is checked against `data` here, so later decoding never reads
    /// out of bounds.
    pub fn read(data: &'a [u8]) -> Result<IconDir<'a>, FormatError> {
        let directory = IconDirectory::read(data)?;
        let num_entries = directory.entry_count as u64;
        log::trace!("ICONDIR with {} entries", num_entries);
        ensure_len!(data, HEADER_LEN + ENTRY_LEN * num_entries);
        let mut entries = Vec::with_capacity(num_entries as usize);
        for record in data[HEADER_LEN as usize..]
            .chunks_exact(ENTRY_LEN as usize)
            .take(num_entries as usize)
        {
            let info = DirectoryEntry::read(record);
            log::trace!(
                "ICONDIRENTRY {}x{} bpp={} size={} offset={}",
                info.width,
                info.height,
                info.bits_per_pixel,
                info.data_size,
                info.data_offset
            );
            if info.reserved != 0 {
                log::warn!(
                    "Ignoring non-zero reserved field in ICONDIRENTRY ({})",
                    info.reserved
                );
            }
            ensure_len!(data, info.data_end());
            let start = info.data_offset as usize;
            let end = info.data_end() as usize;
            entries.push(IconDirEntry { info, data: &data[start..end] });
        }
        Ok(IconDir { directory, entries })
    }

    /// Returns the file header.
    pub fn directory(&self) -> &IconDirectory {
        &self.directory
    }

    /// Returns the entries, in file order.
    pub fn entries(&self) -> &[IconDirEntry<'a>] {
        &self.entries
    }

    /// Decodes every entry independently, returning one result per entry in
    /// file order.  A malformed entry does not affect the others.
    pub fn decode_entries(&self) -> Vec<Result<DecodedImage, FormatError>> {
        self.entries.iter().map(IconDirEntry::decode).collect()
    }
}

//===========================================================================//

/// One entry of a parsed ICO file: its directory record plus its raw data.
#[derive(Clone, Copy, Debug)]
pub struct IconDirEntry<'a> {
    info: DirectoryEntry,
    data: &'a [u8],
}

impl<'a> IconDirEntry<'a> {
    /// Returns the directory record for this entry.
    pub fn info(&self) -> &DirectoryEntry {
        &self.info
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.info.height
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns how the image data is encoded.
    pub fn kind(&self) -> PayloadKind {
        classify(self.data)
    }

    /// Returns true if the image is encoded as a PNG, or false if it is
    /// encoded as a bitmap.
    pub fn is_png(&self) -> bool {
        self.kind() == PayloadKind::Png
    }

    /// Decodes this entry into an owned image.  PNG data is copied through
    /// unchanged; bitmap data is converted to RGBA.
    pub fn decode(&self) -> Result<DecodedImage, FormatError> {
        let payload = match self.kind() {
            PayloadKind::Png => ImagePayload::Png(self.data.to_vec()),
            PayloadKind::Dib => ImagePayload::DecodedRgba(decode_dib(
                self.info.width,
                self.info.height,
                self.data,
            )?),
        };
        Ok(DecodedImage::new(
            self.info.width,
            self.info.height,
            self.info.bits_per_pixel,
            self.info.data_size,
            payload,
        ))
    }
}

//===========================================================================//


//===========================================================================//
