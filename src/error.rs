use std::io;
use thiserror::Error;

//===========================================================================//

/// Which dimension of a legacy bitmap disagreed with its directory entry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dimension {
    /// The horizontal size.
    Width,
    /// The vertical size.
    Height,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Dimension::Width => f.write_str("width"),
            Dimension::Height => f.write_str("height"),
        }
    }
}

//===========================================================================//

/// Errors produced while parsing or encoding an ICO container.
///
/// Each variant is a stable kind that callers can match on; the fields
/// carry the offending values for diagnostics.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The header's image type field is not 1 (icon).
    #[error("not an icon container (image type was {image_type}, but must be 1)")]
    NotAnIcon {
        /// The image type found at offset 2.
        image_type: u16,
    },

    /// A declared offset or size runs past the end of the available bytes.
    #[error("truncated data (needed {needed} bytes, but only {available} are available)")]
    Truncated {
        /// The number of bytes the structure requires.
        needed: u64,
        /// The number of bytes actually present.
        available: u64,
    },

    /// A legacy bitmap uses a color depth the decoder does not handle.
    #[error("unsupported bitmap depth ({bits_per_pixel} bits per pixel)")]
    UnsupportedBitDepth {
        /// The depth declared in the bitmap header.
        bits_per_pixel: u16,
    },

    /// An edge length handed to the encoder can't be stored in the directory.
    #[error("icon edge length {edge_length} is out of range (must be 1 to 65535)")]
    SizeOutOfRange {
        /// The rejected edge length.
        edge_length: u32,
    },

    /// A legacy bitmap's header disagrees with its directory entry.  Heights
    /// are reported in stored rows, which count the color plane and the AND
    /// mask, so they are twice the visible height.
    #[error("bitmap {dimension} mismatch (expected {expected}, but header says {found})")]
    DimensionMismatch {
        /// The dimension that disagrees.
        dimension: Dimension,
        /// The value implied by the directory entry.
        expected: i64,
        /// The value found in the bitmap header.
        found: i64,
    },

    /// More images were given to the encoder than the header can count.
    #[error("too many images ({count}, but the maximum is {})", u16::MAX)]
    TooManyImages {
        /// The number of images supplied.
        count: usize,
    },

    /// An image payload or its offset does not fit a 32-bit field.
    #[error("image payload does not fit in the container (ends at byte {end})")]
    PayloadTooLarge {
        /// The byte position where the payload would end.
        end: u64,
    },

    /// Encoding decoded pixels as PNG failed.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    /// The destination writer failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FormatError {
    pub(crate) fn truncated(needed: u64, available: usize) -> FormatError {
        FormatError::Truncated { needed, available: available as u64 }
    }
}

//===========================================================================//


//===========================================================================//
