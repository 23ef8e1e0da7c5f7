//! A codec for Windows ICO icon containers.
//!
//! Decoding splits a container into its images.  Entries stored as PNG
//! streams are passed through byte-for-byte; legacy bitmap entries are
//! converted to straight RGBA, with transparency recovered from the AND mask
//! for 24-bit bitmaps.  Encoding packs a list of square PNG images into a new
//! container, in the order given.
//!
//! ```no_run
//! let bytes = std::fs::read("app.ico").unwrap();
//! for image in icoset::parse_ico(&bytes).unwrap() {
//!     println!("{}x{} png={}", image.width(), image.height(), image.is_png());
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod classify;
mod dib;
mod dibdepth;
mod encoder;
mod error;
mod icondir;
mod image;

pub use crate::classify::{classify, PayloadKind};
pub use crate::dib::{decode_dib, row_offset, BitmapInfoHeader};
pub use crate::encoder::IconEncoder;
pub use crate::error::{Dimension, FormatError};
pub use crate::icondir::{
    DirectoryEntry, IconDir, IconDirEntry, IconDirectory,
};
pub use crate::image::{encode_rgba_png, DecodedImage, ImagePayload};

//===========================================================================//

/// What `parse_ico_with` does when one entry of a container fails to decode.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DecodePolicy {
    /// Fail the whole container with the first entry's error.
    #[default]
    FailFast,
    /// Log the failure, drop that entry, and keep the others.
    SkipInvalid,
}

//===========================================================================//

/// Decodes every image in an ICO file, failing if any entry is malformed.
pub fn parse_ico(data: &[u8]) -> Result<Vec<DecodedImage>, FormatError> {
    parse_ico_with(data, DecodePolicy::FailFast)
}

/// Decodes every image in an ICO file, handling malformed entries according
/// to `policy`.  Errors in the header or directory always fail the call.
pub fn parse_ico_with(
    data: &[u8],
    policy: DecodePolicy,
) -> Result<Vec<DecodedImage>, FormatError> {
    let icondir = IconDir::read(data)?;
    let mut images = Vec::with_capacity(icondir.entries().len());
    for (index, entry) in icondir.entries().iter().enumerate() {
        match entry.decode() {
            Ok(image) => images.push(image),
            Err(error) => match policy {
                DecodePolicy::FailFast => return Err(error),
                DecodePolicy::SkipInvalid => {
                    log::warn!(
                        "Skipping ICO entry {} ({}x{}): {}",
                        index,
                        entry.width(),
                        entry.height(),
                        error
                    );
                }
            },
        }
    }
    Ok(images)
}

/// Encodes square PNG images, given as `(edge_length, png_data)` pairs, into
/// an ICO file.  The directory lists them in the order given.
pub fn encode_ico(
    images: Vec<(u32, Vec<u8>)>,
) -> Result<Vec<u8>, FormatError> {
    images.into_iter().collect::<IconEncoder>().to_bytes()
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{encode_ico, parse_ico, parse_ico_with, DecodePolicy};
    use crate::error::FormatError;

    // The middle payload lacks the PNG signature, so it is read as a bitmap
    // whose header is cut short.
    fn container_with_bad_entry() -> Vec<u8> {
        encode_ico(vec![
            (16, b"\x89PNG-sixteen".to_vec()),
            (32, b"\x28\x00".to_vec()),
            (48, b"\x89PNG-forty-eight".to_vec()),
        ])
        .unwrap()
    }

    #[test]
    fn fail_fast_reports_first_error() {
        let data = container_with_bad_entry();
        match parse_ico(&data) {
            Err(FormatError::Truncated { needed: 16, available: 2 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn skip_invalid_keeps_good_entries() {
        let data = container_with_bad_entry();
        let images =
            parse_ico_with(&data, DecodePolicy::SkipInvalid).unwrap();
        let sizes: Vec<u32> =
            images.iter().map(|image| image.width()).collect();
        assert_eq!(sizes, vec![16, 48]);
        assert_eq!(images[1].png_data(), Some(&b"\x89PNG-forty-eight"[..]));
    }

    #[test]
    fn default_policy_is_fail_fast() {
        assert_eq!(DecodePolicy::default(), DecodePolicy::FailFast);
    }

    #[test]
    fn directory_errors_fail_either_policy() {
        let data = b"\x00\x00\x01\x00\x01\x00";
        for &policy in &[DecodePolicy::FailFast, DecodePolicy::SkipInvalid] {
            assert!(matches!(
                parse_ico_with(data, policy),
                Err(FormatError::Truncated { needed: 22, available: 6 })
            ));
        }
    }
}

//===========================================================================//
