#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

// The first four bytes of every PNG stream.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

//===========================================================================//

/// How an embedded image is encoded.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum PayloadKind {
    /// A complete PNG stream, forwarded unchanged.
    Png,
    /// A headerless device-independent bitmap followed by an AND mask.
    Dib,
}

/// Sniffs the first bytes of an entry's payload.  Anything that does not
/// start with the PNG signature, including payloads too short to hold it, is
/// treated as a bitmap.
pub fn classify(data: &[u8]) -> PayloadKind {
    if data.starts_with(PNG_SIGNATURE) {
        PayloadKind::Png
    } else {
        PayloadKind::Dib
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{classify, PayloadKind};

    #[test]
    fn png_signature() {
        let data = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";
        assert_eq!(classify(data), PayloadKind::Png);
        assert_eq!(classify(b"\x89PNG"), PayloadKind::Png);
    }

    #[test]
    fn bitmap_header() {
        let data = b"\x28\x00\x00\x00\x10\x00\x00\x00\x20\x00\x00\x00";
        assert_eq!(classify(data), PayloadKind::Dib);
    }

    #[test]
    fn short_payloads_are_bitmaps() {
        assert_eq!(classify(b""), PayloadKind::Dib);
        assert_eq!(classify(b"\x89"), PayloadKind::Dib);
        assert_eq!(classify(b"\x89PN"), PayloadKind::Dib);
    }
}

//===========================================================================//
