//===========================================================================//

/// The color depths the legacy bitmap decoder understands.  Palette-based
/// depths (1, 4 and 8 bpp) and 16 bpp are deliberately absent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DibDepth {
    TwentyFour,
    ThirtyTwo,
}

impl DibDepth {
    pub(crate) fn from_bits_per_pixel(
        bits_per_pixel: u16,
    ) -> Option<DibDepth> {
        match bits_per_pixel {
            24 => Some(DibDepth::TwentyFour),
            32 => Some(DibDepth::ThirtyTwo),
            _ => None,
        }
    }

    pub(crate) fn bits_per_pixel(&self) -> u16 {
        match *self {
            DibDepth::TwentyFour => 24,
            DibDepth::ThirtyTwo => 32,
        }
    }

    pub(crate) fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel() / 8) as usize
    }

    /// True if transparency comes from the AND mask rather than from a
    /// fourth channel in the color plane.
    pub(crate) fn uses_and_mask(&self) -> bool {
        *self == DibDepth::TwentyFour
    }

    /// Size in bytes of one color-plane row, padded to a 4-byte boundary.
    pub(crate) fn row_size(&self, width: u32) -> u64 {
        let bits = (width as u64) * (self.bits_per_pixel() as u64);
        ((bits + 31) / 32) * 4
    }
}

//===========================================================================//


//===========================================================================//
