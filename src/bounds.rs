use crate::color::Rgb;

/// Bounds of a rendering area within one strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingBounds {
    pub start: u8,
    pub end: u8,
}

impl RenderingBounds {
    /// Bounds covering a whole strip of `len` LEDs
    pub const fn whole(len: u8) -> Self {
        Self { start: 0, end: len }
    }

    /// First half of a strip, `[0, center)`
    pub const fn lower_half(len: u8) -> Self {
        Self {
            start: 0,
            end: center_of(len),
        }
    }

    /// Second half of a strip, `[len / 2, len)`.
    ///
    /// On odd lengths the middle LED belongs to both halves, so a single
    /// LED strip shows either side.
    pub const fn upper_half(len: u8) -> Self {
        Self {
            start: len / 2,
            end: len,
        }
    }
}

/// Get a slice of the LEDs within the bounds
///
/// Bounds past the end of `leds` are cut to the slice length.
pub(crate) fn bounded(leds: &mut [Rgb], bounds: RenderingBounds) -> &mut [Rgb] {
    let end = (bounds.end as usize).min(leds.len());
    let start = (bounds.start as usize).min(end);
    &mut leds[start..end]
}

/// Center index of a strip of `len` LEDs (odd lengths round up)
pub const fn center_of(len: u8) -> u8 {
    len / 2 + len % 2
}
