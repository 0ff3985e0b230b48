pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::Rgb,
    math8::{lerp8, scale8},
};

/// Linear per-component interpolation from `a` to `b` by `t` in `[0.0, 1.0]`
#[inline]
pub fn lerp_colors(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb {
        r: lerp8(a.r, b.r, t),
        g: lerp8(a.g, b.g, t),
        b: lerp8(a.b, b.b, t),
    }
}

/// Cross-fade two frames into `out`.
///
/// Only the common prefix of the three slices is written.
pub fn lerp_frames(out: &mut [Rgb], from: &[Rgb], to: &[Rgb], t: f32) {
    for ((pixel, a), b) in out.iter_mut().zip(from).zip(to) {
        *pixel = lerp_colors(*a, *b, t);
    }
}

/// Scale every channel of a color by `scale` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Fill every LED with one color
#[inline]
pub fn fill(leds: &mut [Rgb], color: Rgb) {
    for led in leds {
        *led = color;
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
