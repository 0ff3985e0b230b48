//! Marquee-style patterns

use super::len_u32;
use crate::color::{BLACK, Rgb, scale_color};
use crate::math8::pulse8;

#[allow(clippy::cast_possible_truncation)]
fn offset(step: u16, divisor: u16) -> usize {
    usize::from(step / divisor)
}

/// Blocks of three lit pixels marching along the strip
pub(super) fn chase(leds: &mut [Rgb], color: Rgb, step: u16) {
    let shift = offset(step, 4);
    for (i, led) in leds.iter_mut().enumerate() {
        *led = if (i + shift) % 6 < 3 { color } else { BLACK };
    }
}

/// Every third pixel lit, marching along the strip
pub(super) fn theater_chase(leds: &mut [Rgb], color: Rgb, step: u16) {
    let shift = offset(step, 4);
    for (i, led) in leds.iter_mut().enumerate() {
        *led = if (i + shift) % 3 == 0 { color } else { BLACK };
    }
}

/// Short-wavelength brightness ripples running along the strip
#[allow(clippy::cast_possible_truncation)]
pub(super) fn running_lights(leds: &mut [Rgb], color: Rgb, step: u16) {
    for (i, led) in leds.iter_mut().enumerate() {
        let phase = (i as u16).wrapping_mul(32).wrapping_add(step.wrapping_mul(2));
        *led = scale_color(color, pulse8(phase as u8));
    }
}

/// Fill the strip pixel by pixel, then clear it the same way
#[allow(clippy::cast_possible_truncation)]
pub(super) fn color_wipe(leds: &mut [Rgb], color: Rgb, step: u16) {
    let len = len_u32(leds).max(1);
    let pos = (u32::from(step) / 2) % (2 * len);
    for (i, led) in leds.iter_mut().enumerate() {
        let i = i as u32;
        let lit = if pos < len { i <= pos } else { i > pos - len };
        *led = if lit { color } else { BLACK };
    }
}
