//! Whole-strip patterns: solid, breathing, strobe and flashing variants

use crate::bounds::center_of;
use crate::color::{BLACK, BLUE, Hsv, RED, Rgb, fill, hsv2rgb, scale_color};
use crate::math8::pulse8;

/// Lowest breathing level so the strip never goes fully dark
const BREATH_FLOOR: u8 = 16;

pub(super) fn solid(leds: &mut [Rgb], color: Rgb) {
    fill(leds, color);
}

#[allow(clippy::cast_possible_truncation)]
pub(super) fn breath(leds: &mut [Rgb], color: Rgb, step: u16) {
    let level = pulse8(step as u8).max(BREATH_FLOOR);
    fill(leds, scale_color(color, level));
}

/// Short flash once every 32 steps
pub(super) fn strobe(leds: &mut [Rgb], color: Rgb, step: u16) {
    let on = (step >> 2) & 0x07 == 0;
    fill(leds, if on { color } else { BLACK });
}

#[allow(clippy::cast_possible_truncation)]
pub(super) fn blink_rainbow(leds: &mut [Rgb], step: u16) {
    let phase = step >> 5;
    if phase & 1 == 1 {
        fill(leds, BLACK);
        return;
    }
    let hue = (phase >> 1).wrapping_mul(40) as u8;
    fill(
        leds,
        hsv2rgb(Hsv {
            hue,
            sat: 255,
            val: 255,
        }),
    );
}

/// Red/blue double flashes on alternating halves
pub(super) fn police(leds: &mut [Rgb], step: u16) {
    fill(leds, BLACK);
    let len = u8::try_from(leds.len()).unwrap_or(u8::MAX);
    let center = usize::from(center_of(len));
    match (step >> 3) & 0x07 {
        0 | 2 => fill(&mut leds[..center], RED),
        4 | 6 => fill(&mut leds[center..], BLUE),
        _ => {}
    }
}
