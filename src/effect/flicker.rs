//! Pseudo-random flicker patterns, seeded from the step so they stay
//! deterministic

use crate::color::{Rgb, fill, rgb_from_u32, scale_color};
use crate::math8::{hash32, scale8};

#[allow(clippy::unreadable_literal)]
const CANDLE_COLOR: Rgb = rgb_from_u32(0xFF9329);

#[allow(clippy::cast_possible_truncation)]
pub(super) fn twinkle(leds: &mut [Rgb], color: Rgb, step: u16) {
    let epoch = u32::from(step) / 16;
    for (i, led) in leds.iter_mut().enumerate() {
        let h = hash32((i as u32).wrapping_mul(0x9e37) ^ epoch.wrapping_mul(0x85eb));
        *led = if h & 0x07 == 0 {
            scale_color(color, (h >> 8) as u8 | 0x40)
        } else {
            scale_color(color, 8)
        };
    }
}

/// Map a heat value to black -> red -> yellow -> white
#[allow(clippy::cast_possible_truncation)]
fn heat_color(heat: u8) -> Rgb {
    let t = (u16::from(heat) * 191 / 255) as u8;
    let ramp = (t & 0x3F) << 2;
    if t & 0x80 != 0 {
        Rgb {
            r: 255,
            g: 255,
            b: ramp,
        }
    } else if t & 0x40 != 0 {
        Rgb {
            r: 255,
            g: ramp,
            b: 0,
        }
    } else {
        Rgb { r: ramp, g: 0, b: 0 }
    }
}

/// Flames rising from the start of the strip
#[allow(clippy::cast_possible_truncation)]
pub(super) fn fire(leds: &mut [Rgb], step: u16) {
    let len = u32::try_from(leds.len()).unwrap_or(u32::MAX).max(1);
    let epoch = u32::from(step) / 2;
    for (i, led) in leds.iter_mut().enumerate() {
        let i = i as u32;
        let base = 255 - ((i * 200) / len) as u8;
        let jitter = (hash32(i ^ (epoch << 10)) & 0x7F) as u8;
        *led = heat_color(scale8(base, 255 - jitter / 2));
    }
}

/// Warm candle glow with whole-strip flicker
#[allow(clippy::cast_possible_truncation)]
pub(super) fn candle(leds: &mut [Rgb], step: u16) {
    let flicker = (hash32(u32::from(step) / 3) & 0x5F) as u8;
    fill(leds, scale_color(CANDLE_COLOR, 255 - flicker));
}
