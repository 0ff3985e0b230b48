//! Hue-cycling and traveling-wave patterns

use super::{len_u32, spread_hue};
use crate::color::{Hsv, Rgb, hsv2rgb, scale_color};
use crate::math8::{pulse8, triwave8};

/// Brightness of the background under a sweeping band
const SWEEP_BACKGROUND: u8 = 24;

#[allow(clippy::cast_possible_truncation)]
pub(super) fn rainbow(leds: &mut [Rgb], step: u16) {
    let len = len_u32(leds);
    let base = step as u8;
    for (i, led) in leds.iter_mut().enumerate() {
        *led = hsv2rgb(Hsv {
            hue: base.wrapping_add(spread_hue(i, len)),
            sat: 255,
            val: 255,
        });
    }
}

pub(super) fn static_rainbow(leds: &mut [Rgb]) {
    let len = len_u32(leds);
    for (i, led) in leds.iter_mut().enumerate() {
        *led = hsv2rgb(Hsv {
            hue: spread_hue(i, len),
            sat: 255,
            val: 255,
        });
    }
}

/// Slow sine-like swell of the color traveling along the strip
#[allow(clippy::cast_possible_truncation)]
pub(super) fn wave(leds: &mut [Rgb], color: Rgb, step: u16) {
    let len = len_u32(leds);
    for (i, led) in leds.iter_mut().enumerate() {
        let phase = spread_hue(i, len).wrapping_add(step as u8);
        *led = scale_color(color, pulse8(phase));
    }
}

/// A bright band sweeping over a dim copy of the color
#[allow(clippy::cast_possible_truncation)]
pub(super) fn color_sweep(leds: &mut [Rgb], color: Rgb, step: u16) {
    let len = len_u32(leds);
    let band = (len / 4).max(1);
    let head = (u32::from(step) / 2) % len.max(1);
    for (i, led) in leds.iter_mut().enumerate() {
        let i = i as u32;
        let distance = (head + len - i) % len.max(1);
        *led = if distance < band {
            let level = triwave8(((distance * 128) / band) as u8 + 128);
            scale_color(color, level.max(SWEEP_BACKGROUND))
        } else {
            scale_color(color, SWEEP_BACKGROUND)
        };
    }
}
