//! Moving-dot patterns: scanners, comets and meteors

use super::{bounce_position, len_u32};
use crate::color::{Rgb, scale_color};
use crate::math8::hash32;

#[allow(clippy::cast_possible_truncation)]
fn scan_with_trail(leds: &mut [Rgb], color: Rgb, t: u32, falloff: &[u8]) {
    let len = len_u32(leds);
    let pos = bounce_position(t, len);
    for (i, led) in leds.iter_mut().enumerate() {
        let distance = (i as u32).abs_diff(pos) as usize;
        let level = falloff.get(distance).copied().unwrap_or(0);
        *led = scale_color(color, level);
    }
}

/// Three-pixel eye sweeping back and forth
pub(super) fn knight_rider(leds: &mut [Rgb], color: Rgb, step: u16) {
    scan_with_trail(leds, color, u32::from(step) / 2, &[255, 128, 32]);
}

/// Single pixel sweeping back and forth with a soft glow
pub(super) fn larson_scanner(leds: &mut [Rgb], color: Rgb, step: u16) {
    scan_with_trail(leds, color, u32::from(step) / 2, &[255, 64, 16, 4]);
}

#[allow(clippy::cast_possible_truncation)]
fn trail_level(i: usize, head: u32, len: u32, tail: u32) -> u8 {
    let distance = (head + len - i as u32) % len;
    if distance >= tail {
        return 0;
    }
    (255 - (distance * 255) / tail) as u8
}

/// Head wrapping around the strip with a linear fading tail
pub(super) fn comet(leds: &mut [Rgb], color: Rgb, step: u16) {
    let len = len_u32(leds).max(1);
    let head = (u32::from(step) / 2) % len;
    let tail = (len / 3).max(1);
    for (i, led) in leds.iter_mut().enumerate() {
        *led = scale_color(color, trail_level(i, head, len, tail));
    }
}

/// Comet whose tail breaks up into randomly decaying fragments
#[allow(clippy::cast_possible_truncation)]
pub(super) fn meteor(leds: &mut [Rgb], color: Rgb, step: u16) {
    let len = len_u32(leds).max(1);
    let head = (u32::from(step) / 2) % len;
    let tail = (len / 2).max(1);
    let epoch = u32::from(step) / 8;
    for (i, led) in leds.iter_mut().enumerate() {
        let mut level = trail_level(i, head, len, tail);
        if level < 255 && hash32((i as u32) ^ (epoch << 8)) & 0x03 == 0 {
            level /= 4;
        }
        *led = scale_color(color, level);
    }
}
