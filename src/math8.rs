/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Linear interpolation between two channel values by a fractional amount.
///
/// `t` is clamped to `[0.0, 1.0]`; the result is rounded and clamped to
/// `[0, 255]`, so `t == 0.0` yields `a` and `t == 1.0` yields `b` exactly.
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn lerp8(a: u8, b: u8, t: f32) -> u8 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let value = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
    libm::roundf(value).clamp(0.0, 255.0) as u8
}

/// Triangle wave: 0..255..0 over one full turn of `i`
#[inline]
pub const fn triwave8(i: u8) -> u8 {
    let j = if i & 0x80 != 0 { 255 - i } else { i };
    j << 1
}

/// Ease in out quadratic
pub const fn ease_in_out_quad(i: u8) -> u8 {
    let j = if i & 0x80 != 0 { 255 - i } else { i };
    let jj = scale8(j, j);
    let jj2 = jj << 1;
    if i & 0x80 == 0 { jj2 } else { 255 - jj2 }
}

/// Smooth 0..255..0 pulse built from a triangle wave
#[inline]
pub const fn pulse8(i: u8) -> u8 {
    ease_in_out_quad(triwave8(i))
}

/// Simple deterministic hash used by the flicker patterns
#[inline]
pub const fn hash32(x: u32) -> u32 {
    let mut z = x.wrapping_add(0x9e37_79b9);
    z = (z ^ (z >> 16)).wrapping_mul(0x85eb_ca6b);
    z = (z ^ (z >> 13)).wrapping_mul(0xc2b2_ae35);
    z ^ (z >> 16)
}
