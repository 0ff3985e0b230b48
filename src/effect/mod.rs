//! Step-driven pixel patterns with compile-time known ids
//!
//! Every pattern is a pure function of `(leds, color, step)`: it only writes
//! the buffer, is deterministic in `step` and works for any strip length.

mod chase;
mod flicker;
mod pulse;
mod rainbow;
mod scanner;

use crate::color::Rgb;

const EFFECT_NAME_SOLID: &str = "solid";
const EFFECT_NAME_BREATH: &str = "breath";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_CHASE: &str = "chase";
const EFFECT_NAME_BLINK_RAINBOW: &str = "blink_rainbow";
const EFFECT_NAME_TWINKLE: &str = "twinkle";
const EFFECT_NAME_FIRE: &str = "fire";
const EFFECT_NAME_METEOR: &str = "meteor";
const EFFECT_NAME_WAVE: &str = "wave";
const EFFECT_NAME_COMET: &str = "comet";
const EFFECT_NAME_CANDLE: &str = "candle";
const EFFECT_NAME_STATIC_RAINBOW: &str = "static_rainbow";
const EFFECT_NAME_KNIGHT_RIDER: &str = "knight_rider";
const EFFECT_NAME_POLICE: &str = "police";
const EFFECT_NAME_STROBE: &str = "strobe";
const EFFECT_NAME_LARSON_SCANNER: &str = "larson_scanner";
const EFFECT_NAME_COLOR_WIPE: &str = "color_wipe";
const EFFECT_NAME_THEATER_CHASE: &str = "theater_chase";
const EFFECT_NAME_RUNNING_LIGHTS: &str = "running_lights";
const EFFECT_NAME_COLOR_SWEEP: &str = "color_sweep";

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum EffectId {
    #[default]
    Solid = 0,
    Breath = 1,
    Rainbow = 2,
    Chase = 3,
    BlinkRainbow = 4,
    Twinkle = 5,
    Fire = 6,
    Meteor = 7,
    Wave = 8,
    Comet = 9,
    Candle = 10,
    StaticRainbow = 11,
    KnightRider = 12,
    Police = 13,
    Strobe = 14,
    LarsonScanner = 15,
    ColorWipe = 16,
    TheaterChase = 17,
    RunningLights = 18,
    ColorSweep = 19,
}

impl EffectId {
    pub const ALL: [Self; 20] = [
        Self::Solid,
        Self::Breath,
        Self::Rainbow,
        Self::Chase,
        Self::BlinkRainbow,
        Self::Twinkle,
        Self::Fire,
        Self::Meteor,
        Self::Wave,
        Self::Comet,
        Self::Candle,
        Self::StaticRainbow,
        Self::KnightRider,
        Self::Police,
        Self::Strobe,
        Self::LarsonScanner,
        Self::ColorWipe,
        Self::TheaterChase,
        Self::RunningLights,
        Self::ColorSweep,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => EFFECT_NAME_SOLID,
            Self::Breath => EFFECT_NAME_BREATH,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::Chase => EFFECT_NAME_CHASE,
            Self::BlinkRainbow => EFFECT_NAME_BLINK_RAINBOW,
            Self::Twinkle => EFFECT_NAME_TWINKLE,
            Self::Fire => EFFECT_NAME_FIRE,
            Self::Meteor => EFFECT_NAME_METEOR,
            Self::Wave => EFFECT_NAME_WAVE,
            Self::Comet => EFFECT_NAME_COMET,
            Self::Candle => EFFECT_NAME_CANDLE,
            Self::StaticRainbow => EFFECT_NAME_STATIC_RAINBOW,
            Self::KnightRider => EFFECT_NAME_KNIGHT_RIDER,
            Self::Police => EFFECT_NAME_POLICE,
            Self::Strobe => EFFECT_NAME_STROBE,
            Self::LarsonScanner => EFFECT_NAME_LARSON_SCANNER,
            Self::ColorWipe => EFFECT_NAME_COLOR_WIPE,
            Self::TheaterChase => EFFECT_NAME_THEATER_CHASE,
            Self::RunningLights => EFFECT_NAME_RUNNING_LIGHTS,
            Self::ColorSweep => EFFECT_NAME_COLOR_SWEEP,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

/// Renderer library used by the composer.
///
/// Implementations must only write `leds`, be deterministic in `step` and
/// accept any length from 1 to a few hundred LEDs.
pub trait PatternLibrary {
    fn render(&self, effect: EffectId, leds: &mut [Rgb], color: Rgb, step: u16);
}

/// The built-in pattern set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPatterns;

impl PatternLibrary for BuiltinPatterns {
    fn render(&self, effect: EffectId, leds: &mut [Rgb], color: Rgb, step: u16) {
        if leds.is_empty() {
            return;
        }
        match effect {
            EffectId::Solid => pulse::solid(leds, color),
            EffectId::Breath => pulse::breath(leds, color, step),
            EffectId::Strobe => pulse::strobe(leds, color, step),
            EffectId::BlinkRainbow => pulse::blink_rainbow(leds, step),
            EffectId::Police => pulse::police(leds, step),
            EffectId::Rainbow => rainbow::rainbow(leds, step),
            EffectId::StaticRainbow => rainbow::static_rainbow(leds),
            EffectId::Wave => rainbow::wave(leds, color, step),
            EffectId::ColorSweep => rainbow::color_sweep(leds, color, step),
            EffectId::KnightRider => scanner::knight_rider(leds, color, step),
            EffectId::LarsonScanner => scanner::larson_scanner(leds, color, step),
            EffectId::Comet => scanner::comet(leds, color, step),
            EffectId::Meteor => scanner::meteor(leds, color, step),
            EffectId::Chase => chase::chase(leds, color, step),
            EffectId::TheaterChase => chase::theater_chase(leds, color, step),
            EffectId::RunningLights => chase::running_lights(leds, color, step),
            EffectId::ColorWipe => chase::color_wipe(leds, color, step),
            EffectId::Twinkle => flicker::twinkle(leds, color, step),
            EffectId::Fire => flicker::fire(leds, step),
            EffectId::Candle => flicker::candle(leds, step),
        }
    }
}

/// Strip length as `u32`, saturating for absurdly long slices
fn len_u32(leds: &[Rgb]) -> u32 {
    u32::try_from(leds.len()).unwrap_or(u32::MAX)
}

/// Hue (0-255) of LED `i` when one full color wheel spans the strip
#[allow(clippy::cast_possible_truncation)]
fn spread_hue(i: usize, len: u32) -> u8 {
    let i = u32::try_from(i).unwrap_or(u32::MAX);
    ((i.saturating_mul(256)) / len.max(1)) as u8
}

/// Position of a dot bouncing between both ends of a strip
fn bounce_position(t: u32, len: u32) -> u32 {
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let p = t % period;
    if p < len - 1 { p } else { period - p }
}
