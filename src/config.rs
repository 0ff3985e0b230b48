//! Lighting and motion configuration
//!
//! Numeric tunables are validated at the setter: non-finite values are
//! rejected, everything else is clamped into its documented range and the
//! applied value is returned. Controllers can therefore rely on sane values
//! no matter what arrives over the control link.

use core::fmt;

use embassy_time::Duration;

use crate::Strip;
use crate::color::{AMBER, BLUE, RED, Rgb, WHITE, rgb_from_u32};
use crate::effect::EffectId;
use crate::log::log;
use crate::startup::StartupSequence;

pub const DEFAULT_BRIGHTNESS: u8 = 128;
pub const DEFAULT_EFFECT_SPEED: u8 = 64;
pub const DEFAULT_LED_COUNT: u8 = 20;
pub const DEFAULT_STARTUP_DURATION: Duration = Duration::from_millis(3000);

/// Rejected configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// NaN or infinite number
    NotFinite,
    UnknownEffect(u8),
    UnknownPreset(u8),
    UnknownSequence(u8),
    UnknownBrakingMode(u8),
    /// Zero, or more LEDs than the frame buffers hold
    LedCountOutOfRange(u16),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite => f.write_str("value is not a finite number"),
            Self::UnknownEffect(id) => write!(f, "unknown effect id {id}"),
            Self::UnknownPreset(id) => write!(f, "unknown preset id {id}"),
            Self::UnknownSequence(id) => write!(f, "unknown startup sequence id {id}"),
            Self::UnknownBrakingMode(id) => write!(f, "unknown braking mode {id}"),
            Self::LedCountOutOfRange(count) => write!(f, "LED count {count} out of range"),
        }
    }
}

fn clamp_f32(name: &str, value: f32, min: f32, max: f32) -> Result<f32, ConfigError> {
    if !value.is_finite() {
        log!("[Config] rejected non-finite {}", name);
        return Err(ConfigError::NotFinite);
    }
    let clamped = value.clamp(min, max);
    #[allow(clippy::float_cmp)]
    if clamped != value {
        log!("[Config] {} clamped from {} to {}", name, value, clamped);
    }
    Ok(clamped)
}

fn clamp_ms(name: &str, millis: u32, min: u32, max: u32) -> Duration {
    let clamped = millis.clamp(min, max);
    if clamped != millis {
        log!("[Config] {} clamped from {}ms to {}ms", name, millis, clamped);
    }
    Duration::from_millis(u64::from(clamped))
}

/// Animation of the braking overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BrakingMode {
    /// Hard on/off flashes
    #[default]
    Flash = 0,
    /// Smooth brightness pulses
    Pulse = 1,
}

impl BrakingMode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Flash),
            1 => Some(Self::Pulse),
            _ => None,
        }
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Thresholds, durations and enabled flags of the motion controllers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    motion_enabled: bool,
    direction_based_lighting: bool,
    blinker_enabled: bool,
    braking_enabled: bool,
    park_enabled: bool,
    impact_enabled: bool,

    forward_accel_threshold: f32,
    direction_sustain: Duration,
    direction_fade: Duration,

    motion_sensitivity: f32,
    blinker_threshold: f32,
    blinker_delay: Duration,
    blinker_timeout: Duration,

    braking_threshold: f32,
    braking_sustain: Duration,
    braking_mode: BrakingMode,

    park_stationary_time: Duration,
    park_accel_noise: f32,
    park_gyro_noise: f32,

    impact_threshold: f32,
    impact_cooldown: Duration,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            motion_enabled: true,
            direction_based_lighting: false,
            blinker_enabled: true,
            braking_enabled: true,
            park_enabled: true,
            impact_enabled: true,

            forward_accel_threshold: 0.3,
            direction_sustain: Duration::from_millis(500),
            direction_fade: Duration::from_millis(1500),

            motion_sensitivity: 1.0,
            blinker_threshold: 0.3,
            blinker_delay: Duration::from_millis(300),
            blinker_timeout: Duration::from_millis(2000),

            braking_threshold: -0.5,
            braking_sustain: Duration::from_millis(200),
            braking_mode: BrakingMode::Flash,

            park_stationary_time: Duration::from_millis(2000),
            park_accel_noise: 0.1,
            park_gyro_noise: 0.5,

            impact_threshold: 3.0,
            impact_cooldown: Duration::from_millis(1000),
        }
    }
}

/// Hysteresis factor: leaving a direction takes this share of the threshold
pub const DIRECTION_HYSTERESIS: f32 = 0.7;

impl MotionConfig {
    pub const fn motion_enabled(&self) -> bool {
        self.motion_enabled
    }
    pub fn set_motion_enabled(&mut self, enabled: bool) {
        self.motion_enabled = enabled;
    }

    pub const fn direction_based_lighting(&self) -> bool {
        self.direction_based_lighting
    }
    pub fn set_direction_based_lighting(&mut self, enabled: bool) {
        self.direction_based_lighting = enabled;
    }

    pub const fn blinker_enabled(&self) -> bool {
        self.blinker_enabled
    }
    pub fn set_blinker_enabled(&mut self, enabled: bool) {
        self.blinker_enabled = enabled;
    }

    pub const fn braking_enabled(&self) -> bool {
        self.braking_enabled
    }
    pub fn set_braking_enabled(&mut self, enabled: bool) {
        self.braking_enabled = enabled;
    }

    pub const fn park_enabled(&self) -> bool {
        self.park_enabled
    }
    pub fn set_park_enabled(&mut self, enabled: bool) {
        self.park_enabled = enabled;
    }

    pub const fn impact_enabled(&self) -> bool {
        self.impact_enabled
    }
    pub fn set_impact_enabled(&mut self, enabled: bool) {
        self.impact_enabled = enabled;
    }

    /// Threshold (g) to enter a direction
    pub const fn forward_accel_threshold(&self) -> f32 {
        self.forward_accel_threshold
    }
    /// Range 0.05..=2.0 g
    pub fn set_forward_accel_threshold(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.forward_accel_threshold = clamp_f32("forward_accel_threshold", value, 0.05, 2.0)?;
        Ok(self.forward_accel_threshold)
    }

    /// Threshold (g) to leave the current direction
    pub fn direction_leave_threshold(&self) -> f32 {
        self.forward_accel_threshold * DIRECTION_HYSTERESIS
    }

    pub const fn direction_sustain(&self) -> Duration {
        self.direction_sustain
    }
    /// Range 0..=5000 ms
    pub fn set_direction_sustain_ms(&mut self, millis: u32) -> Duration {
        self.direction_sustain = clamp_ms("direction_sustain", millis, 0, 5000);
        self.direction_sustain
    }

    pub const fn direction_fade(&self) -> Duration {
        self.direction_fade
    }
    /// Range 0..=10000 ms
    pub fn set_direction_fade_ms(&mut self, millis: u32) -> Duration {
        self.direction_fade = clamp_ms("direction_fade", millis, 0, 10_000);
        self.direction_fade
    }

    pub const fn motion_sensitivity(&self) -> f32 {
        self.motion_sensitivity
    }
    /// Range 0.1..=5.0
    pub fn set_motion_sensitivity(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.motion_sensitivity = clamp_f32("motion_sensitivity", value, 0.1, 5.0)?;
        Ok(self.motion_sensitivity)
    }

    pub const fn blinker_threshold(&self) -> f32 {
        self.blinker_threshold
    }
    /// Range 0.05..=2.0 g
    pub fn set_blinker_threshold(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.blinker_threshold = clamp_f32("blinker_threshold", value, 0.05, 2.0)?;
        Ok(self.blinker_threshold)
    }

    /// Lateral acceleration (g) that signals turn intent
    pub fn turn_intent_threshold(&self) -> f32 {
        self.blinker_threshold * self.motion_sensitivity
    }

    pub const fn blinker_delay(&self) -> Duration {
        self.blinker_delay
    }
    /// Range 0..=5000 ms
    pub fn set_blinker_delay_ms(&mut self, millis: u32) -> Duration {
        self.blinker_delay = clamp_ms("blinker_delay", millis, 0, 5000);
        self.blinker_delay
    }

    pub const fn blinker_timeout(&self) -> Duration {
        self.blinker_timeout
    }
    /// Range 100..=30000 ms
    pub fn set_blinker_timeout_ms(&mut self, millis: u32) -> Duration {
        self.blinker_timeout = clamp_ms("blinker_timeout", millis, 100, 30_000);
        self.blinker_timeout
    }

    pub const fn braking_threshold(&self) -> f32 {
        self.braking_threshold
    }
    /// Range -4.0..=-0.05 g
    pub fn set_braking_threshold(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.braking_threshold = clamp_f32("braking_threshold", value, -4.0, -0.05)?;
        Ok(self.braking_threshold)
    }

    pub const fn braking_sustain(&self) -> Duration {
        self.braking_sustain
    }
    /// Range 0..=5000 ms
    pub fn set_braking_sustain_ms(&mut self, millis: u32) -> Duration {
        self.braking_sustain = clamp_ms("braking_sustain", millis, 0, 5000);
        self.braking_sustain
    }

    pub const fn braking_mode(&self) -> BrakingMode {
        self.braking_mode
    }
    pub fn set_braking_mode(&mut self, mode: BrakingMode) {
        self.braking_mode = mode;
    }

    pub const fn park_stationary_time(&self) -> Duration {
        self.park_stationary_time
    }
    /// Range 100..=600000 ms
    pub fn set_park_stationary_time_ms(&mut self, millis: u32) -> Duration {
        self.park_stationary_time = clamp_ms("park_stationary_time", millis, 100, 600_000);
        self.park_stationary_time
    }

    pub const fn park_accel_noise(&self) -> f32 {
        self.park_accel_noise
    }
    /// Range 0.005..=1.0 g
    pub fn set_park_accel_noise(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.park_accel_noise = clamp_f32("park_accel_noise_threshold", value, 0.005, 1.0)?;
        Ok(self.park_accel_noise)
    }

    pub const fn park_gyro_noise(&self) -> f32 {
        self.park_gyro_noise
    }
    /// Range 0.05..=100.0 deg/s
    pub fn set_park_gyro_noise(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.park_gyro_noise = clamp_f32("park_gyro_noise_threshold", value, 0.05, 100.0)?;
        Ok(self.park_gyro_noise)
    }

    pub const fn impact_threshold(&self) -> f32 {
        self.impact_threshold
    }
    /// Range 1.2..=16.0 g
    pub fn set_impact_threshold(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.impact_threshold = clamp_f32("impact_threshold", value, 1.2, 16.0)?;
        Ok(self.impact_threshold)
    }

    pub const fn impact_cooldown(&self) -> Duration {
        self.impact_cooldown
    }
    /// Range 100..=60000 ms
    pub fn set_impact_cooldown_ms(&mut self, millis: u32) -> Duration {
        self.impact_cooldown = clamp_ms("impact_cooldown", millis, 100, 60_000);
        self.impact_cooldown
    }
}

/// Effect and color of one role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripStyle {
    pub effect: EffectId,
    pub color: Rgb,
}

/// Look of both strips while parked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkStyle {
    pub effect: EffectId,
    pub speed: u8,
    pub brightness: u8,
    pub headlight_color: Rgb,
    pub taillight_color: Rgb,
}

/// Colors of the turn indicator overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorStyle {
    /// Solid fill of the front-role strip
    pub front_base: Rgb,
    /// Solid fill of the rear-role strip
    pub rear_base: Rgb,
    /// Blinking half
    pub blink: Rgb,
}

/// Startup animation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupConfig {
    pub sequence: StartupSequence,
    duration: Duration,
}

impl StartupConfig {
    pub const fn new(sequence: StartupSequence) -> Self {
        Self {
            sequence,
            duration: DEFAULT_STARTUP_DURATION,
        }
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Range 500..=10000 ms
    pub fn set_duration_ms(&mut self, millis: u32) -> Duration {
        self.duration = clamp_ms("startup_duration", millis, 500, 10_000);
        self.duration
    }
}

/// Everything the composer needs to draw the base and overlay layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightingConfig {
    pub brightness: u8,
    pub effect_speed: u8,
    pub preset: Preset,
    pub headlight: StripStyle,
    pub taillight: StripStyle,
    pub park: ParkStyle,
    pub braking_color: Rgb,
    pub indicator: IndicatorStyle,
    pub impact_color: Rgb,
    pub startup: StartupConfig,
    /// Take part in cross-vehicle sync
    pub sync_enabled: bool,
    /// Publish local state to the group
    pub sync_leader: bool,
    led_counts: [u8; 2],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            effect_speed: DEFAULT_EFFECT_SPEED,
            preset: Preset::Standard,
            headlight: StripStyle {
                effect: EffectId::Solid,
                color: WHITE,
            },
            taillight: StripStyle {
                effect: EffectId::Solid,
                color: RED,
            },
            park: ParkStyle {
                effect: EffectId::Solid,
                speed: DEFAULT_EFFECT_SPEED,
                brightness: DEFAULT_BRIGHTNESS,
                headlight_color: BLUE,
                taillight_color: BLUE,
            },
            braking_color: RED,
            indicator: IndicatorStyle {
                front_base: WHITE,
                rear_base: RED,
                blink: AMBER,
            },
            impact_color: WHITE,
            startup: StartupConfig::new(StartupSequence::None),
            sync_enabled: false,
            sync_leader: false,
            led_counts: [DEFAULT_LED_COUNT; 2],
        }
    }
}

impl LightingConfig {
    pub const fn led_count(&self, strip: Strip) -> u8 {
        self.led_counts[strip.index()]
    }

    pub const fn led_counts(&self) -> [u8; 2] {
        self.led_counts
    }

    /// Set the LED count of a strip; must be `1..=max_leds` (and fit a `u8`)
    pub fn set_led_count(
        &mut self,
        strip: Strip,
        count: u16,
        max_leds: usize,
    ) -> Result<u8, ConfigError> {
        let fits = count > 0 && usize::from(count) <= max_leds;
        let count = u8::try_from(count)
            .ok()
            .filter(|_| fits)
            .ok_or(ConfigError::LedCountOutOfRange(count))?;
        self.led_counts[strip.index()] = count;
        Ok(count)
    }

    /// Style of the strip holding the given physical position
    pub const fn style(&self, strip: Strip) -> StripStyle {
        match strip {
            Strip::Headlight => self.headlight,
            Strip::Taillight => self.taillight,
        }
    }

    /// Park color of a physical strip
    pub const fn park_color(&self, strip: Strip) -> Rgb {
        match strip {
            Strip::Headlight => self.park.headlight_color,
            Strip::Taillight => self.park.taillight_color,
        }
    }
}

/// Stored look bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Preset {
    #[default]
    Standard = 0,
    Night = 1,
    Party = 2,
    Stealth = 3,
}

impl Preset {
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Standard),
            1 => Some(Self::Night),
            2 => Some(Self::Party),
            3 => Some(Self::Stealth),
            _ => None,
        }
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Night => "night",
            Self::Party => "party",
            Self::Stealth => "stealth",
        }
    }

    /// Overwrite brightness and both strip styles with this preset
    #[allow(clippy::unreadable_literal)]
    pub fn apply(self, lighting: &mut LightingConfig) {
        let (brightness, headlight, taillight) = match self {
            Self::Standard => (
                128,
                StripStyle {
                    effect: EffectId::Solid,
                    color: WHITE,
                },
                StripStyle {
                    effect: EffectId::Solid,
                    color: RED,
                },
            ),
            Self::Night => (
                255,
                StripStyle {
                    effect: EffectId::Solid,
                    color: WHITE,
                },
                StripStyle {
                    effect: EffectId::Breath,
                    color: RED,
                },
            ),
            Self::Party => (
                200,
                StripStyle {
                    effect: EffectId::Rainbow,
                    color: WHITE,
                },
                StripStyle {
                    effect: EffectId::Rainbow,
                    color: RED,
                },
            ),
            Self::Stealth => (
                32,
                StripStyle {
                    effect: EffectId::Solid,
                    color: rgb_from_u32(0x404040),
                },
                StripStyle {
                    effect: EffectId::Solid,
                    color: rgb_from_u32(0x400000),
                },
            ),
        };
        lighting.preset = self;
        lighting.brightness = brightness;
        lighting.headlight = headlight;
        lighting.taillight = taillight;
    }
}

/// Partial configuration update, applied all-or-nothing
///
/// Raw ids are validated when the patch is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigPatch {
    pub preset: Option<u8>,
    pub brightness: Option<u8>,
    pub effect_speed: Option<u8>,
    pub headlight_color: Option<Rgb>,
    pub taillight_color: Option<Rgb>,
    pub headlight_effect: Option<u8>,
    pub taillight_effect: Option<u8>,
    pub headlight_led_count: Option<u16>,
    pub taillight_led_count: Option<u16>,

    pub motion_enabled: Option<bool>,
    pub direction_based_lighting: Option<bool>,
    pub blinker_enabled: Option<bool>,
    pub braking_enabled: Option<bool>,
    pub park_enabled: Option<bool>,
    pub impact_enabled: Option<bool>,

    pub forward_accel_threshold: Option<f32>,
    pub direction_sustain_ms: Option<u32>,
    pub direction_fade_ms: Option<u32>,
    pub motion_sensitivity: Option<f32>,
    pub blinker_threshold: Option<f32>,
    pub blinker_delay_ms: Option<u32>,
    pub blinker_timeout_ms: Option<u32>,
    pub braking_threshold: Option<f32>,
    pub braking_sustain_ms: Option<u32>,
    pub braking_mode: Option<u8>,
    pub park_stationary_time_ms: Option<u32>,
    pub park_accel_noise_threshold: Option<f32>,
    pub park_gyro_noise_threshold: Option<f32>,
    pub impact_threshold: Option<f32>,
    pub impact_cooldown_ms: Option<u32>,

    pub park_effect: Option<u8>,
    pub park_effect_speed: Option<u8>,
    pub park_brightness: Option<u8>,
    pub park_headlight_color: Option<Rgb>,
    pub park_taillight_color: Option<Rgb>,

    pub startup_sequence: Option<u8>,
    pub startup_duration_ms: Option<u32>,

    pub sync_enabled: Option<bool>,
    pub sync_leader: Option<bool>,
}

fn effect(raw: u8) -> Result<EffectId, ConfigError> {
    EffectId::from_raw(raw).ok_or(ConfigError::UnknownEffect(raw))
}

impl ConfigPatch {
    /// Apply the patch to copies of both configs and commit only if every
    /// field is valid. The preset is applied first so explicit fields in the
    /// same patch override it.
    pub fn apply(
        &self,
        lighting: &mut LightingConfig,
        motion: &mut MotionConfig,
        max_leds: usize,
    ) -> Result<(), ConfigError> {
        let mut l = *lighting;
        let mut m = *motion;
        self.apply_lighting(&mut l, max_leds)?;
        self.apply_motion(&mut m)?;
        *lighting = l;
        *motion = m;
        Ok(())
    }

    fn apply_lighting(&self, l: &mut LightingConfig, max_leds: usize) -> Result<(), ConfigError> {
        if let Some(raw) = self.preset {
            Preset::from_raw(raw)
                .ok_or(ConfigError::UnknownPreset(raw))?
                .apply(l);
        }
        if let Some(brightness) = self.brightness {
            l.brightness = brightness;
        }
        if let Some(speed) = self.effect_speed {
            l.effect_speed = speed;
        }
        if let Some(color) = self.headlight_color {
            l.headlight.color = color;
        }
        if let Some(color) = self.taillight_color {
            l.taillight.color = color;
        }
        if let Some(raw) = self.headlight_effect {
            l.headlight.effect = effect(raw)?;
        }
        if let Some(raw) = self.taillight_effect {
            l.taillight.effect = effect(raw)?;
        }
        if let Some(count) = self.headlight_led_count {
            l.set_led_count(Strip::Headlight, count, max_leds)?;
        }
        if let Some(count) = self.taillight_led_count {
            l.set_led_count(Strip::Taillight, count, max_leds)?;
        }
        if let Some(raw) = self.park_effect {
            l.park.effect = effect(raw)?;
        }
        if let Some(speed) = self.park_effect_speed {
            l.park.speed = speed;
        }
        if let Some(brightness) = self.park_brightness {
            l.park.brightness = brightness;
        }
        if let Some(color) = self.park_headlight_color {
            l.park.headlight_color = color;
        }
        if let Some(color) = self.park_taillight_color {
            l.park.taillight_color = color;
        }
        if let Some(raw) = self.startup_sequence {
            l.startup.sequence =
                StartupSequence::from_raw(raw).ok_or(ConfigError::UnknownSequence(raw))?;
        }
        if let Some(millis) = self.startup_duration_ms {
            l.startup.set_duration_ms(millis);
        }
        if let Some(enabled) = self.sync_enabled {
            l.sync_enabled = enabled;
        }
        if let Some(leader) = self.sync_leader {
            l.sync_leader = leader;
        }
        Ok(())
    }

    fn apply_motion(&self, m: &mut MotionConfig) -> Result<(), ConfigError> {
        if let Some(enabled) = self.motion_enabled {
            m.set_motion_enabled(enabled);
        }
        if let Some(enabled) = self.direction_based_lighting {
            m.set_direction_based_lighting(enabled);
        }
        if let Some(enabled) = self.blinker_enabled {
            m.set_blinker_enabled(enabled);
        }
        if let Some(enabled) = self.braking_enabled {
            m.set_braking_enabled(enabled);
        }
        if let Some(enabled) = self.park_enabled {
            m.set_park_enabled(enabled);
        }
        if let Some(enabled) = self.impact_enabled {
            m.set_impact_enabled(enabled);
        }
        if let Some(value) = self.forward_accel_threshold {
            m.set_forward_accel_threshold(value)?;
        }
        if let Some(millis) = self.direction_sustain_ms {
            m.set_direction_sustain_ms(millis);
        }
        if let Some(millis) = self.direction_fade_ms {
            m.set_direction_fade_ms(millis);
        }
        if let Some(value) = self.motion_sensitivity {
            m.set_motion_sensitivity(value)?;
        }
        if let Some(value) = self.blinker_threshold {
            m.set_blinker_threshold(value)?;
        }
        if let Some(millis) = self.blinker_delay_ms {
            m.set_blinker_delay_ms(millis);
        }
        if let Some(millis) = self.blinker_timeout_ms {
            m.set_blinker_timeout_ms(millis);
        }
        if let Some(value) = self.braking_threshold {
            m.set_braking_threshold(value)?;
        }
        if let Some(millis) = self.braking_sustain_ms {
            m.set_braking_sustain_ms(millis);
        }
        if let Some(raw) = self.braking_mode {
            m.set_braking_mode(
                BrakingMode::from_raw(raw).ok_or(ConfigError::UnknownBrakingMode(raw))?,
            );
        }
        if let Some(millis) = self.park_stationary_time_ms {
            m.set_park_stationary_time_ms(millis);
        }
        if let Some(value) = self.park_accel_noise_threshold {
            m.set_park_accel_noise(value)?;
        }
        if let Some(value) = self.park_gyro_noise_threshold {
            m.set_park_gyro_noise(value)?;
        }
        if let Some(value) = self.impact_threshold {
            m.set_impact_threshold(value)?;
        }
        if let Some(millis) = self.impact_cooldown_ms {
            m.set_impact_cooldown_ms(millis);
        }
        Ok(())
    }
}
