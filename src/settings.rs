//! Flat key/value persistence of the configuration
//!
//! Keys are read through the validating setters, so a corrupted or foreign
//! store can never break an invariant. Missing keys and values of the wrong
//! type fall back to the defaults.

use embassy_time::Duration;

use crate::Strip;
use crate::color::{Rgb, rgb_from_u32};
use crate::config::{BrakingMode, ConfigError, LightingConfig, MotionConfig, Preset};
use crate::effect::EffectId;
use crate::log::log;
use crate::motion::{Axis, CalibrationMapping};
use crate::startup::StartupSequence;

/// A stored value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Color(Rgb),
}

/// Opaque key/value storage
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<SettingValue>;
    fn set(&mut self, key: &str, value: SettingValue);
}

pub const KEY_BRIGHTNESS: &str = "brightness";
pub const KEY_EFFECT_SPEED: &str = "effect_speed";
pub const KEY_PRESET: &str = "preset";
pub const KEY_HEADLIGHT_EFFECT: &str = "headlight_effect";
pub const KEY_TAILLIGHT_EFFECT: &str = "taillight_effect";
pub const KEY_HEADLIGHT_COLOR: &str = "headlight_color";
pub const KEY_TAILLIGHT_COLOR: &str = "taillight_color";
pub const KEY_HEADLIGHT_LED_COUNT: &str = "headlight_led_count";
pub const KEY_TAILLIGHT_LED_COUNT: &str = "taillight_led_count";
pub const KEY_PARK_EFFECT: &str = "park_effect";
pub const KEY_PARK_EFFECT_SPEED: &str = "park_effect_speed";
pub const KEY_PARK_BRIGHTNESS: &str = "park_brightness";
pub const KEY_PARK_HEADLIGHT_COLOR: &str = "park_headlight_color";
pub const KEY_PARK_TAILLIGHT_COLOR: &str = "park_taillight_color";
pub const KEY_STARTUP_SEQUENCE: &str = "startup_sequence";
pub const KEY_STARTUP_DURATION: &str = "startup_duration";
pub const KEY_SYNC_ENABLED: &str = "sync_enabled";
pub const KEY_SYNC_LEADER: &str = "sync_leader";

pub const KEY_MOTION_ENABLED: &str = "motion_enabled";
pub const KEY_DIRECTION_BASED_LIGHTING: &str = "direction_based_lighting";
pub const KEY_BLINKER_ENABLED: &str = "blinker_enabled";
pub const KEY_BRAKING_ENABLED: &str = "braking_enabled";
pub const KEY_PARK_MODE_ENABLED: &str = "park_mode_enabled";
pub const KEY_IMPACT_DETECTION_ENABLED: &str = "impact_detection_enabled";
pub const KEY_FORWARD_ACCEL_THRESHOLD: &str = "forward_accel_threshold";
pub const KEY_DIRECTION_SUSTAIN: &str = "direction_sustain";
pub const KEY_DIRECTION_FADE: &str = "direction_fade";
pub const KEY_MOTION_SENSITIVITY: &str = "motion_sensitivity";
pub const KEY_BLINKER_THRESHOLD: &str = "blinker_threshold";
pub const KEY_BLINKER_DELAY: &str = "blinker_delay";
pub const KEY_BLINKER_TIMEOUT: &str = "blinker_timeout";
pub const KEY_BRAKING_THRESHOLD: &str = "braking_threshold";
pub const KEY_BRAKING_SUSTAIN: &str = "braking_sustain";
pub const KEY_BRAKING_EFFECT: &str = "braking_effect";
pub const KEY_PARK_STATIONARY_TIME: &str = "park_stationary_time";
pub const KEY_PARK_ACCEL_NOISE: &str = "park_accel_noise_threshold";
pub const KEY_PARK_GYRO_NOISE: &str = "park_gyro_noise_threshold";
pub const KEY_IMPACT_THRESHOLD: &str = "impact_threshold";
pub const KEY_IMPACT_COOLDOWN: &str = "impact_cooldown";

pub const KEY_CALIBRATION_COMPLETE: &str = "calibration_complete";
pub const KEY_FORWARD_AXIS: &str = "forward_axis";
pub const KEY_FORWARD_SIGN: &str = "forward_sign";
pub const KEY_LATERAL_AXIS: &str = "lateral_axis";
pub const KEY_LATERAL_SIGN: &str = "lateral_sign";

/// Everything that survives a power cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Settings {
    pub lighting: LightingConfig,
    pub motion: MotionConfig,
    pub calibration: CalibrationMapping,
}

fn get_bool<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<bool> {
    match store.get(key)? {
        SettingValue::Bool(value) => Some(value),
        SettingValue::Int(value) => Some(value != 0),
        _ => None,
    }
}

fn get_int<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<i32> {
    match store.get(key)? {
        SettingValue::Int(value) => Some(value),
        _ => None,
    }
}

fn get_u8<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<u8> {
    get_int(store, key).and_then(|value| u8::try_from(value).ok())
}

fn get_millis<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<u32> {
    get_int(store, key).map(|value| u32::try_from(value).unwrap_or(0))
}

#[allow(clippy::cast_precision_loss)]
fn get_f32<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<f32> {
    match store.get(key)? {
        SettingValue::Float(value) => Some(value),
        SettingValue::Int(value) => Some(value as f32),
        _ => None,
    }
}

#[allow(clippy::cast_sign_loss)]
fn get_color<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<Rgb> {
    match store.get(key)? {
        SettingValue::Color(value) => Some(value),
        SettingValue::Int(value) => Some(rgb_from_u32(value as u32)),
        _ => None,
    }
}

fn get_effect<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<EffectId> {
    get_u8(store, key).and_then(EffectId::from_raw)
}

fn get_sign<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<i8> {
    match get_int(store, key)? {
        1 => Some(1),
        -1 => Some(-1),
        _ => None,
    }
}

fn get_axis<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<Axis> {
    get_u8(store, key).and_then(Axis::from_raw)
}

fn check<T, E: core::fmt::Display>(key: &str, result: Result<T, E>) {
    if let Err(error) = result {
        log!("[Settings] ignoring {}: {}", key, error);
    }
}

impl Settings {
    /// Read settings from `store`; LED counts above `max_leds` are ignored
    pub fn load<S: SettingsStore + ?Sized>(store: &S, max_leds: usize) -> Self {
        let mut settings = Self::default();
        settings.load_lighting(store, max_leds);
        settings.load_motion(store);
        settings.load_calibration(store);
        settings
    }

    fn load_lighting<S: SettingsStore + ?Sized>(&mut self, store: &S, max_leds: usize) {
        let l = &mut self.lighting;
        if let Some(preset) = get_u8(store, KEY_PRESET).and_then(Preset::from_raw) {
            l.preset = preset;
        }
        if let Some(value) = get_u8(store, KEY_BRIGHTNESS) {
            l.brightness = value;
        }
        if let Some(value) = get_u8(store, KEY_EFFECT_SPEED) {
            l.effect_speed = value;
        }
        if let Some(effect) = get_effect(store, KEY_HEADLIGHT_EFFECT) {
            l.headlight.effect = effect;
        }
        if let Some(effect) = get_effect(store, KEY_TAILLIGHT_EFFECT) {
            l.taillight.effect = effect;
        }
        if let Some(color) = get_color(store, KEY_HEADLIGHT_COLOR) {
            l.headlight.color = color;
        }
        if let Some(color) = get_color(store, KEY_TAILLIGHT_COLOR) {
            l.taillight.color = color;
        }
        for (key, strip) in [
            (KEY_HEADLIGHT_LED_COUNT, Strip::Headlight),
            (KEY_TAILLIGHT_LED_COUNT, Strip::Taillight),
        ] {
            if let Some(count) = get_int(store, key) {
                let count = u16::try_from(count).unwrap_or(0);
                check(key, l.set_led_count(strip, count, max_leds));
            }
        }
        if let Some(effect) = get_effect(store, KEY_PARK_EFFECT) {
            l.park.effect = effect;
        }
        if let Some(value) = get_u8(store, KEY_PARK_EFFECT_SPEED) {
            l.park.speed = value;
        }
        if let Some(value) = get_u8(store, KEY_PARK_BRIGHTNESS) {
            l.park.brightness = value;
        }
        if let Some(color) = get_color(store, KEY_PARK_HEADLIGHT_COLOR) {
            l.park.headlight_color = color;
        }
        if let Some(color) = get_color(store, KEY_PARK_TAILLIGHT_COLOR) {
            l.park.taillight_color = color;
        }
        if let Some(sequence) = get_u8(store, KEY_STARTUP_SEQUENCE).and_then(StartupSequence::from_raw)
        {
            l.startup.sequence = sequence;
        }
        if let Some(millis) = get_millis(store, KEY_STARTUP_DURATION) {
            l.startup.set_duration_ms(millis);
        }
        if let Some(value) = get_bool(store, KEY_SYNC_ENABLED) {
            l.sync_enabled = value;
        }
        if let Some(value) = get_bool(store, KEY_SYNC_LEADER) {
            l.sync_leader = value;
        }
    }

    fn load_motion<S: SettingsStore + ?Sized>(&mut self, store: &S) {
        let m = &mut self.motion;
        let flags: [(&str, fn(&mut MotionConfig, bool)); 6] = [
            (KEY_MOTION_ENABLED, MotionConfig::set_motion_enabled),
            (KEY_DIRECTION_BASED_LIGHTING, MotionConfig::set_direction_based_lighting),
            (KEY_BLINKER_ENABLED, MotionConfig::set_blinker_enabled),
            (KEY_BRAKING_ENABLED, MotionConfig::set_braking_enabled),
            (KEY_PARK_MODE_ENABLED, MotionConfig::set_park_enabled),
            (KEY_IMPACT_DETECTION_ENABLED, MotionConfig::set_impact_enabled),
        ];
        for (key, set) in flags {
            if let Some(value) = get_bool(store, key) {
                set(m, value);
            }
        }

        let thresholds: [(&str, fn(&mut MotionConfig, f32) -> Result<f32, ConfigError>); 7] = [
            (KEY_FORWARD_ACCEL_THRESHOLD, MotionConfig::set_forward_accel_threshold),
            (KEY_MOTION_SENSITIVITY, MotionConfig::set_motion_sensitivity),
            (KEY_BLINKER_THRESHOLD, MotionConfig::set_blinker_threshold),
            (KEY_BRAKING_THRESHOLD, MotionConfig::set_braking_threshold),
            (KEY_PARK_ACCEL_NOISE, MotionConfig::set_park_accel_noise),
            (KEY_PARK_GYRO_NOISE, MotionConfig::set_park_gyro_noise),
            (KEY_IMPACT_THRESHOLD, MotionConfig::set_impact_threshold),
        ];
        for (key, set) in thresholds {
            if let Some(value) = get_f32(store, key) {
                check(key, set(m, value));
            }
        }

        let durations: [(&str, fn(&mut MotionConfig, u32) -> Duration); 7] = [
            (KEY_DIRECTION_SUSTAIN, MotionConfig::set_direction_sustain_ms),
            (KEY_DIRECTION_FADE, MotionConfig::set_direction_fade_ms),
            (KEY_BLINKER_DELAY, MotionConfig::set_blinker_delay_ms),
            (KEY_BLINKER_TIMEOUT, MotionConfig::set_blinker_timeout_ms),
            (KEY_BRAKING_SUSTAIN, MotionConfig::set_braking_sustain_ms),
            (KEY_PARK_STATIONARY_TIME, MotionConfig::set_park_stationary_time_ms),
            (KEY_IMPACT_COOLDOWN, MotionConfig::set_impact_cooldown_ms),
        ];
        for (key, set) in durations {
            if let Some(millis) = get_millis(store, key) {
                set(m, millis);
            }
        }

        if let Some(mode) = get_u8(store, KEY_BRAKING_EFFECT).and_then(BrakingMode::from_raw) {
            m.set_braking_mode(mode);
        }
    }

    fn load_calibration<S: SettingsStore + ?Sized>(&mut self, store: &S) {
        if get_bool(store, KEY_CALIBRATION_COMPLETE) != Some(true) {
            return;
        }
        let axes = (
            get_axis(store, KEY_FORWARD_AXIS),
            get_sign(store, KEY_FORWARD_SIGN),
            get_axis(store, KEY_LATERAL_AXIS),
            get_sign(store, KEY_LATERAL_SIGN),
        );
        let (Some(forward_axis), Some(forward_sign), Some(lateral_axis), Some(lateral_sign)) = axes
        else {
            log!("[Settings] incomplete calibration record, using raw axes");
            return;
        };
        self.calibration = CalibrationMapping {
            forward_axis,
            forward_sign,
            lateral_axis,
            lateral_sign,
            valid: true,
        };
    }

    /// Write every setting to `store`
    pub fn store<S: SettingsStore + ?Sized>(&self, store: &mut S) {
        let l = &self.lighting;
        let m = &self.motion;
        let c = &self.calibration;

        let ints = [
            (KEY_BRIGHTNESS, i32::from(l.brightness)),
            (KEY_EFFECT_SPEED, i32::from(l.effect_speed)),
            (KEY_PRESET, i32::from(l.preset.as_raw())),
            (KEY_HEADLIGHT_EFFECT, i32::from(l.headlight.effect.as_raw())),
            (KEY_TAILLIGHT_EFFECT, i32::from(l.taillight.effect.as_raw())),
            (KEY_HEADLIGHT_LED_COUNT, i32::from(l.led_count(Strip::Headlight))),
            (KEY_TAILLIGHT_LED_COUNT, i32::from(l.led_count(Strip::Taillight))),
            (KEY_PARK_EFFECT, i32::from(l.park.effect.as_raw())),
            (KEY_PARK_EFFECT_SPEED, i32::from(l.park.speed)),
            (KEY_PARK_BRIGHTNESS, i32::from(l.park.brightness)),
            (KEY_STARTUP_SEQUENCE, i32::from(l.startup.sequence.as_raw())),
            (KEY_STARTUP_DURATION, millis_i32(l.startup.duration())),
            (KEY_DIRECTION_SUSTAIN, millis_i32(m.direction_sustain())),
            (KEY_DIRECTION_FADE, millis_i32(m.direction_fade())),
            (KEY_BLINKER_DELAY, millis_i32(m.blinker_delay())),
            (KEY_BLINKER_TIMEOUT, millis_i32(m.blinker_timeout())),
            (KEY_BRAKING_SUSTAIN, millis_i32(m.braking_sustain())),
            (KEY_BRAKING_EFFECT, i32::from(m.braking_mode().as_raw())),
            (KEY_PARK_STATIONARY_TIME, millis_i32(m.park_stationary_time())),
            (KEY_IMPACT_COOLDOWN, millis_i32(m.impact_cooldown())),
            (KEY_FORWARD_AXIS, i32::from(c.forward_axis.as_raw())),
            (KEY_FORWARD_SIGN, i32::from(c.forward_sign)),
            (KEY_LATERAL_AXIS, i32::from(c.lateral_axis.as_raw())),
            (KEY_LATERAL_SIGN, i32::from(c.lateral_sign)),
        ];
        for (key, value) in ints {
            store.set(key, SettingValue::Int(value));
        }

        let floats = [
            (KEY_FORWARD_ACCEL_THRESHOLD, m.forward_accel_threshold()),
            (KEY_MOTION_SENSITIVITY, m.motion_sensitivity()),
            (KEY_BLINKER_THRESHOLD, m.blinker_threshold()),
            (KEY_BRAKING_THRESHOLD, m.braking_threshold()),
            (KEY_PARK_ACCEL_NOISE, m.park_accel_noise()),
            (KEY_PARK_GYRO_NOISE, m.park_gyro_noise()),
            (KEY_IMPACT_THRESHOLD, m.impact_threshold()),
        ];
        for (key, value) in floats {
            store.set(key, SettingValue::Float(value));
        }

        let colors = [
            (KEY_HEADLIGHT_COLOR, l.headlight.color),
            (KEY_TAILLIGHT_COLOR, l.taillight.color),
            (KEY_PARK_HEADLIGHT_COLOR, l.park.headlight_color),
            (KEY_PARK_TAILLIGHT_COLOR, l.park.taillight_color),
        ];
        for (key, value) in colors {
            store.set(key, SettingValue::Color(value));
        }

        let flags = [
            (KEY_SYNC_ENABLED, l.sync_enabled),
            (KEY_SYNC_LEADER, l.sync_leader),
            (KEY_MOTION_ENABLED, m.motion_enabled()),
            (KEY_DIRECTION_BASED_LIGHTING, m.direction_based_lighting()),
            (KEY_BLINKER_ENABLED, m.blinker_enabled()),
            (KEY_BRAKING_ENABLED, m.braking_enabled()),
            (KEY_PARK_MODE_ENABLED, m.park_enabled()),
            (KEY_IMPACT_DETECTION_ENABLED, m.impact_enabled()),
            (KEY_CALIBRATION_COMPLETE, c.valid),
        ];
        for (key, value) in flags {
            store.set(key, SettingValue::Bool(value));
        }
    }
}

fn millis_i32(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}
