//! Cross-vehicle lighting sync
//!
//! The leader publishes its look plus the animation step so followers can
//! run the same pattern in phase. Publishing is rate limited and pauses while
//! a motion override changes the local look.

use embassy_time::{Duration, Instant};

use crate::color::Rgb;
use crate::config::{LightingConfig, Preset};
use crate::effect::EffectId;

/// Minimum time between change-driven updates
pub const SYNC_MIN_INTERVAL: Duration = Duration::from_millis(200);
/// Update interval when nothing changed
pub const SYNC_KEEPALIVE: Duration = Duration::from_millis(1000);

/// Lighting state shared across vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncState {
    pub brightness: u8,
    pub effect_speed: u8,
    pub headlight_effect: EffectId,
    pub taillight_effect: EffectId,
    pub headlight_color: Rgb,
    pub taillight_color: Rgb,
    pub preset: Preset,
    /// Animation step of the sender
    pub step: u16,
    /// Strip length the step belongs to
    pub channel_length: u8,
}

impl SyncState {
    pub const fn capture(lighting: &LightingConfig, step: u16, channel_length: u8) -> Self {
        Self {
            brightness: lighting.brightness,
            effect_speed: lighting.effect_speed,
            headlight_effect: lighting.headlight.effect,
            taillight_effect: lighting.taillight.effect,
            headlight_color: lighting.headlight.color,
            taillight_color: lighting.taillight.color,
            preset: lighting.preset,
            step,
            channel_length,
        }
    }

    /// Copy the look into a local config
    pub const fn apply_to(&self, lighting: &mut LightingConfig) {
        lighting.brightness = self.brightness;
        lighting.effect_speed = self.effect_speed;
        lighting.headlight.effect = self.headlight_effect;
        lighting.taillight.effect = self.taillight_effect;
        lighting.headlight.color = self.headlight_color;
        lighting.taillight.color = self.taillight_color;
        lighting.preset = self.preset;
    }

    /// The remote step rescaled to a local strip of `local_length` LEDs.
    ///
    /// `step * local / remote`, wrapping at `u16`; unchanged when the remote
    /// length is unknown.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn local_step(&self, local_length: u8) -> u16 {
        if self.channel_length == 0 {
            return self.step;
        }
        ((self.step as u32 * local_length as u32) / self.channel_length as u32) as u16
    }

    /// Same look, ignoring the animation step
    fn same_look(&self, other: &Self) -> bool {
        Self {
            step: 0,
            channel_length: 0,
            ..*self
        } == Self {
            step: 0,
            channel_length: 0,
            ..*other
        }
    }
}

/// Leader-side publish scheduling
#[derive(Debug, Clone, Default)]
pub struct SyncPublisher {
    last: Option<(Instant, SyncState)>,
}

impl SyncPublisher {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// State to broadcast now, if any.
    ///
    /// Changes go out at most every [`SYNC_MIN_INTERVAL`]; an unchanged look
    /// is repeated every [`SYNC_KEEPALIVE`]. Nothing is published while
    /// `overrides_active`.
    pub fn poll(
        &mut self,
        state: SyncState,
        overrides_active: bool,
        now: Instant,
    ) -> Option<SyncState> {
        if overrides_active {
            return None;
        }
        let due = match &self.last {
            None => true,
            Some((at, previous)) => {
                let elapsed = now.saturating_duration_since(*at);
                elapsed >= SYNC_KEEPALIVE
                    || (!previous.same_look(&state) && elapsed >= SYNC_MIN_INTERVAL)
            }
        };
        if !due {
            return None;
        }
        self.last = Some((now, state));
        Some(state)
    }

    /// Publish on the next poll
    pub fn reset(&mut self) {
        self.last = None;
    }
}
