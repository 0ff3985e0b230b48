use embassy_time::{Duration, Instant};

use crate::math8::lerp8;

/// Linear progress from 0.0 to 1.0 over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFade {
    started_at: Instant,
    duration: Duration,
}

impl LinearFade {
    pub const fn new(started_at: Instant, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
        }
    }

    /// Progress at `now`, clamped to `[0.0, 1.0]`.
    ///
    /// A zero-length fade is complete immediately.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, now: Instant) -> f32 {
        let duration_ms = self.duration.as_millis();
        if duration_ms == 0 {
            return 1.0;
        }
        let elapsed_ms = now.saturating_duration_since(self.started_at).as_millis();
        if elapsed_ms >= duration_ms {
            return 1.0;
        }
        elapsed_ms as f32 / duration_ms as f32
    }
}

/// Output brightness that ramps linearly toward its target
#[derive(Debug, Clone)]
pub struct BrightnessRamp {
    current: u8,
    source: u8,
    target: u8,
    duration: Duration,
    fade: Option<LinearFade>,
}

impl BrightnessRamp {
    pub const fn new(initial: u8, duration: Duration) -> Self {
        Self {
            current: initial,
            source: initial,
            target: initial,
            duration,
            fade: None,
        }
    }

    pub const fn current(&self) -> u8 {
        self.current
    }

    pub const fn target(&self) -> u8 {
        self.target
    }

    pub const fn is_transitioning(&self) -> bool {
        self.fade.is_some()
    }

    /// Start ramping toward `target` from the current value.
    ///
    /// Re-targeting to the value already aimed at keeps the running ramp.
    pub fn set_target(&mut self, target: u8, now: Instant) {
        if target == self.target {
            return;
        }
        self.source = self.current;
        self.target = target;
        if self.duration.as_millis() == 0 {
            self.current = target;
            self.fade = None;
        } else {
            self.fade = Some(LinearFade::new(now, self.duration));
        }
    }

    /// Advance the ramp to `now`.
    pub fn tick(&mut self, now: Instant) {
        let Some(fade) = self.fade else {
            return;
        };
        let progress = fade.progress(now);
        if progress >= 1.0 {
            self.current = self.target;
            self.source = self.target;
            self.fade = None;
            return;
        }
        self.current = lerp8(self.source, self.target, progress);
    }
}
