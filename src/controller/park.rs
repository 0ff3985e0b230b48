use embassy_time::Instant;

use crate::config::MotionConfig;
use crate::log::log;

/// Stillness detector
#[derive(Debug, Clone, Default)]
pub struct ParkController {
    active: bool,
    still_since: Option<Instant>,
}

impl ParkController {
    pub const fn new() -> Self {
        Self {
            active: false,
            still_since: None,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn still_since(&self) -> Option<Instant> {
        self.still_since
    }

    /// Feed the stillness magnitude (g) and angular rate (deg/s) of one tick.
    ///
    /// Any excursion above the noise thresholds resets the timer and leaves
    /// park immediately.
    pub fn update(
        &mut self,
        stillness_magnitude: f32,
        angular_rate: f32,
        config: &MotionConfig,
        now: Instant,
    ) {
        let still = stillness_magnitude < config.park_accel_noise()
            && angular_rate < config.park_gyro_noise();
        if !still {
            self.still_since = None;
            if self.active {
                log!("[Park] motion detected, leaving park");
                self.active = false;
            }
            return;
        }

        let since = *self.still_since.get_or_insert(now);
        if !self.active && now.saturating_duration_since(since) >= config.park_stationary_time() {
            log!("[Park] stationary, entering park");
            self.active = true;
        }
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.still_since = None;
    }
}
