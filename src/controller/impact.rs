use embassy_time::{Duration, Instant};

use crate::config::MotionConfig;
use crate::log::log;

/// Length of the transient flash after an impact
pub const IMPACT_FLASH: Duration = Duration::from_millis(300);
/// Half period of the impact flash
pub const IMPACT_FLASH_HALF_PERIOD: Duration = Duration::from_millis(50);

/// Refractory g-force spike trigger
#[derive(Debug, Clone, Default)]
pub struct ImpactController {
    last_fired_at: Option<Instant>,
}

impl ImpactController {
    pub const fn new() -> Self {
        Self {
            last_fired_at: None,
        }
    }

    pub const fn last_fired_at(&self) -> Option<Instant> {
        self.last_fired_at
    }

    /// Fire when `g_force` exceeds the threshold outside the cooldown window.
    ///
    /// Returns `true` if it fired on this call.
    pub fn update(&mut self, g_force: f32, config: &MotionConfig, now: Instant) -> bool {
        if g_force.is_nan() || g_force <= config.impact_threshold() {
            return false;
        }
        if let Some(last) = self.last_fired_at
            && now.saturating_duration_since(last) < config.impact_cooldown()
        {
            return false;
        }
        log!("[Impact] {}g", g_force);
        self.last_fired_at = Some(now);
        true
    }

    /// The transient flash is still running
    pub fn is_flashing(&self, now: Instant) -> bool {
        self.last_fired_at
            .is_some_and(|at| now.saturating_duration_since(at) < IMPACT_FLASH)
    }

    /// Flash phase at `now`
    pub fn is_lit(&self, now: Instant) -> bool {
        let Some(at) = self.last_fired_at else {
            return false;
        };
        let elapsed = now.saturating_duration_since(at);
        elapsed < IMPACT_FLASH
            && (elapsed.as_millis() / IMPACT_FLASH_HALF_PERIOD.as_millis()) % 2 == 0
    }

    pub fn reset(&mut self) {
        self.last_fired_at = None;
    }
}
