use embassy_time::{Duration, Instant};

use crate::config::{BrakingMode, MotionConfig};
use crate::log::log;
use crate::math8::triwave8;

/// Number of animated cycles before the overlay holds solid
pub const BRAKING_CYCLES: u8 = 3;

pub const FLASH_CYCLE: Duration = Duration::from_millis(250);
pub const PULSE_CYCLE: Duration = Duration::from_millis(400);

const fn cycle_of(mode: BrakingMode) -> Duration {
    match mode {
        BrakingMode::Flash => FLASH_CYCLE,
        BrakingMode::Pulse => PULSE_CYCLE,
    }
}

/// Deceleration detector with a bounded flash/pulse sequence
#[derive(Debug, Clone)]
pub struct BrakingController {
    active: bool,
    manual: bool,
    mode: BrakingMode,
    started_at: Instant,
    below_since: Option<Instant>,
    last_event_at: Option<Instant>,
}

impl Default for BrakingController {
    fn default() -> Self {
        Self::new()
    }
}

impl BrakingController {
    pub const fn new() -> Self {
        Self {
            active: false,
            manual: false,
            mode: BrakingMode::Flash,
            started_at: Instant::from_ticks(0),
            below_since: None,
            last_event_at: None,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn is_manual(&self) -> bool {
        self.manual
    }

    /// Time of the last activation
    pub const fn last_event_at(&self) -> Option<Instant> {
        self.last_event_at
    }

    /// Feed the unfiltered forward acceleration of one classifier tick.
    ///
    /// The sustain timer runs even while parked.
    pub fn update(
        &mut self,
        forward_accel: f32,
        moving_forward: bool,
        parked: bool,
        config: &MotionConfig,
        now: Instant,
    ) {
        if forward_accel < config.braking_threshold() {
            self.below_since.get_or_insert(now);
        } else {
            self.below_since = None;
        }

        if self.manual {
            return;
        }
        if self.active {
            if forward_accel.is_nan() || forward_accel >= 0.0 || parked {
                log!("[Braking] released");
                self.active = false;
            }
            return;
        }
        let Some(since) = self.below_since else {
            return;
        };
        if moving_forward
            && !parked
            && now.saturating_duration_since(since) >= config.braking_sustain()
        {
            self.activate(config.braking_mode(), now);
        }
    }

    fn activate(&mut self, mode: BrakingMode, now: Instant) {
        log!("[Braking] active");
        self.active = true;
        self.mode = mode;
        self.started_at = now;
        self.last_event_at = Some(now);
    }

    /// Operator command holding the braking overlay on
    pub fn set_manual(&mut self, on: bool, mode: BrakingMode, now: Instant) {
        if on {
            self.activate(mode, now);
            self.manual = true;
        } else {
            log!("[Braking] manual off");
            self.manual = false;
            self.active = false;
        }
    }

    /// Animation latched at activation
    pub const fn mode(&self) -> BrakingMode {
        self.mode
    }

    /// Completed animation cycles, saturating at [`BRAKING_CYCLES`]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cycle_count(&self, now: Instant) -> u8 {
        if !self.active {
            return 0;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_millis();
        let cycles = elapsed / cycle_of(self.mode).as_millis();
        cycles.min(u64::from(BRAKING_CYCLES)) as u8
    }

    /// Overlay intensity at `now`, `None` while inactive.
    ///
    /// Solid full intensity once the cycles are exhausted. The animation
    /// keeps the mode it was activated with until released.
    #[allow(clippy::cast_possible_truncation)]
    pub fn intensity(&self, now: Instant) -> Option<u8> {
        if !self.active {
            return None;
        }
        if self.cycle_count(now) >= BRAKING_CYCLES {
            return Some(u8::MAX);
        }
        let cycle = cycle_of(self.mode).as_millis();
        let phase = now.saturating_duration_since(self.started_at).as_millis() % cycle;
        let level = match self.mode {
            BrakingMode::Flash => {
                if phase < cycle / 2 {
                    u8::MAX
                } else {
                    0
                }
            }
            BrakingMode::Pulse => triwave8((phase * 256 / cycle) as u8),
        };
        Some(level)
    }

    /// Drop sensed state, keeping a manual override
    pub fn clear_sensed(&mut self) {
        self.below_since = None;
        if !self.manual {
            self.active = false;
        }
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.manual = false;
        self.below_since = None;
    }
}
