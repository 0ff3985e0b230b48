use embassy_time::{Duration, Instant};

use crate::config::MotionConfig;
use crate::log::log;

/// Half period of the indicator blink
pub const BLINK_HALF_PERIOD: Duration = Duration::from_millis(350);

/// Indicated turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Turn indicator driven by lateral acceleration or a manual command
#[derive(Debug, Clone)]
pub struct BlinkerController {
    active: Option<Side>,
    manual: bool,
    started_at: Instant,
    last_intent_at: Instant,
    /// Turn intent waiting out the activation delay
    candidate: Option<(Side, Instant)>,
}

impl Default for BlinkerController {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkerController {
    pub const fn new() -> Self {
        Self {
            active: None,
            manual: false,
            started_at: Instant::from_ticks(0),
            last_intent_at: Instant::from_ticks(0),
            candidate: None,
        }
    }

    pub const fn active(&self) -> Option<Side> {
        self.active
    }

    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub const fn is_manual(&self) -> bool {
        self.manual
    }

    /// Feed the lateral acceleration of one classifier tick (positive is left)
    pub fn update(&mut self, lateral_accel: f32, config: &MotionConfig, now: Instant) {
        if self.manual {
            return;
        }
        let threshold = config.turn_intent_threshold();
        let intent = if lateral_accel > threshold {
            Some(Side::Left)
        } else if lateral_accel < -threshold {
            Some(Side::Right)
        } else {
            None
        };

        if let Some(side) = self.active {
            match intent {
                Some(renewed) => {
                    self.last_intent_at = now;
                    if renewed != side {
                        self.activate(renewed, now);
                    }
                }
                None => {
                    if now.saturating_duration_since(self.last_intent_at)
                        >= config.blinker_timeout()
                    {
                        log!("[Blinker] {} off after inactivity", side.as_str());
                        self.active = None;
                    }
                }
            }
            return;
        }

        let Some(side) = intent else {
            self.candidate = None;
            return;
        };
        let since = match self.candidate {
            Some((candidate, since)) if candidate == side => since,
            _ => now,
        };
        self.candidate = Some((side, since));
        if now.saturating_duration_since(since) >= config.blinker_delay() {
            self.activate(side, now);
        }
    }

    fn activate(&mut self, side: Side, now: Instant) {
        log!("[Blinker] {} on", side.as_str());
        self.active = Some(side);
        self.started_at = now;
        self.last_intent_at = now;
        self.candidate = None;
    }

    /// Operator command: `Some` holds the blinker on until `None` is sent
    pub fn set_manual(&mut self, side: Option<Side>, now: Instant) {
        match side {
            Some(side) => {
                self.activate(side, now);
                self.manual = true;
            }
            None => {
                log!("[Blinker] manual off");
                self.reset();
            }
        }
    }

    /// Blink phase at `now`; `false` while inactive
    pub fn is_lit(&self, now: Instant) -> bool {
        if self.active.is_none() {
            return false;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_millis();
        (elapsed / BLINK_HALF_PERIOD.as_millis()) % 2 == 0
    }

    /// Drop sensed state, keeping a manual override
    pub fn clear_sensed(&mut self) {
        self.candidate = None;
        if !self.manual {
            self.active = None;
        }
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.manual = false;
        self.candidate = None;
    }
}
