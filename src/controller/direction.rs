use embassy_time::Instant;

use crate::config::MotionConfig;
use crate::log::log;
use crate::transition::LinearFade;

/// Cross-fade state handed to the composer for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeFrame {
    /// Direction being faded to
    pub target_forward: bool,
    /// Blend factor in `[0.0, 1.0]`
    pub progress: f32,
}

/// Direction state as seen by one composed frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionFrame {
    pub moving_forward: bool,
    pub fade: Option<FadeFrame>,
}

impl Default for DirectionFrame {
    fn default() -> Self {
        Self {
            moving_forward: true,
            fade: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Stable,
    /// Opposite-direction signal seen since `since`
    Detecting { since: Instant, reached_full: bool },
    Fading {
        fade: LinearFade,
        progress: f32,
        completion_observed: bool,
    },
}

/// Debounced travel-direction detector with cross-fade timing
///
/// `Stable -> Detecting -> Fading -> Stable`. Leaving the current direction
/// uses a lower threshold than entering it; the flip commits one composed
/// frame after the fade was observed at full progress.
#[derive(Debug, Clone)]
pub struct DirectionController {
    moving_forward: bool,
    phase: Phase,
    filtered_forward: f32,
}

impl Default for DirectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionController {
    pub const fn new() -> Self {
        Self {
            moving_forward: true,
            phase: Phase::Stable,
            filtered_forward: 0.0,
        }
    }

    pub const fn is_moving_forward(&self) -> bool {
        self.moving_forward
    }

    /// A fade is running
    pub const fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Fading { .. })
    }

    pub const fn is_detecting(&self) -> bool {
        matches!(self.phase, Phase::Detecting { .. })
    }

    /// Last fade progress handed out, `0.0` outside a fade
    pub const fn fade_progress(&self) -> f32 {
        match self.phase {
            Phase::Fading { progress, .. } => progress,
            _ => 0.0,
        }
    }

    pub const fn filtered_forward(&self) -> f32 {
        self.filtered_forward
    }

    /// Feed the filtered forward acceleration of one classifier tick.
    ///
    /// Requests arriving while a fade runs are ignored; detection restarts
    /// only after the fade has committed.
    pub fn update(&mut self, filtered_forward: f32, config: &MotionConfig, now: Instant) {
        self.filtered_forward = filtered_forward;
        let opposing = if self.moving_forward {
            -filtered_forward
        } else {
            filtered_forward
        };
        let leave = config.direction_leave_threshold();
        let enter = config.forward_accel_threshold();

        match self.phase {
            Phase::Fading { .. } => {}
            Phase::Stable => {
                if opposing > leave {
                    self.phase = Phase::Detecting {
                        since: now,
                        reached_full: opposing >= enter,
                    };
                }
            }
            Phase::Detecting {
                since,
                reached_full,
            } => {
                if opposing.is_nan() || opposing <= leave {
                    self.phase = Phase::Stable;
                    return;
                }
                let reached_full = reached_full || opposing >= enter;
                if reached_full
                    && now.saturating_duration_since(since) >= config.direction_sustain()
                {
                    log!(
                        "[Direction] fading to {}",
                        if self.moving_forward { "backward" } else { "forward" }
                    );
                    self.phase = Phase::Fading {
                        fade: LinearFade::new(now, config.direction_fade()),
                        progress: 0.0,
                        completion_observed: false,
                    };
                } else {
                    self.phase = Phase::Detecting {
                        since,
                        reached_full,
                    };
                }
            }
        }
    }

    /// Direction state for the frame being composed; call once per frame.
    ///
    /// The first frame reaching full progress still shows the old direction
    /// with progress `1.0`; the next call commits the flip.
    pub fn frame(&mut self, now: Instant) -> DirectionFrame {
        let Phase::Fading {
            fade,
            progress,
            completion_observed,
        } = &mut self.phase
        else {
            return DirectionFrame {
                moving_forward: self.moving_forward,
                fade: None,
            };
        };

        if *completion_observed {
            self.moving_forward = !self.moving_forward;
            self.phase = Phase::Stable;
            log!(
                "[Direction] now moving {}",
                if self.moving_forward { "forward" } else { "backward" }
            );
            return DirectionFrame {
                moving_forward: self.moving_forward,
                fade: None,
            };
        }

        let current = fade.progress(now).max(*progress);
        *progress = current;
        if current >= 1.0 {
            *completion_observed = true;
        }
        DirectionFrame {
            moving_forward: self.moving_forward,
            fade: Some(FadeFrame {
                target_forward: !self.moving_forward,
                progress: current,
            }),
        }
    }

    /// Back to stable forward
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
