//! Fixed-cadence animation clock, one per physical strip.
//!
//! Frames fire on a constant interval no matter what speed is requested.
//! Speed only changes how far the step counter advances per fired frame, so
//! slow effects never stutter and strips of different length driven by the
//! same speed share one step stream.

use embassy_time::{Duration, Instant};

/// Fixed frame interval (~42 frames per second).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(24);

/// Smallest step increment per frame, scaled by 100 (0.1 steps).
pub const MIN_STEP_X100: u16 = 10;

/// Largest step increment per frame, scaled by 100 (8.0 steps).
pub const MAX_STEP_X100: u16 = 800;

/// Result of a clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Whether a frame interval elapsed and the step advanced.
    pub fired: bool,
    /// The step counter after this tick.
    pub step: u16,
}

/// Per-strip animation clock decoupled from wall time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    interval: Duration,
    step: u16,
    /// Fractional step remainder, scaled by 100.
    accumulator: u16,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub const fn new() -> Self {
        Self {
            last_frame: None,
            interval: FRAME_INTERVAL,
            step: 0,
            accumulator: 0,
        }
    }

    /// Step increment per fired frame for `speed`, scaled by 100.
    ///
    /// Maps 0..=255 linearly onto 0.1..=8.0.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn increment_x100(speed: u8) -> u16 {
        let span = (MAX_STEP_X100 - MIN_STEP_X100) as u32;
        MIN_STEP_X100 + ((speed as u32 * span) / 255) as u16
    }

    /// Advance the clock if a frame interval has elapsed.
    ///
    /// Returns `fired == false` and leaves the clock untouched when called
    /// early or for an empty strip.
    pub fn tick(&mut self, now: Instant, speed: u8, channel_length: u8) -> FrameTick {
        if channel_length == 0 || !self.is_due(now) {
            return FrameTick {
                fired: false,
                step: self.step,
            };
        }

        self.last_frame = Some(now);
        let total = self.accumulator + Self::increment_x100(speed);
        self.step = self.step.wrapping_add(total / 100);
        self.accumulator = total % 100;

        FrameTick {
            fired: true,
            step: self.step,
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        match self.last_frame {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub const fn step(&self) -> u16 {
        self.step
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Adopt an externally supplied step (cross-vehicle sync).
    ///
    /// The fractional remainder is dropped so both vehicles continue from
    /// the same whole step.
    pub fn set_step(&mut self, step: u16) {
        self.step = step;
        self.accumulator = 0;
    }
}
