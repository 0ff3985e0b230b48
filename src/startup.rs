//! Power-on animations
//!
//! A sequence plays once at boot (and on request) and owns both strips while
//! it runs. Each sequence is a pure function of its progress in `[0.0, 1.0]`.

use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb, fill, scale_color};
use crate::log::log;
use crate::math8::lerp8;
use crate::transition::LinearFade;

/// Startup animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum StartupSequence {
    /// No animation
    #[default]
    None = 0,
    /// Both strips brighten from black
    PowerOn = 1,
    /// A dot bounces end to end twice
    Scan = 2,
    /// Light spreads from the center outward
    Wave = 3,
    /// Light fills from the first LED to the last
    Race = 4,
}

impl StartupSequence {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::PowerOn,
        Self::Scan,
        Self::Wave,
        Self::Race,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PowerOn => "power_on",
            Self::Scan => "scan",
            Self::Wave => "wave",
            Self::Race => "race",
        }
    }
}

/// Frame of a running startup sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupFrame {
    pub sequence: StartupSequence,
    pub progress: f32,
}

#[derive(Debug, Clone, Copy)]
struct Running {
    sequence: StartupSequence,
    fade: LinearFade,
    finished: bool,
}

/// Plays one startup sequence at a time
#[derive(Debug, Clone, Default)]
pub struct StartupPlayer {
    running: Option<Running>,
}

impl StartupPlayer {
    pub const fn new() -> Self {
        Self { running: None }
    }

    pub const fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start `sequence`, replacing any running one. `None` stops playback.
    pub fn start(&mut self, sequence: StartupSequence, duration: Duration, now: Instant) {
        if sequence == StartupSequence::None {
            self.running = None;
            return;
        }
        log!(
            "[Startup] playing {} for {}ms",
            sequence.as_str(),
            duration.as_millis()
        );
        self.running = Some(Running {
            sequence,
            fade: LinearFade::new(now, duration),
            finished: false,
        });
    }

    /// Frame at `now`; `None` once the sequence has finished.
    ///
    /// The frame at full progress is returned exactly once.
    pub fn poll(&mut self, now: Instant) -> Option<StartupFrame> {
        let running = self.running.as_mut()?;
        if running.finished {
            self.running = None;
            return None;
        }
        let progress = running.fade.progress(now);
        running.finished = progress >= 1.0;
        Some(StartupFrame {
            sequence: running.sequence,
            progress,
        })
    }
}

/// Draw `sequence` at `progress` into one strip
pub fn render_startup(sequence: StartupSequence, progress: f32, leds: &mut [Rgb], color: Rgb) {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    match sequence {
        StartupSequence::None => fill(leds, BLACK),
        StartupSequence::PowerOn => fill(leds, scale_color(color, lerp8(0, 255, p))),
        StartupSequence::Scan => scan(leds, color, p),
        StartupSequence::Wave => wave(leds, color, p),
        StartupSequence::Race => race(leds, color, p),
    }
}

const SCAN_TRAIL: [u8; 4] = [255, 96, 32, 8];

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scan(leds: &mut [Rgb], color: Rgb, p: f32) {
    let span = leds.len().saturating_sub(1) as f32;
    // two passes: out and back, twice
    let travel = libm::fmodf(p * 4.0, 2.0);
    let head = if travel <= 1.0 { travel } else { 2.0 - travel };
    let pos = libm::roundf(head * span) as usize;
    for (i, led) in leds.iter_mut().enumerate() {
        let level = SCAN_TRAIL.get(i.abs_diff(pos)).copied().unwrap_or(0);
        *led = scale_color(color, level);
    }
}

#[allow(clippy::cast_precision_loss)]
fn wave(leds: &mut [Rgb], color: Rgb, p: f32) {
    let len = leds.len() as f32;
    let center = (len - 1.0) / 2.0;
    let reach = p * len / 2.0;
    for (i, led) in leds.iter_mut().enumerate() {
        let distance = libm::fabsf(i as f32 - center);
        *led = if distance < reach { color } else { BLACK };
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn race(leds: &mut [Rgb], color: Rgb, p: f32) {
    let lit = libm::roundf(p * leds.len() as f32) as usize;
    for (i, led) in leds.iter_mut().enumerate() {
        *led = if i < lit { color } else { BLACK };
    }
}
