//! Guided five-pose mount calibration
//!
//! The operator holds the vehicle level, then tilted forward, backward, left
//! and right, confirming each pose with an explicit "next step" signal. The
//! forward axis is the axis that changes most between the forward and
//! backward poses; the lateral axis is found the same way from the left and
//! right poses.

use core::fmt;

use embassy_time::{Duration, Instant};

use super::{Axis, Vector3};
use crate::log::log;

/// Idle time after which a session silently restarts at the first pose
pub const CALIBRATION_TIMEOUT: Duration = Duration::from_secs(30);

const POSE_COUNT: usize = 5;

/// Calibration poses in capture order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CalibrationPose {
    Level = 0,
    Forward = 1,
    Backward = 2,
    Left = 3,
    Right = 4,
}

impl CalibrationPose {
    pub const ALL: [Self; POSE_COUNT] = [
        Self::Level,
        Self::Forward,
        Self::Backward,
        Self::Left,
        Self::Right,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Learned mapping from sensor axes to vehicle axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationMapping {
    pub forward_axis: Axis,
    /// +1 or -1
    pub forward_sign: i8,
    pub lateral_axis: Axis,
    /// +1 or -1, positive lateral means "left"
    pub lateral_sign: i8,
    pub valid: bool,
}

impl Default for CalibrationMapping {
    fn default() -> Self {
        Self::UNCALIBRATED
    }
}

impl CalibrationMapping {
    /// Raw X forward, raw Y lateral
    pub const UNCALIBRATED: Self = Self {
        forward_axis: Axis::X,
        forward_sign: 1,
        lateral_axis: Axis::Y,
        lateral_sign: 1,
        valid: false,
    };

    /// Derive a valid mapping from the four directional poses
    pub fn from_poses(forward: Vector3, backward: Vector3, left: Vector3, right: Vector3) -> Self {
        let (forward_axis, forward_sign) = dominant_axis(forward, backward);
        let (lateral_axis, lateral_sign) = dominant_axis(left, right);
        Self {
            forward_axis,
            forward_sign,
            lateral_axis,
            lateral_sign,
            valid: true,
        }
    }

    /// Acceleration along vehicle-forward, raw X when uncalibrated
    pub fn forward(&self, accel: Vector3) -> f32 {
        if self.valid {
            accel.axis(self.forward_axis) * f32::from(self.forward_sign)
        } else {
            accel.x
        }
    }

    /// Acceleration along vehicle-left, raw Y when uncalibrated
    pub fn lateral(&self, accel: Vector3) -> f32 {
        if self.valid {
            accel.axis(self.lateral_axis) * f32::from(self.lateral_sign)
        } else {
            accel.y
        }
    }
}

/// Axis with the largest absolute change from `b` to `a`, and the sign of
/// that change. Ties go to the earlier axis; a zero change counts as +1.
fn dominant_axis(a: Vector3, b: Vector3) -> (Axis, i8) {
    let mut best = Axis::X;
    let mut best_delta = a.x - b.x;
    for axis in [Axis::Y, Axis::Z] {
        let delta = a.axis(axis) - b.axis(axis);
        if libm::fabsf(delta) > libm::fabsf(best_delta) {
            best = axis;
            best_delta = delta;
        }
    }
    let sign = if best_delta < 0.0 { -1 } else { 1 };
    (best, sign)
}

/// Calibration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// A step was signaled while no session is running
    NotCapturing,
    /// No sensor sample available to capture
    SensorUnavailable,
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCapturing => f.write_str("calibration is not running"),
            Self::SensorUnavailable => f.write_str("no sensor sample to capture"),
        }
    }
}

/// Outcome of a captured pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationEvent {
    /// A pose was stored; `next` is the pose to present now
    Captured {
        pose: CalibrationPose,
        next: CalibrationPose,
    },
    /// The last pose was stored and a new mapping is in effect
    Complete(CalibrationMapping),
}

#[derive(Debug, Clone)]
struct CalibrationSession {
    step_index: u8,
    captured: [Vector3; POSE_COUNT],
    started_at: Instant,
    last_signal_at: Instant,
}

impl CalibrationSession {
    const fn new(now: Instant) -> Self {
        Self {
            step_index: 0,
            captured: [Vector3::new(0.0, 0.0, 0.0); POSE_COUNT],
            started_at: now,
            last_signal_at: now,
        }
    }
}

/// Calibration state machine: `Idle -> Capturing(0..4) -> Complete`
#[derive(Debug, Clone)]
pub struct Calibrator {
    session: Option<CalibrationSession>,
    mapping: CalibrationMapping,
    timeout: Duration,
}

impl Calibrator {
    pub const fn new(mapping: CalibrationMapping) -> Self {
        Self {
            session: None,
            mapping,
            timeout: CALIBRATION_TIMEOUT,
        }
    }

    pub const fn mapping(&self) -> CalibrationMapping {
        self.mapping
    }

    pub const fn is_capturing(&self) -> bool {
        self.session.is_some()
    }

    /// Index of the pose awaiting capture
    pub fn step(&self) -> Option<u8> {
        self.session.as_ref().map(|s| s.step_index)
    }

    /// Pose awaiting capture
    pub fn current_pose(&self) -> Option<CalibrationPose> {
        self.step()
            .and_then(|i| CalibrationPose::ALL.get(usize::from(i)).copied())
    }

    /// Start (or restart) a session at the first pose.
    ///
    /// The previous mapping stays in effect until the new session completes.
    pub fn start(&mut self, now: Instant) {
        log!("[Calibrator] session started");
        self.session = Some(CalibrationSession::new(now));
    }

    /// Restart a session that has been idle for longer than the timeout.
    ///
    /// Returns `true` if the session was restarted.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        if now.saturating_duration_since(session.last_signal_at) < self.timeout {
            return false;
        }
        log!(
            "[Calibrator] no signal for {}ms, restarting at pose 0",
            self.timeout.as_millis()
        );
        *session = CalibrationSession::new(now);
        true
    }

    /// Capture the current pose on an explicit "next step" signal
    pub fn capture(
        &mut self,
        accel: Vector3,
        now: Instant,
    ) -> Result<CalibrationEvent, CalibrationError> {
        self.poll(now);
        let session = self
            .session
            .as_mut()
            .ok_or(CalibrationError::NotCapturing)?;

        let index = usize::from(session.step_index);
        let Some(slot) = session.captured.get_mut(index) else {
            return Err(CalibrationError::NotCapturing);
        };
        *slot = accel;
        session.last_signal_at = now;
        let pose = CalibrationPose::ALL[index];
        log!("[Calibrator] captured pose {}", pose.as_str());

        if let Some(next) = CalibrationPose::ALL.get(index + 1).copied() {
            session.step_index += 1;
            return Ok(CalibrationEvent::Captured { pose, next });
        }

        let [_, forward, backward, left, right] = session.captured;
        let mapping = CalibrationMapping::from_poses(forward, backward, left, right);
        log!(
            "[Calibrator] complete after {}ms: forward {:?} {}, lateral {:?} {}",
            now.saturating_duration_since(session.started_at).as_millis(),
            mapping.forward_axis,
            mapping.forward_sign,
            mapping.lateral_axis,
            mapping.lateral_sign
        );
        self.mapping = mapping;
        self.session = None;
        Ok(CalibrationEvent::Complete(mapping))
    }

    /// Drop any session and fall back to raw axes
    pub fn reset(&mut self) {
        log!("[Calibrator] reset, using raw axes");
        self.session = None;
        self.mapping = CalibrationMapping::UNCALIBRATED;
    }
}
