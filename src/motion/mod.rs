//! Inertial input: samples, mount calibration and classification

mod calibration;
mod classifier;

use core::fmt;

pub use calibration::{
    CALIBRATION_TIMEOUT, CalibrationError, CalibrationEvent, CalibrationMapping, CalibrationPose,
    Calibrator,
};
pub use classifier::{ClassifiedMotion, DEFAULT_FORWARD_ALPHA, MotionClassifier, classify};

/// Physical sensor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Axis {
    #[default]
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Three-axis reading in sensor coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Orientation angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

/// One inertial snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionSample {
    pub orientation: Orientation,
    /// Acceleration in g
    pub accel: Vector3,
    /// Angular rate in deg/s
    pub gyro: Vector3,
}

impl MotionSample {
    /// A sample at rest with gravity along +Z
    pub const fn at_rest() -> Self {
        Self {
            orientation: Orientation {
                pitch: 0.0,
                roll: 0.0,
                yaw: 0.0,
            },
            accel: Vector3::new(0.0, 0.0, 1.0),
            gyro: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    #[must_use]
    pub const fn with_accel(mut self, accel: Vector3) -> Self {
        self.accel = accel;
        self
    }

    #[must_use]
    pub const fn with_gyro(mut self, gyro: Vector3) -> Self {
        self.gyro = gyro;
        self
    }
}

/// Sensor read failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor does not answer on the bus
    Disconnected,
    /// The sensor answered with an unusable reading
    ReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("inertial sensor disconnected"),
            Self::ReadFailed => f.write_str("inertial sensor read failed"),
        }
    }
}

/// Polled inertial sensor
pub trait MotionSensor {
    /// Read the latest sample. No buffering: the newest value wins.
    fn sample(&mut self) -> Result<MotionSample, SensorError>;
}
