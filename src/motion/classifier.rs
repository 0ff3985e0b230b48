use super::{CalibrationMapping, MotionSample};

/// Default smoothing factor of the forward low-pass filter
pub const DEFAULT_FORWARD_ALPHA: f32 = 0.7;

/// Standard gravity in g
const GRAVITY: f32 = 1.0;

/// Per-tick signals derived from one sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassifiedMotion {
    /// Low-pass filtered vehicle-forward acceleration (g)
    pub forward_accel: f32,
    /// Unfiltered vehicle-forward acceleration (g)
    pub raw_forward_accel: f32,
    /// Vehicle-lateral acceleration (g), positive is left
    pub lateral_accel: f32,
    /// Deviation of the acceleration magnitude from 1 g
    pub stillness_magnitude: f32,
    /// Angular rate magnitude (deg/s)
    pub angular_rate: f32,
    /// Acceleration magnitude (g)
    pub g_force: f32,
}

/// Classify one sample given the previous filtered forward value.
///
/// `filtered = alpha * previous + (1 - alpha) * raw`
pub fn classify(
    sample: &MotionSample,
    mapping: &CalibrationMapping,
    previous_forward: f32,
    alpha: f32,
) -> ClassifiedMotion {
    let raw_forward = mapping.forward(sample.accel);
    let g_force = sample.accel.magnitude();
    ClassifiedMotion {
        forward_accel: alpha * previous_forward + (1.0 - alpha) * raw_forward,
        raw_forward_accel: raw_forward,
        lateral_accel: mapping.lateral(sample.accel),
        stillness_magnitude: libm::fabsf(g_force - GRAVITY),
        angular_rate: sample.gyro.magnitude(),
        g_force,
    }
}

/// Stateful wrapper that owns the forward filter value
#[derive(Debug, Clone)]
pub struct MotionClassifier {
    filtered_forward: f32,
    alpha: f32,
}

impl Default for MotionClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_FORWARD_ALPHA)
    }
}

impl MotionClassifier {
    /// `alpha` is clamped to `[0.0, 0.99]`; non-finite values use the default
    pub fn new(alpha: f32) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 0.99)
        } else {
            DEFAULT_FORWARD_ALPHA
        };
        Self {
            filtered_forward: 0.0,
            alpha,
        }
    }

    pub fn classify(&mut self, sample: &MotionSample, mapping: &CalibrationMapping) -> ClassifiedMotion {
        let motion = classify(sample, mapping, self.filtered_forward, self.alpha);
        if motion.forward_accel.is_finite() {
            self.filtered_forward = motion.forward_accel;
        }
        motion
    }

    pub const fn filtered_forward(&self) -> f32 {
        self.filtered_forward
    }

    /// Forget the filter history
    pub fn reset(&mut self) {
        self.filtered_forward = 0.0;
    }
}
