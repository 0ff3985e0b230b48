mod tests {
    use pev_light_orchestrator::motion::{
        CalibrationMapping, DEFAULT_FORWARD_ALPHA, MotionClassifier, MotionSample, Vector3,
        classify,
    };

    fn sample(x: f32, y: f32, z: f32) -> MotionSample {
        MotionSample::at_rest().with_accel(Vector3::new(x, y, z))
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_at_rest_is_still() {
        let motion = classify(
            &MotionSample::at_rest(),
            &CalibrationMapping::UNCALIBRATED,
            0.0,
            DEFAULT_FORWARD_ALPHA,
        );
        assert!(close(motion.stillness_magnitude, 0.0));
        assert!(close(motion.g_force, 1.0));
        assert!(close(motion.forward_accel, 0.0));
        assert!(close(motion.angular_rate, 0.0));
    }

    #[test]
    fn test_gyro_magnitude() {
        let moving = MotionSample::at_rest().with_gyro(Vector3::new(3.0, 4.0, 0.0));
        let motion = classify(&moving, &CalibrationMapping::UNCALIBRATED, 0.0, 0.7);
        assert!(close(motion.angular_rate, 5.0));
    }

    #[test]
    fn test_only_forward_is_filtered() {
        let mut classifier = MotionClassifier::new(0.7);
        let mapping = CalibrationMapping::UNCALIBRATED;

        let first = classifier.classify(&sample(1.0, 0.5, 1.0), &mapping);
        assert!(close(first.forward_accel, 0.3));
        assert!(close(first.raw_forward_accel, 1.0));
        assert!(close(first.lateral_accel, 0.5));

        let second = classifier.classify(&sample(1.0, 0.5, 1.0), &mapping);
        assert!(close(second.forward_accel, 0.51));
        assert!(close(classifier.filtered_forward(), 0.51));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut classifier = MotionClassifier::default();
        let mapping = CalibrationMapping::UNCALIBRATED;
        classifier.classify(&sample(2.0, 0.0, 1.0), &mapping);
        classifier.reset();
        assert_eq!(classifier.filtered_forward(), 0.0);
    }

    #[test]
    fn test_garbage_sample_does_not_poison_filter() {
        let mut classifier = MotionClassifier::new(0.5);
        let mapping = CalibrationMapping::UNCALIBRATED;
        classifier.classify(&sample(1.0, 0.0, 1.0), &mapping);
        classifier.classify(&sample(f32::NAN, 0.0, 1.0), &mapping);
        assert!(close(classifier.filtered_forward(), 0.5));
    }

    #[test]
    fn test_alpha_is_sanitized() {
        let mapping = CalibrationMapping::UNCALIBRATED;

        let mut classifier = MotionClassifier::new(f32::NAN);
        let motion = classifier.classify(&sample(1.0, 0.0, 1.0), &mapping);
        assert!(close(motion.forward_accel, 1.0 - DEFAULT_FORWARD_ALPHA));

        let mut classifier = MotionClassifier::new(5.0);
        let motion = classifier.classify(&sample(1.0, 0.0, 1.0), &mapping);
        assert!(close(motion.forward_accel, 0.01));
    }

    #[test]
    fn test_calibrated_projection() {
        let mapping = CalibrationMapping::from_poses(
            Vector3::new(0.0, 0.5, 0.9),
            Vector3::new(0.0, -0.5, 0.9),
            Vector3::new(-0.5, 0.0, 0.9),
            Vector3::new(0.5, 0.0, 0.9),
        );
        let motion = classify(&sample(0.2, 0.4, 1.0), &mapping, 0.0, 0.0);
        assert!(close(motion.forward_accel, 0.4));
        assert!(close(motion.lateral_accel, -0.2));
    }
}
