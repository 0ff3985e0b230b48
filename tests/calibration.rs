mod tests {
    use embassy_time::Instant;
    use pev_light_orchestrator::motion::{
        Axis, CalibrationError, CalibrationEvent, CalibrationMapping, CalibrationPose,
        Calibrator, Vector3,
    };

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    const LEVEL: Vector3 = Vector3::new(0.0, 0.0, 1.0);
    const FORWARD: Vector3 = Vector3::new(0.1, 0.05, 0.9);
    const BACKWARD: Vector3 = Vector3::new(-0.1, 0.0, 0.85);
    const LEFT: Vector3 = Vector3::new(0.0, -0.4, 0.9);
    const RIGHT: Vector3 = Vector3::new(0.02, 0.4, 0.9);

    #[test]
    fn test_forward_axis_is_largest_delta() {
        let mapping = CalibrationMapping::from_poses(FORWARD, BACKWARD, LEFT, RIGHT);
        assert_eq!(mapping.forward_axis, Axis::X);
        assert_eq!(mapping.forward_sign, 1);
        assert!(mapping.valid);
    }

    #[test]
    fn test_lateral_sign_follows_left_minus_right() {
        let mapping = CalibrationMapping::from_poses(FORWARD, BACKWARD, LEFT, RIGHT);
        assert_eq!(mapping.lateral_axis, Axis::Y);
        assert_eq!(mapping.lateral_sign, -1);
        // tilting left now reads as positive lateral
        assert!(mapping.lateral(Vector3::new(0.0, -0.3, 0.9)) > 0.0);
    }

    #[test]
    fn test_axis_ties_go_to_earlier_axis() {
        let a = Vector3::new(0.5, 0.5, 0.5);
        let b = Vector3::new(0.0, 0.0, 0.0);
        let mapping = CalibrationMapping::from_poses(a, b, b, b);
        assert_eq!(mapping.forward_axis, Axis::X);
        assert_eq!(mapping.forward_sign, 1);
        // zero delta everywhere
        assert_eq!(mapping.lateral_axis, Axis::X);
        assert_eq!(mapping.lateral_sign, 1);
    }

    #[test]
    fn test_uncalibrated_uses_raw_axes() {
        let mapping = CalibrationMapping::UNCALIBRATED;
        let accel = Vector3::new(0.3, -0.2, 0.9);
        assert_eq!(mapping.forward(accel), 0.3);
        assert_eq!(mapping.lateral(accel), -0.2);
    }

    #[test]
    fn test_mapping_projects_with_sign() {
        let mapping = CalibrationMapping {
            forward_axis: Axis::Z,
            forward_sign: -1,
            lateral_axis: Axis::X,
            lateral_sign: 1,
            valid: true,
        };
        let accel = Vector3::new(0.25, 0.0, 0.5);
        assert_eq!(mapping.forward(accel), -0.5);
        assert_eq!(mapping.lateral(accel), 0.25);
    }

    #[test]
    fn test_full_session() {
        let mut calibrator = Calibrator::new(CalibrationMapping::UNCALIBRATED);
        assert!(!calibrator.is_capturing());
        calibrator.start(ms(0));
        assert_eq!(calibrator.current_pose(), Some(CalibrationPose::Level));

        assert_eq!(
            calibrator.capture(LEVEL, ms(1000)),
            Ok(CalibrationEvent::Captured {
                pose: CalibrationPose::Level,
                next: CalibrationPose::Forward,
            })
        );
        calibrator.capture(FORWARD, ms(2000)).unwrap();
        calibrator.capture(BACKWARD, ms(3000)).unwrap();
        calibrator.capture(LEFT, ms(4000)).unwrap();
        assert_eq!(calibrator.step(), Some(4));

        let event = calibrator.capture(RIGHT, ms(5000)).unwrap();
        let CalibrationEvent::Complete(mapping) = event else {
            panic!("expected completion, got {event:?}");
        };
        assert!(mapping.valid);
        assert_eq!(calibrator.mapping(), mapping);
        assert!(!calibrator.is_capturing());
        assert_eq!(calibrator.step(), None);
    }

    #[test]
    fn test_capture_without_session_fails() {
        let mut calibrator = Calibrator::new(CalibrationMapping::UNCALIBRATED);
        assert_eq!(
            calibrator.capture(LEVEL, ms(0)),
            Err(CalibrationError::NotCapturing)
        );
    }

    #[test]
    fn test_idle_session_restarts_at_first_pose() {
        let mut calibrator = Calibrator::new(CalibrationMapping::UNCALIBRATED);
        calibrator.start(ms(0));
        calibrator.capture(LEVEL, ms(1000)).unwrap();
        calibrator.capture(FORWARD, ms(2000)).unwrap();
        assert_eq!(calibrator.step(), Some(2));

        assert!(!calibrator.poll(ms(31_999)));
        assert!(calibrator.poll(ms(32_000)));
        assert_eq!(calibrator.step(), Some(0));
        assert!(calibrator.is_capturing());
    }

    #[test]
    fn test_late_capture_lands_on_first_pose() {
        let mut calibrator = Calibrator::new(CalibrationMapping::UNCALIBRATED);
        calibrator.start(ms(0));
        calibrator.capture(LEVEL, ms(1000)).unwrap();
        assert_eq!(
            calibrator.capture(FORWARD, ms(40_000)),
            Ok(CalibrationEvent::Captured {
                pose: CalibrationPose::Level,
                next: CalibrationPose::Forward,
            })
        );
    }

    #[test]
    fn test_previous_mapping_holds_during_session() {
        let previous = CalibrationMapping::from_poses(FORWARD, BACKWARD, LEFT, RIGHT);
        let mut calibrator = Calibrator::new(previous);
        calibrator.start(ms(0));
        assert_eq!(calibrator.mapping(), previous);
    }

    #[test]
    fn test_reset_returns_to_raw_axes() {
        let previous = CalibrationMapping::from_poses(FORWARD, BACKWARD, LEFT, RIGHT);
        let mut calibrator = Calibrator::new(previous);
        calibrator.start(ms(0));
        calibrator.reset();
        assert!(!calibrator.is_capturing());
        assert_eq!(calibrator.mapping(), CalibrationMapping::UNCALIBRATED);
        assert!(!calibrator.mapping().valid);
    }
}
