mod tests {
    use embassy_time::Instant;
    use pev_light_orchestrator::controller::{
        BlinkerController, ImpactController, ParkController,
    };
    use pev_light_orchestrator::{BrakingMode, ClassifiedMotion, Controllers, MotionConfig, Side};

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    fn still() -> ClassifiedMotion {
        ClassifiedMotion {
            g_force: 1.0,
            ..ClassifiedMotion::default()
        }
    }

    #[test]
    fn test_park_after_stationary_time() {
        let config = MotionConfig::default();
        let mut park = ParkController::new();
        for t in (0..=1950).step_by(50) {
            park.update(0.02, 0.1, &config, ms(t));
        }
        assert!(!park.is_active());
        park.update(0.02, 0.1, &config, ms(2000));
        assert!(park.is_active());
        assert_eq!(park.still_since(), Some(ms(0)));
    }

    #[test]
    fn test_park_leaves_on_any_excursion() {
        let config = MotionConfig::default();
        let mut park = ParkController::new();
        for t in (0..=2000).step_by(50) {
            park.update(0.0, 0.0, &config, ms(t));
        }
        assert!(park.is_active());

        // a gyro spike alone is enough
        park.update(0.0, 2.0, &config, ms(2050));
        assert!(!park.is_active());
        assert_eq!(park.still_since(), None);

        park.update(0.0, 0.0, &config, ms(2100));
        park.update(0.0, 0.0, &config, ms(4050));
        assert!(!park.is_active());
        park.update(0.0, 0.0, &config, ms(4100));
        assert!(park.is_active());
    }

    #[test]
    fn test_blinker_waits_for_delay() {
        let config = MotionConfig::default();
        let mut blinker = BlinkerController::new();
        for t in (0..=250).step_by(50) {
            blinker.update(0.4, &config, ms(t));
        }
        assert!(!blinker.is_active());
        blinker.update(0.4, &config, ms(300));
        assert_eq!(blinker.active(), Some(Side::Left));
    }

    #[test]
    fn test_blinker_negative_lateral_is_right() {
        let config = MotionConfig::default();
        let mut blinker = BlinkerController::new();
        for t in (0..=300).step_by(50) {
            blinker.update(-0.4, &config, ms(t));
        }
        assert_eq!(blinker.active(), Some(Side::Right));
    }

    #[test]
    fn test_blinker_candidate_restarts_on_side_change() {
        let config = MotionConfig::default();
        let mut blinker = BlinkerController::new();
        for t in (0..=200).step_by(50) {
            blinker.update(0.4, &config, ms(t));
        }
        for t in (250..=500).step_by(50) {
            blinker.update(-0.4, &config, ms(t));
        }
        assert!(!blinker.is_active());
        blinker.update(-0.4, &config, ms(550));
        assert_eq!(blinker.active(), Some(Side::Right));
    }

    #[test]
    fn test_blinker_times_out() {
        let config = MotionConfig::default();
        let mut blinker = BlinkerController::new();
        for t in (0..=300).step_by(50) {
            blinker.update(0.4, &config, ms(t));
        }
        for t in (350..=2250).step_by(50) {
            blinker.update(0.0, &config, ms(t));
        }
        assert!(blinker.is_active());
        blinker.update(0.0, &config, ms(2300));
        assert!(!blinker.is_active());
    }

    #[test]
    fn test_blinker_renewed_intent_extends() {
        let config = MotionConfig::default();
        let mut blinker = BlinkerController::new();
        for t in (0..=300).step_by(50) {
            blinker.update(0.4, &config, ms(t));
        }
        blinker.update(0.4, &config, ms(1000));
        blinker.update(0.0, &config, ms(2950));
        assert!(blinker.is_active());
        blinker.update(0.0, &config, ms(3000));
        assert!(!blinker.is_active());
    }

    #[test]
    fn test_blinker_switches_side_immediately() {
        let config = MotionConfig::default();
        let mut blinker = BlinkerController::new();
        for t in (0..=300).step_by(50) {
            blinker.update(0.4, &config, ms(t));
        }
        blinker.update(-0.4, &config, ms(350));
        assert_eq!(blinker.active(), Some(Side::Right));
    }

    #[test]
    fn test_blinker_sensitivity_scales_threshold() {
        let mut config = MotionConfig::default();
        config.set_motion_sensitivity(2.0).unwrap();
        let mut blinker = BlinkerController::new();
        for t in (0..=1000).step_by(50) {
            blinker.update(0.4, &config, ms(t));
        }
        assert!(!blinker.is_active());
    }

    #[test]
    fn test_blinker_cadence() {
        let mut blinker = BlinkerController::new();
        assert!(!blinker.is_lit(ms(0)));
        blinker.set_manual(Some(Side::Left), ms(1000));
        assert!(blinker.is_lit(ms(1000)));
        assert!(blinker.is_lit(ms(1349)));
        assert!(!blinker.is_lit(ms(1350)));
        assert!(!blinker.is_lit(ms(1699)));
        assert!(blinker.is_lit(ms(1700)));
    }

    #[test]
    fn test_manual_blinker_ignores_motion() {
        let config = MotionConfig::default();
        let mut blinker = BlinkerController::new();
        blinker.set_manual(Some(Side::Right), ms(0));
        assert!(blinker.is_manual());
        for t in (0..=10_000).step_by(50) {
            blinker.update(0.4, &config, ms(t));
        }
        assert_eq!(blinker.active(), Some(Side::Right));

        blinker.clear_sensed();
        assert_eq!(blinker.active(), Some(Side::Right));

        blinker.set_manual(None, ms(10_050));
        assert!(!blinker.is_active());
        assert!(!blinker.is_manual());
    }

    #[test]
    fn test_impact_cooldown() {
        let config = MotionConfig::default();
        let mut impact = ImpactController::new();
        assert!(!impact.update(3.0, &config, ms(0)));
        assert!(impact.update(3.5, &config, ms(0)));
        assert!(!impact.update(8.0, &config, ms(999)));
        assert_eq!(impact.last_fired_at(), Some(ms(0)));
        assert!(impact.update(8.0, &config, ms(1000)));
        assert_eq!(impact.last_fired_at(), Some(ms(1000)));
        assert!(!impact.update(f32::NAN, &config, ms(5000)));
    }

    #[test]
    fn test_impact_flash_pattern() {
        let config = MotionConfig::default();
        let mut impact = ImpactController::new();
        assert!(!impact.is_lit(ms(0)));
        impact.update(4.0, &config, ms(100));
        assert!(impact.is_lit(ms(100)));
        assert!(impact.is_lit(ms(149)));
        assert!(!impact.is_lit(ms(150)));
        assert!(impact.is_lit(ms(200)));
        assert!(impact.is_flashing(ms(399)));
        assert!(!impact.is_flashing(ms(400)));
        assert!(!impact.is_lit(ms(400)));
    }

    #[test]
    fn test_direction_follows_flag() {
        let mut config = MotionConfig::default();
        let mut controllers = Controllers::new();
        let braking_back = ClassifiedMotion {
            forward_accel: -0.5,
            ..still()
        };
        for t in (0..=1000).step_by(50) {
            controllers.update(&braking_back, &config, ms(t));
        }
        assert!(!controllers.direction.is_detecting());
        assert!(!controllers.direction.is_pending());

        config.set_direction_based_lighting(true);
        for t in (1050..=1550).step_by(50) {
            controllers.update(&braking_back, &config, ms(t));
        }
        assert!(controllers.direction.is_pending());
    }

    #[test]
    fn test_braking_waits_while_parked() {
        let config = MotionConfig::default();
        let mut controllers = Controllers::new();
        for t in (0..=2000).step_by(50) {
            controllers.update(&still(), &config, ms(t));
        }
        assert!(controllers.park.is_active());

        let decelerating = ClassifiedMotion {
            raw_forward_accel: -1.0,
            ..still()
        };
        for t in (2050..=2500).step_by(50) {
            controllers.update(&decelerating, &config, ms(t));
        }
        assert!(controllers.park.is_active());
        assert!(!controllers.braking.is_active());
    }

    #[test]
    fn test_disabled_controllers_are_skipped() {
        let mut config = MotionConfig::default();
        config.set_park_enabled(false);
        config.set_impact_enabled(false);
        let mut controllers = Controllers::new();
        let spike = ClassifiedMotion {
            g_force: 5.0,
            ..still()
        };
        for t in (0..=3000).step_by(50) {
            controllers.update(&spike, &config, ms(t));
        }
        assert!(!controllers.park.is_active());
        assert_eq!(controllers.impact.last_fired_at(), None);
    }

    #[test]
    fn test_apply_enabled_resets_disabled() {
        let mut config = MotionConfig::default();
        let mut controllers = Controllers::new();
        controllers.blinker.set_manual(Some(Side::Left), ms(0));
        controllers
            .braking
            .set_manual(true, BrakingMode::Flash, ms(0));
        assert!(controllers.overrides_active());

        config.set_blinker_enabled(false);
        controllers.apply_enabled(&config);
        assert!(!controllers.blinker.is_active());
        assert!(controllers.braking.is_active());

        config.set_braking_enabled(false);
        controllers.apply_enabled(&config);
        assert!(!controllers.overrides_active());
    }

    #[test]
    fn test_clear_sensed_keeps_manual_overrides() {
        let config = MotionConfig::default();
        let mut controllers = Controllers::new();
        for t in (0..=2000).step_by(50) {
            controllers.update(&still(), &config, ms(t));
        }
        controllers.blinker.set_manual(Some(Side::Right), ms(2000));
        controllers.clear_sensed();
        assert!(!controllers.park.is_active());
        assert_eq!(controllers.blinker.active(), Some(Side::Right));
        assert!(controllers.overrides_active());
    }
}
