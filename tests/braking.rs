mod tests {
    use embassy_time::Instant;
    use pev_light_orchestrator::controller::{BRAKING_CYCLES, BrakingController};
    use pev_light_orchestrator::{BrakingMode, MotionConfig};

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    /// Braking that activated at 200ms while moving forward
    fn braking() -> (BrakingController, MotionConfig) {
        let config = MotionConfig::default();
        let mut braking = BrakingController::new();
        for t in (0..=200).step_by(50) {
            braking.update(-0.6, true, false, &config, ms(t));
        }
        assert!(braking.is_active());
        (braking, config)
    }

    #[test]
    fn test_requires_sustained_deceleration() {
        let config = MotionConfig::default();
        let mut braking = BrakingController::new();
        for t in (0..=150).step_by(50) {
            braking.update(-0.6, true, false, &config, ms(t));
        }
        assert!(!braking.is_active());
        braking.update(-0.6, true, false, &config, ms(200));
        assert!(braking.is_active());
        assert_eq!(braking.last_event_at(), Some(ms(200)));
    }

    #[test]
    fn test_interrupted_deceleration_restarts_timer() {
        let config = MotionConfig::default();
        let mut braking = BrakingController::new();
        braking.update(-0.6, true, false, &config, ms(0));
        braking.update(-0.6, true, false, &config, ms(100));
        braking.update(-0.1, true, false, &config, ms(150));
        braking.update(-0.6, true, false, &config, ms(200));
        braking.update(-0.6, true, false, &config, ms(350));
        assert!(!braking.is_active());
        braking.update(-0.6, true, false, &config, ms(400));
        assert!(braking.is_active());
    }

    #[test]
    fn test_not_while_moving_backward() {
        let config = MotionConfig::default();
        let mut braking = BrakingController::new();
        for t in (0..=1000).step_by(50) {
            braking.update(-0.6, false, false, &config, ms(t));
        }
        assert!(!braking.is_active());
    }

    #[test]
    fn test_not_while_parked() {
        let config = MotionConfig::default();
        let mut braking = BrakingController::new();
        for t in (0..=250).step_by(50) {
            braking.update(-0.6, true, true, &config, ms(t));
        }
        assert!(!braking.is_active());
        // the sustain timer kept running while parked
        braking.update(-0.6, true, false, &config, ms(300));
        assert!(braking.is_active());
    }

    #[test]
    fn test_releases_on_acceleration() {
        let (mut braking, config) = braking();
        braking.update(-0.2, true, false, &config, ms(250));
        assert!(braking.is_active());
        braking.update(0.0, true, false, &config, ms(300));
        assert!(!braking.is_active());
        assert_eq!(braking.intensity(ms(300)), None);
    }

    #[test]
    fn test_releases_when_parked() {
        let (mut braking, config) = braking();
        braking.update(-0.6, true, true, &config, ms(250));
        assert!(!braking.is_active());
    }

    #[test]
    fn test_releases_on_garbage_reading() {
        let (mut braking, config) = braking();
        braking.update(f32::NAN, true, false, &config, ms(250));
        assert!(!braking.is_active());
    }

    #[test]
    fn test_flash_cycles_saturate() {
        let (braking, _) = braking();
        assert_eq!(braking.mode(), BrakingMode::Flash);
        assert_eq!(braking.cycle_count(ms(200)), 0);
        assert_eq!(braking.cycle_count(ms(949)), 2);
        assert_eq!(braking.cycle_count(ms(950)), BRAKING_CYCLES);
        assert_eq!(braking.cycle_count(ms(60_000)), BRAKING_CYCLES);
    }

    #[test]
    fn test_flash_phases() {
        let (braking, _) = braking();
        assert_eq!(braking.intensity(ms(200)), Some(255));
        assert_eq!(braking.intensity(ms(324)), Some(255));
        assert_eq!(braking.intensity(ms(325)), Some(0));
        assert_eq!(braking.intensity(ms(450)), Some(255));
        // solid after the last cycle, even in what would be an off phase
        assert_eq!(braking.intensity(ms(1075)), Some(255));
    }

    #[test]
    fn test_pulse_phases() {
        let mut braking = BrakingController::new();
        braking.set_manual(true, BrakingMode::Pulse, ms(0));
        assert_eq!(braking.intensity(ms(0)), Some(0));
        assert_eq!(braking.intensity(ms(200)), Some(254));
        assert_eq!(braking.cycle_count(ms(1199)), 2);
        assert_eq!(braking.intensity(ms(1200)), Some(255));
    }

    #[test]
    fn test_mode_is_latched_at_activation() {
        let mut config = MotionConfig::default();
        let mut braking = BrakingController::new();
        braking.set_manual(true, BrakingMode::Flash, ms(0));
        assert_eq!(braking.cycle_count(ms(800)), BRAKING_CYCLES);

        // a later mode change must not restart the animation
        config.set_braking_mode(BrakingMode::Pulse);
        braking.update(-0.6, true, false, &config, ms(810));
        assert_eq!(braking.mode(), BrakingMode::Flash);
        assert_eq!(braking.cycle_count(ms(810)), BRAKING_CYCLES);
        assert_eq!(braking.intensity(ms(810)), Some(255));

        // the next activation picks up the new mode
        braking.set_manual(false, config.braking_mode(), ms(900));
        braking.set_manual(true, config.braking_mode(), ms(1000));
        assert_eq!(braking.mode(), BrakingMode::Pulse);
        assert_eq!(braking.intensity(ms(1000)), Some(0));
    }

    #[test]
    fn test_sensed_activation_uses_configured_mode() {
        let mut config = MotionConfig::default();
        config.set_braking_mode(BrakingMode::Pulse);
        let mut braking = BrakingController::new();
        for t in (0..=200).step_by(50) {
            braking.update(-0.6, true, false, &config, ms(t));
        }
        assert_eq!(braking.mode(), BrakingMode::Pulse);
        assert_eq!(braking.cycle_count(ms(1399)), 2);
        assert_eq!(braking.intensity(ms(1400)), Some(255));
    }

    #[test]
    fn test_manual_holds_until_released() {
        let config = MotionConfig::default();
        let mut braking = BrakingController::new();
        braking.set_manual(true, BrakingMode::Flash, ms(0));
        assert!(braking.is_active());
        assert!(braking.is_manual());

        braking.update(1.0, true, false, &config, ms(50));
        braking.update(-0.6, true, true, &config, ms(100));
        assert!(braking.is_active());

        braking.clear_sensed();
        assert!(braking.is_active());

        braking.set_manual(false, BrakingMode::Flash, ms(150));
        assert!(!braking.is_active());
        assert!(!braking.is_manual());
    }

    #[test]
    fn test_clear_sensed_drops_detected_braking() {
        let (mut braking, _) = braking();
        braking.clear_sensed();
        assert!(!braking.is_active());
    }
}
