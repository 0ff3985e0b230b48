mod tests {
    use embassy_time::{Duration, Instant};
    use pev_light_orchestrator::transition::{BrightnessRamp, LinearFade};

    #[test]
    fn test_linear_fade_progress() {
        let fade = LinearFade::new(Instant::from_millis(100), Duration::from_millis(200));
        assert_eq!(fade.progress(Instant::from_millis(0)), 0.0);
        assert_eq!(fade.progress(Instant::from_millis(100)), 0.0);
        assert_eq!(fade.progress(Instant::from_millis(200)), 0.5);
        assert_eq!(fade.progress(Instant::from_millis(300)), 1.0);
        assert_eq!(fade.progress(Instant::from_millis(10_000)), 1.0);
    }

    #[test]
    fn test_zero_length_fade_is_complete() {
        let fade = LinearFade::new(Instant::from_millis(100), Duration::from_millis(0));
        assert_eq!(fade.progress(Instant::from_millis(100)), 1.0);
    }

    #[test]
    fn test_brightness_ramp() {
        let mut ramp = BrightnessRamp::new(0, Duration::from_millis(100));
        assert_eq!(ramp.current(), 0);
        assert!(!ramp.is_transitioning());

        ramp.set_target(100, Instant::from_millis(0));
        assert!(ramp.is_transitioning());
        assert_eq!(ramp.target(), 100);

        ramp.tick(Instant::from_millis(50));
        assert_eq!(ramp.current(), 50);

        ramp.tick(Instant::from_millis(100));
        assert_eq!(ramp.current(), 100);
        assert!(!ramp.is_transitioning());
    }

    #[test]
    fn test_brightness_ramp_retarget_keeps_running_ramp() {
        let mut ramp = BrightnessRamp::new(0, Duration::from_millis(100));
        ramp.set_target(200, Instant::from_millis(0));
        ramp.tick(Instant::from_millis(50));
        ramp.set_target(200, Instant::from_millis(50));
        ramp.tick(Instant::from_millis(100));
        assert_eq!(ramp.current(), 200);
    }

    #[test]
    fn test_brightness_ramp_reverses_from_current() {
        let mut ramp = BrightnessRamp::new(0, Duration::from_millis(100));
        ramp.set_target(200, Instant::from_millis(0));
        ramp.tick(Instant::from_millis(50));
        assert_eq!(ramp.current(), 100);

        ramp.set_target(0, Instant::from_millis(50));
        ramp.tick(Instant::from_millis(100));
        assert_eq!(ramp.current(), 50);
        ramp.tick(Instant::from_millis(150));
        assert_eq!(ramp.current(), 0);
    }

    #[test]
    fn test_zero_duration_ramp_is_immediate() {
        let mut ramp = BrightnessRamp::new(10, Duration::from_millis(0));
        ramp.set_target(90, Instant::from_millis(0));
        assert_eq!(ramp.current(), 90);
        assert!(!ramp.is_transitioning());
    }
}
