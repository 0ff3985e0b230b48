mod tests {
    use embassy_time::Instant;
    use pev_light_orchestrator::frame_clock::{FRAME_INTERVAL, FrameClock};

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_increment_maps_speed_linearly() {
        assert_eq!(FrameClock::increment_x100(0), 10);
        assert_eq!(FrameClock::increment_x100(255), 800);
        assert_eq!(FrameClock::increment_x100(64), 208);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut clock = FrameClock::new();
        assert!(clock.tick(ms(0), 255, 10).fired);
        assert_eq!(clock.step(), 8);

        let early = clock.tick(ms(23), 255, 10);
        assert!(!early.fired);
        assert_eq!(early.step, 8);

        assert!(clock.tick(ms(24), 255, 10).fired);
        assert_eq!(clock.step(), 16);
        assert_eq!(clock.interval(), FRAME_INTERVAL);
    }

    #[test]
    fn test_fractional_steps_accumulate() {
        let mut clock = FrameClock::new();
        for frame in 0..10 {
            clock.tick(ms(frame * 24), 0, 10);
        }
        assert_eq!(clock.step(), 1);
    }

    #[test]
    fn test_empty_strip_never_fires() {
        let mut clock = FrameClock::new();
        let tick = clock.tick(ms(0), 255, 0);
        assert!(!tick.fired);
        assert_eq!(tick.step, 0);
        // state untouched: a real strip fires right away afterwards
        assert!(clock.tick(ms(1), 255, 5).fired);
    }

    #[test]
    fn test_step_wraps() {
        let mut clock = FrameClock::new();
        clock.set_step(u16::MAX);
        clock.tick(ms(0), 255, 10);
        assert_eq!(clock.step(), 7);
    }

    #[test]
    fn test_strips_of_different_length_share_step_stream() {
        let mut short = FrameClock::new();
        let mut long = FrameClock::new();
        let times = [0u64, 5, 24, 30, 49, 60, 61, 100, 101, 124, 250, 251, 275, 300];
        let mut last_fire: Option<u64> = None;
        for t in times {
            let a = short.tick(ms(t), 97, 8);
            let b = long.tick(ms(t), 97, 144);
            assert_eq!(a, b);
            if a.fired {
                if let Some(previous) = last_fire {
                    assert!(t - previous >= 24, "fired twice within {}ms", t - previous);
                }
                last_fire = Some(t);
            }
        }
    }

    #[test]
    fn test_speed_does_not_change_cadence() {
        for speed in [0u8, 128, 255] {
            let mut clock = FrameClock::new();
            let fired = (0..100u64)
                .filter(|t| clock.tick(ms(*t), speed, 10).fired)
                .count();
            // 0, 24, 48, 72, 96
            assert_eq!(fired, 5);
        }
    }
}
