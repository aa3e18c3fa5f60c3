mod common;

mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use lumen_light::color::convert;
    use lumen_light::effect::rainbow_pixel;
    use lumen_light::gamma::gamma_rgb;
    use lumen_light::{
        ConversionAlgorithm, ControlMode, Duration, FrameScheduler, Instant, LightingConfig,
        Renderer, Rgb, Rgbw, SharedControl,
    };

    use crate::common::RecordingSink;

    fn animated_frame(phase: usize, algorithm: ConversionAlgorithm) -> Vec<Rgbw> {
        (0..8)
            .map(|i| convert(gamma_rgb(rainbow_pixel(i, phase, 8)), algorithm))
            .collect()
    }

    #[test]
    fn test_animation_renders_then_advances() {
        let control = SharedControl::new();
        let mut renderer: Renderer<'_, 8> = Renderer::new(&control, &LightingConfig::default());

        assert_eq!(renderer.render(), animated_frame(0, ConversionAlgorithm::None));
        assert_eq!(renderer.phase(), 1);
        assert_eq!(renderer.render(), animated_frame(1, ConversionAlgorithm::None));
        assert_eq!(renderer.mode(), ControlMode::Animated);
    }

    #[test]
    fn test_override_latches() {
        let control = SharedControl::new();
        let mut renderer: Renderer<'_, 8> = Renderer::new(&control, &LightingConfig::default());
        renderer.render();

        assert!(control.apply_override(Rgb::new(10, 20, 30)));
        assert!(!control.apply_override(Rgb::new(10, 20, 30)));

        let expected = vec![Rgbw::from(gamma_rgb(Rgb::new(10, 20, 30))); 8];
        for _ in 0..300 {
            assert_eq!(renderer.render(), expected);
        }
        assert_eq!(renderer.phase(), 1);
        assert_eq!(control.mode(), ControlMode::Overridden);

        // Black is a valid override and does not bring the animation back
        control.apply_override(Rgb::new(0, 0, 0));
        assert_eq!(renderer.render(), vec![Rgbw::default(); 8]);
        assert_eq!(control.mode(), ControlMode::Overridden);
    }

    #[test]
    fn test_rgbw_conversion_applied_after_gamma() {
        let control = SharedControl::new();
        let config = LightingConfig {
            algorithm: ConversionAlgorithm::Min,
            ..LightingConfig::default()
        };
        let mut renderer: Renderer<'_, 8> = Renderer::new(&control, &config);
        assert_eq!(renderer.render(), animated_frame(0, ConversionAlgorithm::Min));

        control.apply_override(Rgb::new(200, 180, 160));
        let pixel = convert(gamma_rgb(Rgb::new(200, 180, 160)), ConversionAlgorithm::Min);
        assert!(pixel.w > 0);
        assert_eq!(renderer.render(), vec![pixel; 8]);
    }

    #[test]
    fn test_scheduler_ten_ticks_then_override() {
        let control = SharedControl::new();
        let renderer: Renderer<'_, 8> = Renderer::new(&control, &LightingConfig::default());
        let mut scheduler = FrameScheduler::new(renderer, RecordingSink::default());

        // Ticks 0 to 10
        let mut now = Instant::from_millis(0);
        for _ in 0..=10 {
            scheduler.tick(now);
            now += Duration::from_millis(20);
        }
        assert_eq!(scheduler.sink().last_frame(), animated_frame(10, ConversionAlgorithm::None));
        assert_eq!(scheduler.renderer().phase(), 11);

        control.apply_override(Rgb::new(10, 20, 30));
        let expected = vec![Rgbw::from(gamma_rgb(Rgb::new(10, 20, 30))); 8];
        for _ in 0..6 {
            scheduler.tick(now);
            now += Duration::from_millis(20);
            assert_eq!(scheduler.sink().last_frame(), expected);
        }
        assert_eq!(scheduler.renderer().phase(), 11);
    }

    #[test]
    fn test_scheduler_timing_and_heartbeat() {
        let control = SharedControl::new();
        let renderer: Renderer<'_, 4> = Renderer::new(&control, &LightingConfig::default());
        let mut scheduler = FrameScheduler::new(renderer, RecordingSink::default());

        let first = scheduler.tick(Instant::from_millis(1000));
        assert!(first.heartbeat);
        assert_eq!(first.next_deadline, Instant::from_millis(1020));
        assert_eq!(first.sleep_duration, Duration::from_millis(20));

        let second = scheduler.tick(Instant::from_millis(1025));
        assert!(!second.heartbeat);
        assert_eq!(second.next_deadline, Instant::from_millis(1040));
        assert_eq!(second.sleep_duration, Duration::from_millis(15));

        assert!(!scheduler.tick(Instant::from_millis(1999)).heartbeat);
        assert!(scheduler.tick(Instant::from_millis(2000)).heartbeat);

        // Long stall: timing restarts from now instead of bursting
        let late = scheduler.tick(Instant::from_millis(5000));
        assert_eq!(late.next_deadline, Instant::from_millis(5020));
    }

    #[test]
    fn test_sink_failures_do_not_stop_the_loop() {
        let control = SharedControl::new();
        let renderer: Renderer<'_, 8> = Renderer::new(&control, &LightingConfig::default());
        let sink = RecordingSink {
            fail_next: 3,
            ..RecordingSink::default()
        };
        let mut scheduler = FrameScheduler::new(renderer, sink);

        let mut now = Instant::from_millis(0);
        for expected_failures in 1..=3 {
            let result = scheduler.tick(now);
            assert!(result.emitted.is_err());
            assert_eq!(scheduler.failed_frames(), expected_failures);
            now += Duration::from_millis(20);
        }

        let result = scheduler.tick(now);
        assert!(result.emitted.is_ok());
        assert_eq!(scheduler.failed_frames(), 0);
        assert_eq!(scheduler.sink().frames.len(), 1);
        // The animation kept moving through the failed frames
        assert_eq!(scheduler.sink().last_frame(), animated_frame(3, ConversionAlgorithm::None));
    }

    #[test]
    fn test_concurrent_writes_never_tear_a_frame() {
        let control = SharedControl::new();
        let mut renderer: Renderer<'_, 8> = Renderer::new(&control, &LightingConfig::default());
        let writer_done = AtomicBool::new(false);

        thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..50 {
                    for k in 0..=255u8 {
                        control.apply_override(Rgb::new(k, k, k));
                    }
                }
                writer_done.store(true, Ordering::Release);
            });

            let mut overridden = false;
            let mut frames = 0;
            while !writer_done.load(Ordering::Acquire) || frames < 100 {
                let phase = usize::from(renderer.phase());
                renderer.render();
                frames += 1;
                let frame = renderer.frame();

                match renderer.mode() {
                    ControlMode::Animated => {
                        assert!(!overridden, "animation came back after an override");
                        assert_eq!(frame, animated_frame(phase, ConversionAlgorithm::None));
                    }
                    ControlMode::Overridden => {
                        overridden = true;
                        let first = frame[0];
                        assert!(frame.iter().all(|pixel| *pixel == first), "{frame:?}");
                        assert_eq!((first.r, first.w), (first.g, 0));
                        assert_eq!(first.g, first.b);
                    }
                }
            }
        });

        renderer.render();
        assert_eq!(renderer.mode(), ControlMode::Overridden);
        assert_eq!(renderer.frame(), vec![Rgbw::from(gamma_rgb(Rgb::new(255, 255, 255))); 8]);
    }
}
