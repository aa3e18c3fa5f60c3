mod tests {
    use lumen_light::color::{ConversionAlgorithm, Rgb, Rgbw, convert, convert_raw};
    use lumen_light::gamma::{GAMMA8, apply_gamma, gamma8, gamma_rgb};

    const ALGORITHMS: [ConversionAlgorithm; 5] = [
        ConversionAlgorithm::None,
        ConversionAlgorithm::Min,
        ConversionAlgorithm::Squared,
        ConversionAlgorithm::Cubic,
        ConversionAlgorithm::RatioThreshold,
    ];

    #[test]
    fn test_black_is_black_for_every_selector() {
        for selector in 0..=u8::MAX {
            assert_eq!(convert_raw(Rgb::new(0, 0, 0), selector), Rgbw::default());
        }
        for algorithm in ALGORITHMS {
            assert_eq!(convert(Rgb::new(0, 0, 0), algorithm), Rgbw::default());
        }
    }

    #[test]
    fn test_min_algorithm() {
        assert_eq!(
            convert(Rgb::new(255, 0, 0), ConversionAlgorithm::Min),
            Rgbw::new(255, 0, 0, 0)
        );
        assert_eq!(
            convert(Rgb::new(100, 100, 100), ConversionAlgorithm::Min),
            Rgbw::new(100, 100, 100, 100)
        );
        assert_eq!(
            convert(Rgb::new(10, 20, 30), ConversionAlgorithm::Min),
            Rgbw::new(3, 16, 30, 10)
        );
    }

    #[test]
    fn test_squared_algorithm() {
        assert_eq!(
            convert(Rgb::new(2, 4, 8), ConversionAlgorithm::Squared),
            Rgbw::new(0, 2, 8, 4)
        );
        // m² overflows the white channel, everything clamps
        assert_eq!(
            convert(Rgb::new(200, 200, 200), ConversionAlgorithm::Squared),
            Rgbw::new(200, 200, 200, 255)
        );
    }

    #[test]
    fn test_cubic_algorithm() {
        assert_eq!(
            convert(Rgb::new(1, 2, 4), ConversionAlgorithm::Cubic),
            Rgbw::new(0, 1, 4, 1)
        );
        // Negative white is clamped to zero after the gain is applied
        assert_eq!(
            convert(Rgb::new(2, 2, 4), ConversionAlgorithm::Cubic),
            Rgbw::new(3, 3, 4, 0)
        );
    }

    #[test]
    fn test_ratio_threshold_algorithm() {
        // Saturated: min/max below one half
        assert_eq!(
            convert(Rgb::new(10, 20, 30), ConversionAlgorithm::RatioThreshold),
            Rgbw::new(0, 15, 30, 15)
        );
        // Pastel: white takes the maximum
        assert_eq!(
            convert(Rgb::new(200, 150, 255), ConversionAlgorithm::RatioThreshold),
            Rgbw::new(145, 45, 255, 255)
        );
    }

    #[test]
    fn test_none_and_unknown_pass_through() {
        let color = Rgb::new(10, 20, 30);
        assert_eq!(
            convert(color, ConversionAlgorithm::None),
            Rgbw::new(10, 20, 30, 0)
        );
        assert_eq!(convert_raw(color, 0), Rgbw::new(10, 20, 30, 0));
        assert_eq!(convert_raw(color, 5), Rgbw::new(10, 20, 30, 0));
        assert_eq!(convert_raw(color, 0xFF), Rgbw::new(10, 20, 30, 0));
        assert_eq!(convert_raw(color, 1), convert(color, ConversionAlgorithm::Min));
    }

    #[test]
    fn test_white_bound_holds_for_min_cubic_and_none() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(17) {
                for b in (0..=255u8).step_by(51) {
                    let color = Rgb::new(r, g, b);
                    let min = r.min(g).min(b);
                    for algorithm in [ConversionAlgorithm::Min, ConversionAlgorithm::Cubic] {
                        let out = convert(color, algorithm);
                        assert!(out.w <= min, "{algorithm:?} ({r}, {g}, {b}) -> {out:?}");
                    }
                    assert_eq!(convert(color, ConversionAlgorithm::None).w, 0);
                }
            }
        }
    }

    #[test]
    fn test_boosting_algorithms_may_exceed_the_minimum() {
        // Only clamped to the channel range, not to min(r, g, b)
        let squared = convert(Rgb::new(200, 200, 200), ConversionAlgorithm::Squared);
        assert!(squared.w > 200, "{squared:?}");
        let ratio = convert(Rgb::new(200, 150, 255), ConversionAlgorithm::RatioThreshold);
        assert!(ratio.w > 150, "{ratio:?}");
    }

    #[test]
    fn test_algorithm_from_raw() {
        for algorithm in ALGORITHMS {
            assert_eq!(
                ConversionAlgorithm::from_raw(algorithm.as_raw()),
                Some(algorithm)
            );
        }
        assert_eq!(ConversionAlgorithm::from_raw(5), None);
    }

    #[test]
    fn test_gamma_table_shape() {
        assert_eq!(GAMMA8[0], 0);
        assert_eq!(GAMMA8[255], 255);
        assert!(GAMMA8.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(gamma8(128), GAMMA8[128]);
    }

    #[test]
    fn test_apply_gamma() {
        let mut frame = [Rgb::new(255, 128, 0), Rgb::new(10, 20, 30)];
        apply_gamma(&mut frame);
        assert_eq!(frame[0], Rgb::new(255, GAMMA8[128], 0));
        assert_eq!(frame[1], gamma_rgb(Rgb::new(10, 20, 30)));
    }
}
