mod tests {
    use ws2801_strip::effect::{
        COLOR_DRIFT_INTERVAL, ColorDriftEffect, CpuStats, LOAD_METER_INTERVAL, LoadMeterEffect,
        WALKING_PIXEL_INTERVAL, WalkingPixelEffect,
    };
    use ws2801_strip::{Duration, Effect, EffectId, EffectSlot, Instant, Rgb};

    const WHITE: Rgb = Rgb::new(255, 255, 255);
    const OFF: Rgb = Rgb::new(0, 0, 0);

    fn now() -> Instant {
        Instant::from_millis(0)
    }

    #[test]
    fn test_walking_pixel_moves_and_wraps() {
        let mut effect = WalkingPixelEffect::new(WHITE);
        let mut leds = [OFF; 3];

        effect.render(now(), &mut leds);
        assert_eq!(leds, [WHITE, OFF, OFF]);
        effect.render(now(), &mut leds);
        assert_eq!(leds, [OFF, WHITE, OFF]);
        effect.render(now(), &mut leds);
        assert_eq!(leds, [OFF, OFF, WHITE]);
        effect.render(now(), &mut leds);
        assert_eq!(leds, [WHITE, OFF, OFF]);
    }

    #[test]
    fn test_walking_pixel_reset() {
        let mut effect = WalkingPixelEffect::new(WHITE);
        let mut leds = [OFF; 4];
        effect.render(now(), &mut leds);
        effect.render(now(), &mut leds);

        effect.reset();
        effect.render(now(), &mut leds);
        assert_eq!(leds, [WHITE, OFF, OFF, OFF]);
    }

    #[test]
    fn test_walking_pixel_on_empty_strip() {
        let mut effect = WalkingPixelEffect::new(WHITE);
        effect.render(now(), &mut []);
    }

    #[test]
    fn test_color_drift_ramps_and_wraps() {
        let mut effect = ColorDriftEffect::new(Rgb::new(0, 100, 250));
        let mut leds = [OFF; 3];

        effect.render(now(), &mut leds);
        assert_eq!(
            leds,
            [
                Rgb::new(0, 100, 250),
                Rgb::new(10, 110, 4),
                Rgb::new(20, 120, 14),
            ]
        );

        effect.render(now(), &mut leds);
        assert_eq!(leds[0], Rgb::new(10, 110, 4));
    }

    #[test]
    fn test_color_drift_reset_returns_to_seed() {
        let seed = Rgb::new(1, 2, 3);
        let mut effect = ColorDriftEffect::new(seed);
        let mut leds = [OFF; 2];
        effect.render(now(), &mut leds);
        effect.render(now(), &mut leds);

        effect.reset();
        effect.render(now(), &mut leds);
        assert_eq!(leds[0], seed);
    }

    #[test]
    fn test_load_meter_colors() {
        let mut effect = LoadMeterEffect::new();
        assert_eq!(effect.color(), Rgb::new(0, 255, 0));

        effect.set_usage(1.0);
        assert_eq!(effect.color(), Rgb::new(255, 0, 0));

        effect.set_usage(0.5);
        assert_eq!(effect.color(), Rgb::new(127, 128, 0));

        let mut leds = [WHITE; 4];
        effect.render(now(), &mut leds);
        assert_eq!(leds, [Rgb::new(127, 128, 0); 4]);
    }

    #[test]
    fn test_load_meter_clamps_usage() {
        let mut effect = LoadMeterEffect::new();

        effect.set_usage(3.5);
        assert!((effect.usage() - 1.0).abs() < f32::EPSILON);

        effect.set_usage(-0.25);
        assert!(effect.usage().abs() < f32::EPSILON);

        effect.set_usage(f32::NAN);
        assert!(effect.usage().abs() < f32::EPSILON);
        assert_eq!(effect.color(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_cpu_stats_parse() {
        let stats = CpuStats::parse("cpu  10 1 5 80 4 0 0 0 0 0").unwrap();
        assert_eq!(stats.user, 10);
        assert_eq!(stats.idle, 80);
        assert_eq!(stats.busy(), 16);
        assert_eq!(stats.idle_total(), 84);
    }

    #[test]
    fn test_cpu_stats_parse_rejects_bad_lines() {
        assert_eq!(CpuStats::parse("cpu0 1 2 3 4 5 6 7 8"), None);
        assert_eq!(CpuStats::parse("cpu 1 2 3 4 5 6 7"), None);
        assert_eq!(CpuStats::parse("cpu 1 2 3 x 5 6 7 8"), None);
        assert_eq!(CpuStats::parse(""), None);
    }

    #[test]
    fn test_cpu_usage_between_samples() {
        let earlier = CpuStats::parse("cpu 100 0 0 100 0 0 0 0").unwrap();
        let later = CpuStats::parse("cpu 150 0 0 150 0 0 0 0").unwrap();
        assert!((later.usage_since(&earlier) - 0.5).abs() < f32::EPSILON);

        let busy = CpuStats::parse("cpu 200 0 0 100 0 0 0 0").unwrap();
        assert!((busy.usage_since(&earlier) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cpu_usage_without_progress_is_idle() {
        let stats = CpuStats::parse("cpu 1 2 3 4 5 6 7 8").unwrap();
        assert!(stats.usage_since(&stats).abs() < f32::EPSILON);
        // counters going backwards count as no progress
        assert!(CpuStats::default().usage_since(&stats).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cpu_stats_huge_counters_saturate() {
        let busy = CpuStats::parse("cpu 18446744073709551615 1 0 0 0 0 0 0").unwrap();
        assert_eq!(busy.busy(), u64::MAX);
        assert!((busy.usage_since(&CpuStats::default()) - 1.0).abs() < f32::EPSILON);

        let idle = CpuStats::parse("cpu 0 0 0 18446744073709551615 1 0 0 0").unwrap();
        assert_eq!(idle.idle_total(), u64::MAX);
        assert!(idle.usage_since(&CpuStats::default()).abs() < f32::EPSILON);

        let both =
            CpuStats::parse("cpu 18446744073709551615 0 0 18446744073709551615 0 0 0 0").unwrap();
        let usage = both.usage_since(&CpuStats::default());
        assert!((0.0..=1.0).contains(&usage));
    }

    #[test]
    fn test_frame_intervals() {
        assert_eq!(WALKING_PIXEL_INTERVAL, Duration::from_millis(10));
        assert_eq!(COLOR_DRIFT_INTERVAL, Duration::from_millis(30));
        assert_eq!(LOAD_METER_INTERVAL, Duration::from_millis(200));
        assert_eq!(
            EffectId::LoadMeter.to_slot(WHITE).frame_interval(),
            LOAD_METER_INTERVAL
        );
    }

    #[test]
    fn test_effect_id_names_round_trip() {
        for id in EffectId::ALL {
            assert_eq!(EffectId::parse_from_str(id.as_str()), Some(id));
            assert_eq!(EffectId::from_raw(id as u8), Some(id));
            assert_eq!(id.to_slot(WHITE).id(), id);
        }
    }

    #[test]
    fn test_effect_id_parse_walking_pixel() {
        assert_eq!(
            EffectId::parse_from_str("walking_pixel"),
            Some(EffectId::WalkingPixel)
        );
    }

    #[test]
    fn test_effect_id_unknown() {
        assert_eq!(EffectId::parse_from_str("rainbow"), None);
        assert_eq!(EffectId::from_raw(3), None);
    }

    #[test]
    fn test_slot_exposes_load_meter() {
        let mut slot = EffectId::LoadMeter.to_slot(WHITE);
        let Some(meter) = slot.load_meter_mut() else {
            panic!("load meter slot");
        };
        meter.set_usage(1.0);

        let mut leds = [OFF; 2];
        slot.render(now(), &mut leds);
        assert_eq!(leds, [Rgb::new(255, 0, 0); 2]);

        assert!(
            EffectSlot::WalkingPixel(WalkingPixelEffect::new(WHITE))
                .load_meter_mut()
                .is_none()
        );
    }
}
