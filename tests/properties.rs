//! Property tests over the engine's scaling math and spawn geometry.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use swoop::engine::{Phase, RunState, TickContext, Viewport, tick};
use swoop::tuning::Tuning;

proptest! {
    #[test]
    fn difficulty_multiplier_never_exceeds_cap(score in any::<u32>()) {
        let tuning = Tuning::default();
        let d = tick::difficulty(&tuning, score);
        prop_assert!(d >= 1.0);
        prop_assert!(d <= tuning.difficulty_cap);
    }

    #[test]
    fn pacing_scale_is_unity_up_to_threshold_then_compensates(fps in 1.0f64..480.0) {
        let tuning = Tuning::default();
        let pace = tick::pacing_scale(&tuning, fps);
        let imp = tick::impulse_scale(&tuning, fps);
        if fps <= tuning.high_refresh_fps {
            prop_assert_eq!(pace, 1.0);
            prop_assert_eq!(imp, 1.0);
        } else {
            prop_assert!(pace < 1.0);
            prop_assert!(imp > 1.0);
        }
    }

    #[test]
    fn spawned_geometry_holds_margins(seed in any::<u64>(), height in 300.0f64..1440.0) {
        let tuning = Tuning::default();
        let viewport = Viewport::new(1280.0, height);
        let mut rng = Pcg32::seed_from_u64(seed);

        let o = swoop::engine::spawn::make_obstacle(&mut rng, &viewport, &tuning);
        prop_assert!((o.gap_bottom() - o.gap_top - o.gap).abs() < 1e-9);
        prop_assert!(o.gap <= tuning.gap);
        prop_assert!(o.gap <= viewport.height * 0.3);
        prop_assert!(o.gap_top >= 0.0);
        prop_assert!(viewport.height - o.gap_bottom() >= tuning.floor_margin);
    }

    #[test]
    fn one_tick_integrates_velocity_then_position(
        y in 100.0f64..600.0,
        vy in -10.0f64..10.0,
        score in 0u32..400,
    ) {
        let tuning = Tuning::default();
        let viewport = Viewport::new(1280.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(0);
        let mut state = RunState::new(&viewport, 0, &tuning, &mut rng);
        state.phase = Phase::Running;
        state.obstacles.clear();
        state.actor.y = y;
        state.actor.vy = vy;
        state.score = score;

        let ctx = TickContext { viewport, now_ms: 0, refresh_fps: 60.0 };
        tick::update(&mut state, &ctx, &tuning, &mut rng);

        let expect_v = vy + tuning.gravity * tick::difficulty(&tuning, score);
        let expect_y = y + expect_v;
        prop_assert!((state.actor.vy - expect_v).abs() < 1e-9);
        prop_assert!((state.actor.y - expect_y).abs() < 1e-9);
    }
}
