//! Obstacle generation.
//!
//! Spawning is time-gated and geometry is sampled from an injected RNG so
//! tests can pin exact obstacle layouts with a fixed seed.

use rand::Rng;

use crate::tuning::Tuning;

use super::state::{Obstacle, RunState, SizeClass, Viewport};

/// Hard ceiling on the opening relative to viewport height.
const MAX_GAP_FRAC: f64 = 0.3;

/// True once the configured interval has elapsed since the last spawn.
pub fn due(state: &RunState, now_ms: u64, tuning: &Tuning) -> bool {
    now_ms.saturating_sub(state.last_spawn_ms) >= tuning.spawn_interval_ms
}

/// Build one obstacle at the right viewport edge. Size class is uniform over
/// the enumerated set; the gap lands uniformly in the vertical span that
/// keeps the configured margin to the viewport floor.
pub fn make_obstacle<R: Rng>(rng: &mut R, viewport: &Viewport, tuning: &Tuning) -> Obstacle {
    let class = SizeClass::ALL[rng.random_range(0..SizeClass::ALL.len())];
    let gap = (tuning.gap * class.gap_factor())
        .min(tuning.gap)
        .min(viewport.height * MAX_GAP_FRAC);

    let top_span = viewport.height - tuning.floor_margin - gap;
    let gap_top = if top_span > 0.0 {
        rng.random_range(0.0..top_span)
    } else {
        0.0
    };

    Obstacle {
        x: viewport.width,
        gap_top,
        gap,
        class,
        passed: false,
    }
}
