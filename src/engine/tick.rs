//! Per-frame simulation step and the player commands.
//!
//! `update` advances the run exactly once per rendered frame. It is a plain
//! transform of (state, viewport, time) and an injected RNG, so the whole
//! engine unit-tests without a render loop.

use rand::Rng;

use crate::tuning::Tuning;

use super::collision;
use super::spawn;
use super::state::{Phase, RunState, Viewport};

/// Per-tick inputs supplied by the frame driver.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    pub viewport: Viewport,
    /// Monotonic time, ms since the frontend started.
    pub now_ms: u64,
    /// Measured display refresh rate, frames/second. 60 until the driver's
    /// startup sampling window completes.
    pub refresh_fps: f64,
}

/// Score-driven multiplier applied to gravity and scroll speed, capped so
/// long runs stay playable.
pub fn difficulty(tuning: &Tuning, score: u32) -> f64 {
    (1.0 + f64::from(score) * tuning.difficulty_step).min(tuning.difficulty_cap)
}

/// Pacing compensation for gravity and scroll speed. A fixed per-tick
/// increment run at a higher sampling rate would speed the game up purely
/// as an artifact of the display; above the threshold the increment shrinks
/// toward the reference rate. At or below the threshold the scale is 1.
pub fn pacing_scale(tuning: &Tuning, refresh_fps: f64) -> f64 {
    if refresh_fps > tuning.high_refresh_fps {
        tuning.reference_fps / refresh_fps
    } else {
        1.0
    }
}

/// Flap compensation: above the threshold the impulse grows with the
/// measured rate, offsetting the softened per-tick gravity.
pub fn impulse_scale(tuning: &Tuning, refresh_fps: f64) -> f64 {
    if refresh_fps > tuning.high_refresh_fps {
        refresh_fps / tuning.high_refresh_fps
    } else {
        1.0
    }
}

/// The flap command. Starts a not-started run; re-arms the actor's upward
/// velocity while running; does nothing once the run is over. Repeated
/// flaps within one tick overwrite each other - the last one wins.
pub fn flap(state: &mut RunState, tuning: &Tuning, refresh_fps: f64) {
    match state.phase {
        Phase::Over => return,
        Phase::NotStarted => {
            state.phase = Phase::Running;
            log::info!("run started");
        }
        Phase::Running => {}
    }
    state.actor.vy = tuning.flap_impulse
        * impulse_scale(tuning, refresh_fps)
        * difficulty(tuning, state.score);
}

/// The restart command. Only meaningful while the run is over: rebuilds a
/// fresh not-started state on the current viewport.
pub fn restart<R: Rng>(
    state: &mut RunState,
    viewport: &Viewport,
    now_ms: u64,
    tuning: &Tuning,
    rng: &mut R,
) {
    if state.phase != Phase::Over {
        return;
    }
    *state = RunState::new(viewport, now_ms, tuning, rng);
}

/// Advance the run by one tick. No-op outside `Running`.
pub fn update<R: Rng>(
    state: &mut RunState,
    ctx: &TickContext,
    tuning: &Tuning,
    rng: &mut R,
) {
    if state.phase != Phase::Running {
        return;
    }

    let diff = difficulty(tuning, state.score);
    let pace = pacing_scale(tuning, ctx.refresh_fps);

    // Integrate.
    state.actor.vy += tuning.gravity * diff * pace;
    state.actor.y += state.actor.vy;

    // Leaving the viewport ends the run; nothing further applies this tick.
    if collision::out_of_bounds(&state.actor, &ctx.viewport, tuning) {
        state.phase = Phase::Over;
        log::info!("run over: out of bounds, score {}", state.score);
        return;
    }

    // Spawn.
    if spawn::due(state, ctx.now_ms, tuning) {
        let obstacle = spawn::make_obstacle(rng, &ctx.viewport, tuning);
        log::debug!(
            "spawned {:?} obstacle, gap {:.1}..{:.1}",
            obstacle.class,
            obstacle.gap_top,
            obstacle.gap_bottom()
        );
        state.obstacles.push(obstacle);
        state.last_spawn_ms = ctx.now_ms;
    }

    // Scroll and despawn. An obstacle exits by position, once its right edge
    // clears the left viewport edge.
    let dx = tuning.scroll_speed * diff * pace;
    for obstacle in &mut state.obstacles {
        obstacle.x -= dx;
    }
    state.obstacles.retain(|o| o.right(tuning) > 0.0);

    // Collision.
    if collision::any_hit(&state.actor, &state.obstacles, &ctx.viewport, tuning) {
        state.phase = Phase::Over;
        log::info!("run over: collision, score {}", state.score);
    }

    // Scoring. Independent of the collision scan; an obstacle counts once
    // its right edge is fully behind the actor's left edge.
    let actor_left = state.actor.left(&ctx.viewport, tuning);
    for obstacle in &mut state.obstacles {
        if !obstacle.passed && obstacle.right(tuning) < actor_left {
            obstacle.passed = true;
            state.score += 1;
        }
    }
}
