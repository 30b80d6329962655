//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One tick per rendered frame, pacing compensated via an explicit scale
//! - Injected RNG only
//! - No rendering or platform dependencies
//!
//! External collaborators read `RunState` snapshots and feed back into the
//! engine exclusively through `flap` and `restart`.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use state::{Actor, Obstacle, Phase, RunState, SizeClass, Viewport};
pub use tick::{TickContext, difficulty, flap, impulse_scale, pacing_scale, restart, update};
