//! Run state and core simulation types.

use rand::Rng;

use crate::tuning::Tuning;

use super::spawn;

/// Current phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first flap; the update function is a no-op.
    NotStarted,
    /// Live gameplay.
    Running,
    /// Run ended by collision or leaving the viewport.
    Over,
}

/// Viewport dimensions in pixels. The engine assumes both are positive and
/// at least the minimums below; the frontend validates before starting a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const MIN_WIDTH: f64 = 48.0;
    pub const MIN_HEIGHT: f64 = 32.0;

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width >= Self::MIN_WIDTH
            && self.height >= Self::MIN_HEIGHT
    }
}

/// The player-controlled actor. Vertical only; its horizontal center sits at
/// a fixed fraction of viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    /// Vertical center, px from the viewport top.
    pub y: f64,
    /// Vertical velocity, px/tick (negative = up).
    pub vy: f64,
}

impl Actor {
    pub fn centered(viewport: &Viewport) -> Self {
        Self {
            y: viewport.height * 0.5,
            vy: 0.0,
        }
    }

    pub fn top(&self, tuning: &Tuning) -> f64 {
        self.y - tuning.actor_height * 0.5
    }

    pub fn bottom(&self, tuning: &Tuning) -> f64 {
        self.y + tuning.actor_height * 0.5
    }

    pub fn center_x(&self, viewport: &Viewport, tuning: &Tuning) -> f64 {
        viewport.width * tuning.actor_x_frac
    }

    pub fn left(&self, viewport: &Viewport, tuning: &Tuning) -> f64 {
        self.center_x(viewport, tuning) - tuning.actor_width * 0.5
    }

    pub fn right(&self, viewport: &Viewport, tuning: &Tuning) -> f64 {
        self.center_x(viewport, tuning) + tuning.actor_width * 0.5
    }

    /// Visual tilt in degrees, driven by velocity and clamped to the
    /// configured range. Normalized against the flap impulse so the angle is
    /// independent of viewport scale.
    pub fn tilt_deg(&self, tuning: &Tuning) -> f64 {
        let norm = (self.vy / tuning.flap_impulse.abs()).clamp(-1.0, 1.0);
        norm * tuning.tilt_range_deg
    }
}

/// Obstacle size classes. Each maps to a fixed width factor and a fixed gap
/// factor over the configured base geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    pub fn width_factor(self) -> f64 {
        match self {
            SizeClass::Small => 0.7,
            SizeClass::Medium => 1.0,
            SizeClass::Large => 1.3,
        }
    }

    /// Wider obstacles get a slightly tighter opening. Factors stay at or
    /// below 1 so the configured gap remains the ceiling.
    pub fn gap_factor(self) -> f64 {
        match self {
            SizeClass::Small => 1.0,
            SizeClass::Medium => 0.92,
            SizeClass::Large => 0.85,
        }
    }

    pub fn width(self, tuning: &Tuning) -> f64 {
        tuning.obstacle_width * self.width_factor()
    }
}

/// A vertically-gapped obstacle scrolling in from the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge, px from the viewport left. Scrolls leftward.
    pub x: f64,
    /// Height of the top segment, equal to the top of the gap.
    pub gap_top: f64,
    /// Vertical extent of the opening.
    pub gap: f64,
    pub class: SizeClass,
    /// Set once the actor has cleared this obstacle for scoring.
    pub passed: bool,
}

impl Obstacle {
    pub fn width(&self, tuning: &Tuning) -> f64 {
        self.class.width(tuning)
    }

    pub fn right(&self, tuning: &Tuning) -> f64 {
        self.x + self.width(tuning)
    }

    /// Where the bottom segment starts: `gap_top + gap`.
    pub fn gap_bottom(&self) -> f64 {
        self.gap_top + self.gap
    }
}

/// The authoritative run state. Owned by the engine; collaborators receive
/// read-only snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub phase: Phase,
    pub actor: Actor,
    /// Active obstacles, oldest (leftmost) first.
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Timestamp of the most recent spawn, ms.
    pub last_spawn_ms: u64,
}

impl RunState {
    /// Fresh not-started state with one placeholder obstacle pre-seeded so
    /// the start screen has something to show.
    pub fn new<R: Rng>(
        viewport: &Viewport,
        now_ms: u64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let mut placeholder = spawn::make_obstacle(rng, viewport, tuning);
        placeholder.x = viewport.width * 0.7;
        Self {
            phase: Phase::NotStarted,
            actor: Actor::centered(viewport),
            obstacles: vec![placeholder],
            score: 0,
            last_spawn_ms: now_ms,
        }
    }
}
