//! Hit testing between the actor, the viewport bounds, and obstacles.

use crate::tuning::Tuning;

use super::state::{Actor, Obstacle, Viewport};

/// The actor's hit-box: its bounding box inset by the configured padding on
/// top and bottom only. Deliberately smaller than the visual sprite.
#[derive(Debug, Clone, Copy)]
pub struct HitBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

pub fn actor_hitbox(actor: &Actor, viewport: &Viewport, tuning: &Tuning) -> HitBox {
    HitBox {
        left: actor.left(viewport, tuning),
        right: actor.right(viewport, tuning),
        top: actor.top(tuning) + tuning.hitbox_pad,
        bottom: actor.bottom(tuning) - tuning.hitbox_pad,
    }
}

/// Lower edge below the viewport floor, or upper edge above the ceiling.
/// Bounds use the full bounding box, not the inset hit-box.
pub fn out_of_bounds(actor: &Actor, viewport: &Viewport, tuning: &Tuning) -> bool {
    actor.bottom(tuning) > viewport.height || actor.top(tuning) < 0.0
}

/// True if the hit-box sits inside the obstacle's horizontal footprint while
/// poking outside its vertical gap.
pub fn hits(hitbox: &HitBox, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let overlaps_x = hitbox.right > obstacle.x && hitbox.left < obstacle.right(tuning);
    if !overlaps_x {
        return false;
    }
    hitbox.top < obstacle.gap_top || hitbox.bottom > obstacle.gap_bottom()
}

/// Scan the active set. Multiple simultaneous hits are equivalent to one.
pub fn any_hit(
    actor: &Actor,
    obstacles: &[Obstacle],
    viewport: &Viewport,
    tuning: &Tuning,
) -> bool {
    let hitbox = actor_hitbox(actor, viewport, tuning);
    obstacles.iter().any(|o| hits(&hitbox, o, tuning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::SizeClass;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 720.0)
    }

    fn obstacle_at(x: f64, gap_top: f64, gap: f64) -> Obstacle {
        Obstacle {
            x,
            gap_top,
            gap,
            class: SizeClass::Medium,
            passed: false,
        }
    }

    /// Obstacle straddling the actor's fixed horizontal position.
    fn overlapping_obstacle(gap_top: f64, gap: f64) -> Obstacle {
        let tuning = Tuning::default();
        let center = vp().width * tuning.actor_x_frac;
        obstacle_at(center - tuning.obstacle_width * 0.5, gap_top, gap)
    }

    #[test]
    fn centered_in_gap_is_safe() {
        let tuning = Tuning::default();
        let obstacle = overlapping_obstacle(300.0, 180.0);
        let actor = Actor { y: 390.0, vy: 0.0 };
        assert!(!any_hit(&actor, &[obstacle], &vp(), &tuning));
    }

    #[test]
    fn poking_above_gap_top_hits() {
        let tuning = Tuning::default();
        let obstacle = overlapping_obstacle(300.0, 180.0);
        // Hit-box top = y - 16 + 6; above 300 once y < 310.
        let actor = Actor { y: 305.0, vy: 0.0 };
        assert!(any_hit(&actor, &[obstacle], &vp(), &tuning));
    }

    #[test]
    fn poking_below_gap_bottom_hits() {
        let tuning = Tuning::default();
        let obstacle = overlapping_obstacle(300.0, 180.0);
        // Gap bottom = 480; hit-box bottom = y + 16 - 6.
        let actor = Actor { y: 475.0, vy: 0.0 };
        assert!(any_hit(&actor, &[obstacle], &vp(), &tuning));
    }

    #[test]
    fn hitbox_padding_forgives_grazing_contact() {
        let tuning = Tuning::default();
        let obstacle = overlapping_obstacle(300.0, 180.0);
        // Bounding-box top grazes the lip (y - 16 < 300) but the inset
        // hit-box still clears it.
        let actor = Actor { y: 312.0, vy: 0.0 };
        assert!(actor.top(&tuning) < obstacle.gap_top);
        assert!(!any_hit(&actor, &[obstacle.clone()], &vp(), &tuning));

        // Without padding the same position would collide.
        let strict = Tuning {
            hitbox_pad: 0.0,
            ..Tuning::default()
        };
        assert!(any_hit(&actor, &[obstacle], &vp(), &strict));
    }

    #[test]
    fn no_hit_without_horizontal_overlap() {
        let tuning = Tuning::default();
        // Way off to the right, actor well outside the gap vertically.
        let obstacle = obstacle_at(900.0, 300.0, 180.0);
        let actor = Actor { y: 50.0, vy: 0.0 };
        assert!(!any_hit(&actor, &[obstacle], &vp(), &tuning));
    }

    #[test]
    fn bounds_checks_use_full_bounding_box() {
        let tuning = Tuning::default();
        let viewport = vp();

        let below = Actor {
            y: viewport.height - tuning.actor_height * 0.5 + 0.1,
            vy: 0.0,
        };
        let above = Actor {
            y: tuning.actor_height * 0.5 - 0.1,
            vy: 0.0,
        };
        let inside = Actor {
            y: viewport.height * 0.5,
            vy: 0.0,
        };

        assert!(out_of_bounds(&below, &viewport, &tuning));
        assert!(out_of_bounds(&above, &viewport, &tuning));
        assert!(!out_of_bounds(&inside, &viewport, &tuning));
    }

    #[test]
    fn two_overlapping_hits_equal_one() {
        let tuning = Tuning::default();
        let a = overlapping_obstacle(300.0, 180.0);
        let b = overlapping_obstacle(320.0, 180.0);
        let actor = Actor { y: 100.0, vy: 0.0 };
        assert!(any_hit(&actor, &[a, b], &vp(), &tuning));
    }
}
