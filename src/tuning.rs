//! Data-driven gameplay constants.
//!
//! Every number the simulation cares about lives in [`Tuning`]. Defaults are
//! dimensioned for a 720 px-tall reference viewport at the 60 fps reference
//! rate; `scaled` adapts the length-dimensioned fields to the actual pixel
//! space of the terminal.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Viewport height the default constants are dimensioned for.
pub const REFERENCE_VIEWPORT_H: f64 = 720.0;

/// Gameplay constants. Deserialized from an optional `swoop.json` next to
/// the working directory; missing fields fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration, px/tick² at the reference rate.
    pub gravity: f64,
    /// Velocity set by a flap, px/tick (negative = up).
    pub flap_impulse: f64,
    /// Leftward obstacle speed, px/tick at the reference rate.
    pub scroll_speed: f64,
    /// Minimum time between obstacle spawns.
    pub spawn_interval_ms: u64,
    /// Base vertical opening of an obstacle, px. Clamped at spawn time to
    /// 0.3 × viewport height.
    pub gap: f64,
    /// Minimum distance the gap bottom keeps from the viewport floor, px.
    pub floor_margin: f64,
    /// Base obstacle width, px; size classes apply a fixed factor on top.
    pub obstacle_width: f64,
    /// Actor bounding box, px.
    pub actor_width: f64,
    pub actor_height: f64,
    /// Actor horizontal center as a fraction of viewport width.
    pub actor_x_frac: f64,
    /// Hit-box inset applied to the top and bottom of the bounding box, px.
    pub hitbox_pad: f64,
    /// Difficulty multiplier growth per score point, and its ceiling.
    pub difficulty_step: f64,
    pub difficulty_cap: f64,
    /// Refresh rate the per-tick constants are tuned for.
    pub reference_fps: f64,
    /// Above this measured rate, per-tick pacing is compensated.
    pub high_refresh_fps: f64,
    /// Visual tilt clamp, degrees either side of level.
    pub tilt_range_deg: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            flap_impulse: -8.0,
            scroll_speed: 3.0,
            spawn_interval_ms: 2000,
            gap: 180.0,
            floor_margin: 80.0,
            obstacle_width: 80.0,
            actor_width: 44.0,
            actor_height: 32.0,
            actor_x_frac: 0.2,
            hitbox_pad: 6.0,
            difficulty_step: 0.01,
            difficulty_cap: 2.5,
            reference_fps: 60.0,
            high_refresh_fps: 90.0,
            tilt_range_deg: 45.0,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults when the file
    /// is absent. A malformed file is ignored with a warning rather than
    /// aborting the game.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("ignoring malformed {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Rescale the length-dimensioned fields by `k`. The frontend derives
    /// `k` from the terminal's pixel height so one constant set serves every
    /// window size. Time, rate, and dimensionless fields are untouched.
    pub fn scaled(&self, k: f64) -> Self {
        Self {
            gravity: self.gravity * k,
            flap_impulse: self.flap_impulse * k,
            scroll_speed: self.scroll_speed * k,
            gap: self.gap * k,
            floor_margin: self.floor_margin * k,
            obstacle_width: self.obstacle_width * k,
            actor_width: self.actor_width * k,
            actor_height: self.actor_height * k,
            hitbox_pad: self.hitbox_pad * k,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_touches_only_lengths() {
        let base = Tuning::default();
        let half = base.scaled(0.5);

        assert_eq!(half.gravity, base.gravity * 0.5);
        assert_eq!(half.flap_impulse, base.flap_impulse * 0.5);
        assert_eq!(half.gap, base.gap * 0.5);
        assert_eq!(half.obstacle_width, base.obstacle_width * 0.5);

        assert_eq!(half.spawn_interval_ms, base.spawn_interval_ms);
        assert_eq!(half.difficulty_cap, base.difficulty_cap);
        assert_eq!(half.reference_fps, base.reference_fps);
        assert_eq!(half.actor_x_frac, base.actor_x_frac);
        assert_eq!(half.tilt_range_deg, base.tilt_range_deg);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"gravity": 0.4}"#).unwrap();
        assert_eq!(tuning.gravity, 0.4);
        assert_eq!(tuning.flap_impulse, Tuning::default().flap_impulse);
        assert_eq!(tuning.spawn_interval_ms, Tuning::default().spawn_interval_ms);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tuning = Tuning::load(Path::new("/nonexistent/swoop.json"));
        assert_eq!(tuning.gravity, Tuning::default().gravity);
    }
}
