//! Swoop - a gravity-and-gap arcade game for the terminal
//!
//! Core modules:
//! - `engine`: deterministic simulation (physics, spawning, collisions, scoring)
//! - `tuning`: data-driven gameplay constants
//! - `render`: half-block pixel canvas, a pure projection of engine snapshots
//! - `audio`: synthesized sound cues

pub mod audio;
pub mod engine;
pub mod render;
pub mod tuning;

pub use engine::{Actor, Obstacle, Phase, RunState, SizeClass, TickContext, Viewport};
pub use tuning::Tuning;
