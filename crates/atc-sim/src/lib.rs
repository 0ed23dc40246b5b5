//! Simulation engine for the ATC sector game.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, applies
//! controller commands between ticks, and produces state snapshots for
//! the rendering/input layer.

pub mod engine;
pub mod systems;

pub use atc_core as core;
pub use engine::AtcEngine;
