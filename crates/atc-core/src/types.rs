//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in simulation space (pixels, fixed NM-to-pixel scale).
/// x grows east, y grows south ("up" on screen is north).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position in pixels.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared distance, for threshold checks without the sqrt.
    pub fn distance_sq(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Aviation bearing to another position in degrees:
    /// 0° = north (screen-up), clockwise positive, normalized to [0, 360).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        // atan2 measures from the +x axis; rotate 90° for the aviation frame.
        let deg = dy.atan2(dx).to_degrees() + 90.0;
        normalize_heading(deg)
    }
}

/// Wrap any angle in degrees into [0, 360).
pub fn normalize_heading(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
