//! ECS components for hecs aircraft entities.
//!
//! Components are plain data structs with no methods.
//! Simulation logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::airspace::{Runway, Waypoint};
use crate::constants::*;
use crate::enums::FlightPhase;
use crate::types::Position;

/// Aircraft identity and controller-visible status flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    /// Unique callsign (airline prefix + tail number). Doubles as the key
    /// commands address aircraft by.
    pub callsign: String,
    pub phase: FlightPhase,
    pub cleared_for_handoff: bool,
    pub cleared_for_landing: bool,
    /// Advisory loss-of-separation flag, recomputed every tick.
    pub conflicting: bool,
    /// Sim time at which this aircraft entered the sector.
    pub spawned_at_secs: f64,
}

/// Dynamic flight state, integrated each tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Position,
    pub altitude_ft: f64,
    pub heading_deg: f64,
    pub speed_kt: f64,
    pub climb_rate_fpm: f64,
}

/// Controller-commanded setpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Targets {
    pub altitude_ft: f64,
    pub heading_deg: f64,
    pub speed_kt: f64,
}

/// Fixed performance limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Performance {
    pub max_turn_rate_deg_s: f64,
    pub max_climb_rate_fpm: f64,
    /// Negative (feet per minute, down).
    pub max_descent_rate_fpm: f64,
    pub acceleration_kt_s: f64,
}

impl Default for Performance {
    fn default() -> Self {
        Self {
            max_turn_rate_deg_s: MAX_TURN_RATE_DEG_S,
            max_climb_rate_fpm: MAX_CLIMB_RATE_FPM,
            max_descent_rate_fpm: MAX_DESCENT_RATE_FPM,
            acceleration_kt_s: ACCELERATION_KT_S,
        }
    }
}

/// Lateral navigation state: the direct-to override and any assigned runway.
/// Both hold owned clones of airspace-owned immutable records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Navigation {
    pub direct_to: Option<Waypoint>,
    pub landing_runway: Option<Runway>,
    /// Banded descent-rate cap applied on final approach, overriding the
    /// performance limit while present.
    pub descent_limit_fpm: Option<f64>,
}

/// Debounce bookkeeping for automated pilot transmissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadioState {
    /// Sim time of the last automated transmission.
    pub last_tx_secs: f64,
    /// An altitude request is outstanding; suppress repeats until the
    /// aircraft reaches its target.
    pub altitude_request_pending: bool,
    /// Last fix announced with an "approaching" call.
    pub last_fix_reported: Option<String>,
    /// The one-shot approach-clearance request has been made.
    pub requested_landing_clearance: bool,
}
