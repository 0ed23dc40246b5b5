//! Simulation snapshot — the complete visible state produced each tick.

use serde::{Deserialize, Serialize};

use crate::enums::FlightPhase;
use crate::events::RadioMessage;
use crate::flightplan::RouteSegment;
use crate::types::{Position, SimTime};

/// Scoring counters kept for the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub handoffs: u32,
    pub missed_handoffs: u32,
    pub conflicts: u32,
    pub landings: u32,
}

/// Complete simulation state for the rendering/input layer.
/// Aircraft are sorted by callsign for deterministic output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: SimTime,
    /// Simulated wall-clock seconds since midnight.
    pub time_of_day_secs: f64,
    pub aircraft: Vec<AircraftView>,
    pub counters: Counters,
    pub radio_log: Vec<RadioMessage>,
}

/// One aircraft's public state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub callsign: String,
    pub position: Position,
    pub altitude_ft: f64,
    pub heading_deg: f64,
    pub speed_kt: f64,
    pub climb_rate_fpm: f64,
    pub target_altitude_ft: f64,
    pub target_heading_deg: f64,
    pub target_speed_kt: f64,
    pub phase: FlightPhase,
    pub conflicting: bool,
    pub cleared_for_handoff: bool,
    pub cleared_for_landing: bool,
    /// Active direct-to fix name, if any.
    pub direct_to: Option<String>,
    /// Assigned landing runway name, if any.
    pub landing_runway: Option<String>,
    pub route: Vec<RouteSegment>,
    pub route_cursor: usize,
}
