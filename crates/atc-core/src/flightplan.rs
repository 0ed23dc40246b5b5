//! Filed flight plans: ordered route segments and a progress cursor.

use serde::{Deserialize, Serialize};

/// One leg of a filed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RouteSegment {
    /// Transit a named fix at the given targets.
    Transit {
        fix: String,
        target_altitude_ft: f64,
        target_speed_kt: f64,
    },
    /// Final leg: approach and land on a specific runway.
    Landing {
        airport_id: String,
        runway: String,
        target_altitude_ft: f64,
        target_speed_kt: f64,
    },
}

impl RouteSegment {
    /// The fix name for transit segments.
    pub fn fix(&self) -> Option<&str> {
        match self {
            RouteSegment::Transit { fix, .. } => Some(fix),
            RouteSegment::Landing { .. } => None,
        }
    }
}

/// A flight plan owned by exactly one aircraft.
///
/// Invariant: `0 <= cursor <= route.len()`; `cursor == route.len()` means
/// the plan is exhausted. The cursor only moves forward while a plan is
/// active; issuing a landing clearance replaces the route outright.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightPlan {
    pub origin: String,
    pub destination: String,
    pub callsign: String,
    pub route: Vec<RouteSegment>,
    pub cursor: usize,
}

impl FlightPlan {
    pub fn new(origin: &str, destination: &str, callsign: &str, route: Vec<RouteSegment>) -> Self {
        Self {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            callsign: callsign.to_owned(),
            route,
            cursor: 0,
        }
    }

    /// Whether every segment has been flown.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.route.len()
    }

    /// The segment the aircraft should execute next, if any.
    pub fn current_segment(&self) -> Option<&RouteSegment> {
        self.route.get(self.cursor)
    }

    /// Move past the current segment. Saturates at the route length.
    pub fn advance(&mut self) {
        if self.cursor < self.route.len() {
            self.cursor += 1;
        }
    }

    /// Force the plan to its exhausted state (used at touchdown).
    pub fn complete(&mut self) {
        self.cursor = self.route.len();
    }
}
