//! Radio traffic: typed pilot calls and the logged message record.
//!
//! Aircraft systems emit `RadioCall`s into an outbox; the engine drains
//! the outbox after each update, renders the calls to text, and appends
//! them to the bounded radio log. Controller-side messages are formatted
//! directly by the engine.

use serde::{Deserialize, Serialize};

/// A pilot transmission, emitted by the flight system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RadioCall {
    /// Initial call on entering the sector.
    RequestingClearance { destination: String },
    /// Pilot wants to climb to the assigned altitude.
    RequestHigher { flight_level: u32 },
    /// Pilot wants to descend to the assigned altitude.
    RequestLower { flight_level: u32 },
    /// Position report passing a route fix.
    ApproachingFix { fix: String },
    /// Asking for landing clearance while established toward a runway.
    RequestLandingClearance { runway: String },
    /// Touchdown report.
    Touchdown { runway: String },
    /// Sign-off when leaving the sector after a handoff.
    SignOff,
}

impl RadioCall {
    /// Render the call as spoken text.
    pub fn render(&self) -> String {
        match self {
            RadioCall::RequestingClearance { destination } => {
                format!("Requesting clearance to {destination}")
            }
            RadioCall::RequestHigher { flight_level } => {
                format!("Requesting higher to FL{flight_level}")
            }
            RadioCall::RequestLower { flight_level } => {
                format!("Requesting lower to FL{flight_level}")
            }
            RadioCall::ApproachingFix { fix } => format!("Approaching {fix}"),
            RadioCall::RequestLandingClearance { runway } => {
                format!("Requesting clearance to land runway {runway}")
            }
            RadioCall::Touchdown { runway } => format!("Touch down, {runway}"),
            RadioCall::SignOff => "Good day, contact next controller".to_owned(),
        }
    }
}

/// One entry in the radio log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioMessage {
    /// Sim time of the transmission (seconds).
    pub time_secs: f64,
    pub callsign: String,
    pub text: String,
    pub urgent: bool,
}
