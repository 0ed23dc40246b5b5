//! Controller commands and the textual command grammar.
//!
//! Commands are applied synchronously between ticks; each returns
//! success or a typed, recoverable error. The free-text grammar is
//! `<CALLSIGN> <VERB> [VALUE]` with the verbs (and abbreviations)
//! HEADING/H, ALTITUDE/ALT/A, SPEED/SPD/S, DIRECT/D, HANDOFF/HO,
//! LANDING/L. Altitudes accept an `FL` prefix (hundreds of feet).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All controller actions the simulation accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AtcCommand {
    /// Fly a heading; cancels any direct-to override.
    Heading { callsign: String, heading_deg: f64 },
    /// Climb or descend to an altitude.
    Altitude { callsign: String, altitude_ft: f64 },
    /// Adjust speed.
    Speed { callsign: String, speed_kt: f64 },
    /// Proceed direct to a named fix.
    DirectTo { callsign: String, fix: String },
    /// Clear the aircraft for handoff to the next controller.
    ClearHandoff { callsign: String },
    /// Clear the aircraft to land on the named runway.
    ClearLanding { callsign: String, runway: String },
}

/// Failures executing a command. All are recoverable; the simulation
/// never aborts on a bad command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("aircraft {0} not found")]
    AircraftNotFound(String),
    #[error("waypoint {0} not found")]
    UnknownWaypoint(String),
    #[error("runway {0} is not valid")]
    UnknownRunway(String),
    #[error("{0} is not ready for handoff")]
    NotReadyForHandoff(String),
}

/// Failures parsing a command line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("missing verb after callsign")]
    MissingVerb,
    #[error("unknown verb {0}")]
    UnknownVerb(String),
    #[error("verb {0} requires a value")]
    MissingValue(String),
    #[error("invalid heading {0} (expected 0-359)")]
    InvalidHeading(String),
    #[error("invalid altitude {0} (expected feet >= 0, or FLxxx)")]
    InvalidAltitude(String),
    #[error("invalid speed {0} (expected knots >= 0)")]
    InvalidSpeed(String),
}

/// Parse a console command line into an [`AtcCommand`].
pub fn parse(line: &str) -> Result<AtcCommand, ParseError> {
    let mut parts = line.split_whitespace();
    let callsign = parts.next().ok_or(ParseError::Empty)?.to_uppercase();
    let verb = parts.next().ok_or(ParseError::MissingVerb)?.to_uppercase();
    let value = parts.next();

    let require_value = |verb: &str| {
        value
            .map(str::to_uppercase)
            .ok_or_else(|| ParseError::MissingValue(verb.to_owned()))
    };

    match verb.as_str() {
        "HEADING" | "HDG" | "H" => {
            let raw = require_value(&verb)?;
            let heading: u32 = raw
                .parse()
                .map_err(|_| ParseError::InvalidHeading(raw.clone()))?;
            if heading > 359 {
                return Err(ParseError::InvalidHeading(raw));
            }
            Ok(AtcCommand::Heading {
                callsign,
                heading_deg: f64::from(heading),
            })
        }
        "ALTITUDE" | "ALT" | "A" => {
            let raw = require_value(&verb)?;
            let altitude_ft = parse_altitude(&raw).ok_or(ParseError::InvalidAltitude(raw))?;
            Ok(AtcCommand::Altitude {
                callsign,
                altitude_ft,
            })
        }
        "SPEED" | "SPD" | "S" => {
            let raw = require_value(&verb)?;
            let speed_kt: f64 = raw
                .parse()
                .map_err(|_| ParseError::InvalidSpeed(raw.clone()))?;
            if !speed_kt.is_finite() || speed_kt < 0.0 {
                return Err(ParseError::InvalidSpeed(raw));
            }
            Ok(AtcCommand::Speed { callsign, speed_kt })
        }
        "DIRECT" | "DCT" | "D" => {
            let fix = require_value(&verb)?;
            Ok(AtcCommand::DirectTo { callsign, fix })
        }
        "HANDOFF" | "HO" => Ok(AtcCommand::ClearHandoff { callsign }),
        "LANDING" | "LAND" | "L" => {
            let runway = require_value(&verb)?;
            Ok(AtcCommand::ClearLanding { callsign, runway })
        }
        other => Err(ParseError::UnknownVerb(other.to_owned())),
    }
}

/// Altitude value: plain feet, or a flight level (`FL300` = 30,000 ft).
fn parse_altitude(raw: &str) -> Option<f64> {
    if let Some(fl) = raw.strip_prefix("FL") {
        let level: u32 = fl.parse().ok()?;
        return Some(f64::from(level) * 100.0);
    }
    let feet: f64 = raw.parse().ok()?;
    (feet.is_finite() && feet >= 0.0).then_some(feet)
}
