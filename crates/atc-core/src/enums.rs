//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Flight phase of a tracked aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightPhase {
    /// Level flight at target altitude and speed.
    #[default]
    Cruise,
    /// Climbing toward a higher target altitude.
    Climb,
    /// Descending toward a lower target altitude.
    Descend,
    /// Holding pattern (reserved; not issued by the current command set).
    Holding,
    /// Vectored toward an assigned runway threshold.
    Approach,
    /// On the ground at the runway threshold.
    Landed,
    /// Departing the field (reserved; arrivals-only sector for now).
    TakingOff,
    /// Flight plan exhausted, waiting for handoff clearance.
    ReadyForHandoff,
}
