//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World`; they own no state.
//! Pilot radio traffic is pushed into an outbox the engine drains after
//! each update, so no system holds a reference back into the engine.

pub mod cleanup;
pub mod conflict;
pub mod flight;
pub mod snapshot;
pub mod spawner;

use atc_core::events::RadioCall;

/// Pilot transmissions collected during a tick: (callsign, call).
pub type RadioOutbox = Vec<(String, RadioCall)>;
