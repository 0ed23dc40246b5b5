//! Core types and definitions for the ATC simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! geometry, airspace data, flight plans, aircraft components, commands,
//! radio events, state snapshots, and constants. It has no dependency on
//! the simulation engine or any rendering framework.

pub mod airspace;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod flightplan;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
