//! Static airspace model: waypoints, sectors, airports, runways.
//!
//! Built once at startup and read-only for the rest of the run.
//! Aircraft keep owned clones of the small immutable records they
//! reference (waypoints, runways) rather than borrowing into this registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// A named fix aircraft navigate by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub position: Position,
}

/// A runway belonging to exactly one airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runway {
    pub name: String,
    pub threshold: Position,
    pub heading_deg: f64,
    pub length_px: f64,
    pub airport_id: String,
}

/// An airport and its runways, keyed by runway name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub runways: HashMap<String, Runway>,
}

/// A named polygon with altitude bounds. Visualization context only;
/// never enforced as a hard boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub bounds: Vec<Position>,
    pub min_altitude_ft: f64,
    pub max_altitude_ft: f64,
}

/// The full static airspace registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airspace {
    pub waypoints: HashMap<String, Waypoint>,
    pub sectors: HashMap<String, Sector>,
    pub airports: HashMap<String, Airport>,
    /// Waypoint names where traffic may enter the sector.
    pub entry_fixes: Vec<String>,
    /// Waypoint names where traffic may be handed off.
    pub exit_fixes: Vec<String>,
}

impl Airspace {
    /// An empty airspace with no fixes or airports.
    pub fn empty() -> Self {
        Self {
            waypoints: HashMap::new(),
            sectors: HashMap::new(),
            airports: HashMap::new(),
            entry_fixes: Vec::new(),
            exit_fixes: Vec::new(),
        }
    }

    pub fn add_waypoint(&mut self, name: &str, position: Position) {
        self.waypoints.insert(
            name.to_owned(),
            Waypoint {
                name: name.to_owned(),
                position,
            },
        );
    }

    pub fn add_sector(&mut self, sector: Sector) {
        self.sectors.insert(sector.name.clone(), sector);
    }

    /// Register an airport. Each runway is stamped with the airport id.
    pub fn add_airport(&mut self, id: &str, name: &str, position: Position, runways: Vec<Runway>) {
        let mut airport = Airport {
            id: id.to_owned(),
            name: name.to_owned(),
            position,
            runways: HashMap::new(),
        };
        for mut runway in runways {
            runway.airport_id = id.to_owned();
            airport.runways.insert(runway.name.clone(), runway);
        }
        self.airports.insert(id.to_owned(), airport);
    }

    pub fn waypoint(&self, name: &str) -> Option<&Waypoint> {
        self.waypoints.get(name)
    }

    pub fn airport(&self, id: &str) -> Option<&Airport> {
        self.airports.get(id)
    }

    /// Search every airport for a runway by name.
    pub fn find_runway(&self, name: &str) -> Option<&Runway> {
        self.airports.values().find_map(|ap| ap.runways.get(name))
    }
}

impl Default for Airspace {
    /// The standard training airspace: four corner fixes (all valid for
    /// both entry and exit), one rectangular sector, and one airport with
    /// a pair of opposing runways.
    fn default() -> Self {
        let mut airspace = Self::empty();

        airspace.add_waypoint("WAYPT1", Position::new(200.0, 200.0));
        airspace.add_waypoint("WAYPT2", Position::new(800.0, 200.0));
        airspace.add_waypoint("WAYPT3", Position::new(800.0, 600.0));
        airspace.add_waypoint("WAYPT4", Position::new(200.0, 600.0));

        let corner_fixes: Vec<String> =
            ["WAYPT1", "WAYPT2", "WAYPT3", "WAYPT4"].iter().map(|s| s.to_string()).collect();
        airspace.entry_fixes = corner_fixes.clone();
        airspace.exit_fixes = corner_fixes;

        airspace.add_sector(Sector {
            name: "SECTOR1".to_owned(),
            bounds: vec![
                Position::new(0.0, 0.0),
                Position::new(1024.0, 0.0),
                Position::new(1024.0, 768.0),
                Position::new(0.0, 768.0),
            ],
            min_altitude_ft: 0.0,
            max_altitude_ft: 40_000.0,
        });

        airspace.add_airport(
            "KBLR",
            "Kempegowda International Airport",
            Position::new(512.0, 384.0),
            vec![
                Runway {
                    name: "RWY09".to_owned(),
                    threshold: Position::new(200.0, 384.0),
                    heading_deg: 90.0,
                    length_px: 40.0,
                    airport_id: String::new(),
                },
                Runway {
                    name: "RWY27".to_owned(),
                    threshold: Position::new(824.0, 384.0),
                    heading_deg: 270.0,
                    length_px: 40.0,
                    airport_id: String::new(),
                },
            ],
        );

        airspace
    }
}
