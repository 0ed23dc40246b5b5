//! Traffic generation: rolls new arrivals with a filed route.
//!
//! All randomness flows through the engine's seeded RNG; map collections
//! are iterated in sorted order so identical seeds produce identical
//! traffic.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use atc_core::airspace::Airspace;
use atc_core::constants::*;
use atc_core::flightplan::{FlightPlan, RouteSegment};
use atc_core::types::Position;

/// Spawn pacing and callsign allocation state.
#[derive(Debug, Clone)]
pub struct SpawnControl {
    pub interval_secs: f64,
    pub last_spawn_secs: f64,
    pub next_tail_number: u32,
    pub max_aircraft: usize,
    pub landing_probability: f64,
}

impl Default for SpawnControl {
    fn default() -> Self {
        Self {
            interval_secs: SPAWN_INTERVAL_SECS,
            last_spawn_secs: 0.0,
            next_tail_number: FIRST_TAIL_NUMBER,
            max_aircraft: MAX_AIRCRAFT,
            landing_probability: LANDING_PROBABILITY,
        }
    }
}

/// Everything needed to register one new aircraft.
#[derive(Debug, Clone)]
pub struct NewFlight {
    pub callsign: String,
    pub position: Position,
    pub heading_deg: f64,
    pub speed_kt: f64,
    pub altitude_ft: f64,
    pub plan: FlightPlan,
}

/// Roll a complete new arrival: spawn edge, unique callsign, cruise
/// targets, and a filed route ending at an exit fix or a runway.
pub fn roll_flight(
    rng: &mut ChaCha8Rng,
    airspace: &Airspace,
    control: &mut SpawnControl,
) -> NewFlight {
    let prefix = AIRLINE_PREFIXES[rng.gen_range(0..AIRLINE_PREFIXES.len())];
    let callsign = format!("{}{:03}", prefix, control.next_tail_number);
    control.next_tail_number += 1;

    let altitude_ft =
        f64::from(rng.gen_range(SPAWN_MIN_ALTITUDE_KFT..=SPAWN_MAX_ALTITUDE_KFT)) * 1000.0;
    let speed_kt = rng.gen_range(SPAWN_MIN_SPEED_KT..SPAWN_MAX_SPEED_KT);

    let (min_x, max_x) = (SPAWN_MARGIN_PX, WORLD_WIDTH_PX - SPAWN_MARGIN_PX);
    let (min_y, max_y) = (SPAWN_MARGIN_PX, WORLD_HEIGHT_PX - SPAWN_MARGIN_PX);
    let position = match rng.gen_range(0..4u8) {
        0 => Position::new(rng.gen_range(min_x..max_x), min_y),
        1 => Position::new(max_x, rng.gen_range(min_y..max_y)),
        2 => Position::new(rng.gen_range(min_x..max_x), max_y),
        _ => Position::new(min_x, rng.gen_range(min_y..max_y)),
    };

    let entry_fix = pick_fix(rng, &airspace.entry_fixes);
    let heading_deg = match entry_fix.as_deref().and_then(|name| airspace.waypoint(name)) {
        Some(waypoint) => position.bearing_to(&waypoint.position),
        None => {
            warn!(%callsign, "no usable entry fix, spawning on a random heading");
            rng.gen_range(0.0..360.0)
        }
    };

    let exit_fix = pick_exit_fix(rng, airspace, entry_fix.as_deref());
    if exit_fix.is_none() {
        warn!(%callsign, "no exit fixes configured, flight has no filed destination");
    }

    let mut route = Vec::new();
    if let Some(fix) = &entry_fix {
        route.push(RouteSegment::Transit {
            fix: fix.clone(),
            target_altitude_ft: altitude_ft,
            target_speed_kt: speed_kt,
        });
    }

    let landing_bound = !airspace.airports.is_empty() && rng.gen_bool(control.landing_probability);
    if landing_bound {
        add_intermediate_fixes(
            rng,
            airspace,
            &mut route,
            entry_fix.as_deref(),
            exit_fix.as_deref(),
            altitude_ft,
            speed_kt,
        );
    }

    let destination;
    if landing_bound {
        let mut airport_ids: Vec<&String> = airspace.airports.keys().collect();
        airport_ids.sort();
        let airport = &airspace.airports[airport_ids[rng.gen_range(0..airport_ids.len())]];
        let mut runway_names: Vec<&String> = airport.runways.keys().collect();
        runway_names.sort();
        let runway = runway_names[rng.gen_range(0..runway_names.len())].clone();
        route.push(RouteSegment::Landing {
            airport_id: airport.id.clone(),
            runway,
            target_altitude_ft: FILED_APPROACH_ALTITUDE_FT,
            target_speed_kt: FILED_APPROACH_SPEED_KT,
        });
        destination = airport.id.clone();
    } else if let Some(fix) = exit_fix {
        route.push(RouteSegment::Transit {
            fix: fix.clone(),
            target_altitude_ft: altitude_ft * (rng.gen::<f64>() / 2.0 + 0.75),
            target_speed_kt: speed_kt * (rng.gen::<f64>() / 2.0 + 0.75),
        });
        destination = fix;
    } else {
        destination = String::from("UNFILED");
    }

    let plan = FlightPlan::new("RANDOM", &destination, &callsign, route);
    NewFlight {
        callsign,
        position,
        heading_deg,
        speed_kt,
        altitude_ft,
        plan,
    }
}

fn pick_fix(rng: &mut ChaCha8Rng, fixes: &[String]) -> Option<String> {
    if fixes.is_empty() {
        return None;
    }
    Some(fixes[rng.gen_range(0..fixes.len())].clone())
}

/// Pick an exit fix distinct from the entry fix when more than one is
/// available; with a single exit the entry may double as the exit.
fn pick_exit_fix(
    rng: &mut ChaCha8Rng,
    airspace: &Airspace,
    entry_fix: Option<&str>,
) -> Option<String> {
    if airspace.exit_fixes.is_empty() {
        return None;
    }
    loop {
        let name = &airspace.exit_fixes[rng.gen_range(0..airspace.exit_fixes.len())];
        if Some(name.as_str()) != entry_fix || airspace.exit_fixes.len() == 1 {
            return Some(name.clone());
        }
    }
}

/// Pad a landing-bound route with up to two extra fixes, retrying a
/// bounded number of times to avoid the entry/exit fixes and duplicates.
fn add_intermediate_fixes(
    rng: &mut ChaCha8Rng,
    airspace: &Airspace,
    route: &mut Vec<RouteSegment>,
    entry_fix: Option<&str>,
    exit_fix: Option<&str>,
    altitude_ft: f64,
    speed_kt: f64,
) {
    let mut names: Vec<&String> = airspace.waypoints.keys().collect();
    names.sort();
    if names.is_empty() {
        return;
    }

    let wanted = rng.gen_range(0..=MAX_INTERMEDIATE_FIXES);
    let mut added: Vec<String> = Vec::new();
    let mut retries = INTERMEDIATE_FIX_RETRIES;
    while added.len() < wanted {
        let name = names[rng.gen_range(0..names.len())].clone();
        if Some(name.as_str()) == entry_fix
            || Some(name.as_str()) == exit_fix
            || added.contains(&name)
        {
            retries -= 1;
            if retries == 0 {
                break;
            }
            continue;
        }
        route.push(RouteSegment::Transit {
            fix: name.clone(),
            target_altitude_ft: altitude_ft * (rng.gen::<f64>() / 2.0 + 0.75),
            target_speed_kt: speed_kt * (rng.gen::<f64>() / 2.0 + 0.75),
        });
        added.push(name);
    }
}
