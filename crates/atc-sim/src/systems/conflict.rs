//! Pairwise loss-of-separation detection.
//!
//! No spatial index — the scan is quadratic in aircraft count, which is
//! fine at this sector's traffic cap. The `conflicting` flag set here is
//! advisory/visual only and never affects kinematics.

use std::collections::HashSet;

use hecs::World;

use atc_core::components::{Aircraft, Kinematics};
use atc_core::constants::{MIN_HORIZONTAL_SEPARATION_NM, MIN_VERTICAL_SEPARATION_FT, NM_TO_PX};
use atc_core::types::Position;

/// Whether two aircraft violate both separation minima.
/// Strict inequalities: exactly 5 NM or exactly 1000 ft is legal.
pub fn check_separation(a_pos: &Position, a_alt_ft: f64, b_pos: &Position, b_alt_ft: f64) -> bool {
    if (a_alt_ft - b_alt_ft).abs() >= MIN_VERTICAL_SEPARATION_FT {
        return false;
    }
    let min_px = MIN_HORIZONTAL_SEPARATION_NM * NM_TO_PX;
    a_pos.distance_sq(b_pos) < min_px * min_px
}

/// A predicted future loss of separation.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedConflict {
    /// The projection horizon that produced the conflict (seconds).
    pub horizon_secs: f64,
    /// Projected positions of both aircraft at the horizon.
    pub positions: (Position, Position),
    /// Projected altitudes at the horizon (feet).
    pub altitudes_ft: (f64, f64),
}

/// Linearly project both aircraft forward by `horizon_secs` on their
/// current heading, speed, and climb rate (no turn or acceleration
/// modeling) and re-apply the separation test to the projected state.
pub fn predict_conflict(
    a: &Kinematics,
    b: &Kinematics,
    horizon_secs: f64,
) -> Option<PredictedConflict> {
    let project = |k: &Kinematics| -> (Position, f64) {
        let radians = k.heading_deg.to_radians();
        let px_per_sec = k.speed_kt / 3600.0 * NM_TO_PX;
        let position = Position::new(
            k.position.x + px_per_sec * radians.sin() * horizon_secs,
            k.position.y - px_per_sec * radians.cos() * horizon_secs,
        );
        let altitude_ft = k.altitude_ft + k.climb_rate_fpm * horizon_secs / 60.0;
        (position, altitude_ft)
    };

    let (pos_a, alt_a) = project(a);
    let (pos_b, alt_b) = project(b);
    check_separation(&pos_a, alt_a, &pos_b, alt_b).then(|| PredictedConflict {
        horizon_secs,
        positions: (pos_a, pos_b),
        altitudes_ft: (alt_a, alt_b),
    })
}

/// Clear every aircraft's conflict flag, re-scan all pairs, and flag both
/// members of each violating pair. Returns the set of conflicting pairs
/// (callsigns, lexicographically ordered within the pair) so the engine
/// can count newly entered conflicts.
pub fn run(world: &mut World) -> HashSet<(String, String)> {
    let mut states: Vec<(hecs::Entity, String, Position, f64)> = Vec::new();
    for (entity, (aircraft, kin)) in world.query_mut::<(&mut Aircraft, &Kinematics)>() {
        aircraft.conflicting = false;
        states.push((entity, aircraft.callsign.clone(), kin.position, kin.altitude_ft));
    }
    states.sort_by(|a, b| a.1.cmp(&b.1));

    let mut pairs = HashSet::new();
    let mut flagged: HashSet<hecs::Entity> = HashSet::new();
    for i in 0..states.len() {
        for j in (i + 1)..states.len() {
            if check_separation(&states[i].2, states[i].3, &states[j].2, states[j].3) {
                flagged.insert(states[i].0);
                flagged.insert(states[j].0);
                pairs.insert((states[i].1.clone(), states[j].1.clone()));
            }
        }
    }

    if !flagged.is_empty() {
        for (entity, aircraft) in world.query_mut::<&mut Aircraft>() {
            if flagged.contains(&entity) {
                aircraft.conflicting = true;
            }
        }
    }

    pairs
}
