//! Snapshot building: projects the world into serializable views.

use std::collections::VecDeque;

use hecs::World;

use atc_core::components::{Aircraft, Kinematics, Navigation, Targets};
use atc_core::events::RadioMessage;
use atc_core::flightplan::FlightPlan;
use atc_core::state::{AircraftView, Counters, Snapshot};
use atc_core::types::SimTime;

/// Build the complete snapshot for the current tick.
/// Aircraft are sorted by callsign for deterministic output.
pub fn build(
    world: &World,
    time: &SimTime,
    time_of_day_secs: f64,
    counters: &Counters,
    radio_log: &VecDeque<RadioMessage>,
) -> Snapshot {
    let mut aircraft: Vec<AircraftView> = world
        .query::<(&Aircraft, &Kinematics, &Targets, &Navigation, &FlightPlan)>()
        .iter()
        .map(|(_entity, (ac, kin, targets, nav, plan))| build_view(ac, kin, targets, nav, plan))
        .collect();
    aircraft.sort_by(|a, b| a.callsign.cmp(&b.callsign));

    Snapshot {
        time: *time,
        time_of_day_secs,
        aircraft,
        counters: *counters,
        radio_log: radio_log.iter().cloned().collect(),
    }
}

/// Project one aircraft's components into its public view.
pub fn build_view(
    aircraft: &Aircraft,
    kin: &Kinematics,
    targets: &Targets,
    nav: &Navigation,
    plan: &FlightPlan,
) -> AircraftView {
    AircraftView {
        callsign: aircraft.callsign.clone(),
        position: kin.position,
        altitude_ft: kin.altitude_ft,
        heading_deg: kin.heading_deg,
        speed_kt: kin.speed_kt,
        climb_rate_fpm: kin.climb_rate_fpm,
        target_altitude_ft: targets.altitude_ft,
        target_heading_deg: targets.heading_deg,
        target_speed_kt: targets.speed_kt,
        phase: aircraft.phase,
        conflicting: aircraft.conflicting,
        cleared_for_handoff: aircraft.cleared_for_handoff,
        cleared_for_landing: aircraft.cleared_for_landing,
        direct_to: nav.direct_to.as_ref().map(|wp| wp.name.clone()),
        landing_runway: nav.landing_runway.as_ref().map(|rwy| rwy.name.clone()),
        route: plan.route.clone(),
        route_cursor: plan.cursor,
    }
}
