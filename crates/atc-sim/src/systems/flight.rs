//! Per-aircraft kinematics and the flight-phase state machine.
//!
//! One pass per tick over every aircraft, in a fixed order: altitude,
//! direct-to resolution, flight-plan advancement, approach geometry,
//! heading, speed, position integration, then automated radio behavior.
//! Missing airspace references are recoverable: they are logged and the
//! aircraft continues on its previous targets.

use hecs::World;
use tracing::{debug, info, warn};

use atc_core::airspace::{Airspace, Waypoint};
use atc_core::components::{Aircraft, Kinematics, Navigation, Performance, RadioState, Targets};
use atc_core::constants::*;
use atc_core::enums::FlightPhase;
use atc_core::events::RadioCall;
use atc_core::flightplan::{FlightPlan, RouteSegment};

use super::RadioOutbox;

/// Advance every aircraft by one tick of `DT` seconds.
pub fn run(world: &mut World, airspace: &Airspace, now_secs: f64, outbox: &mut RadioOutbox) {
    for (_entity, (aircraft, kin, targets, perf, nav, plan, radio)) in world.query_mut::<(
        &mut Aircraft,
        &mut Kinematics,
        &mut Targets,
        &Performance,
        &mut Navigation,
        &mut FlightPlan,
        &mut RadioState,
    )>() {
        update_aircraft(
            aircraft, kin, targets, perf, nav, plan, radio, airspace, now_secs, outbox,
        );
    }
}

/// Set a new altitude target and the matching transient phase.
pub fn apply_altitude_target(
    aircraft: &mut Aircraft,
    kin: &Kinematics,
    targets: &mut Targets,
    altitude_ft: f64,
) {
    targets.altitude_ft = altitude_ft;
    aircraft.phase = if altitude_ft > kin.altitude_ft {
        FlightPhase::Climb
    } else if altitude_ft < kin.altitude_ft {
        FlightPhase::Descend
    } else {
        FlightPhase::Cruise
    };
}

#[allow(clippy::too_many_arguments)]
fn update_aircraft(
    aircraft: &mut Aircraft,
    kin: &mut Kinematics,
    targets: &mut Targets,
    perf: &Performance,
    nav: &mut Navigation,
    plan: &mut FlightPlan,
    radio: &mut RadioState,
    airspace: &Airspace,
    now_secs: f64,
    outbox: &mut RadioOutbox,
) {
    let dt = DT;

    integrate_altitude(aircraft, kin, targets, perf, nav, dt);
    resolve_direct_to(aircraft, kin, targets, nav, plan, radio, now_secs, outbox);
    resolve_route_segment(aircraft, kin, targets, nav, plan, airspace);
    fly_approach(aircraft, kin, targets, nav, plan, outbox);
    turn_toward_target(kin, targets, perf, dt);
    adjust_speed(kin, targets, perf, dt);
    integrate_position(kin, dt);
    run_radio(aircraft, kin, targets, nav, radio, now_secs, outbox);
}

/// Move altitude toward the target, clamped to the climb/descent limits
/// (feet per minute, scaled by dt/60). Snapping to the target zeroes the
/// climb rate and reverts a transient Climb/Descend phase to Cruise.
fn integrate_altitude(
    aircraft: &mut Aircraft,
    kin: &mut Kinematics,
    targets: &Targets,
    perf: &Performance,
    nav: &Navigation,
    dt: f64,
) {
    let rate_scale = dt / 60.0;
    if kin.altitude_ft < targets.altitude_ft {
        let rate = perf
            .max_climb_rate_fpm
            .min((targets.altitude_ft - kin.altitude_ft) / rate_scale);
        kin.climb_rate_fpm = rate;
        kin.altitude_ft += rate * rate_scale;
        if kin.altitude_ft >= targets.altitude_ft {
            kin.altitude_ft = targets.altitude_ft;
            kin.climb_rate_fpm = 0.0;
            if aircraft.phase == FlightPhase::Climb {
                aircraft.phase = FlightPhase::Cruise;
            }
        }
    } else if kin.altitude_ft > targets.altitude_ft {
        // On final the banded approach profile caps the descent instead
        // of the aircraft's structural limit.
        let floor = nav.descent_limit_fpm.unwrap_or(perf.max_descent_rate_fpm);
        let rate = floor.max((targets.altitude_ft - kin.altitude_ft) / rate_scale);
        kin.climb_rate_fpm = rate;
        kin.altitude_ft += rate * rate_scale;
        if kin.altitude_ft <= targets.altitude_ft {
            kin.altitude_ft = targets.altitude_ft;
            kin.climb_rate_fpm = 0.0;
            if aircraft.phase == FlightPhase::Descend {
                aircraft.phase = FlightPhase::Cruise;
            }
        }
    } else {
        kin.climb_rate_fpm = 0.0;
    }
}

/// Steer at the direct-to waypoint; on capture, drop the override and
/// advance the flight plan. A completed plan with no landing assigned
/// puts the aircraft in ReadyForHandoff.
#[allow(clippy::too_many_arguments)]
fn resolve_direct_to(
    aircraft: &mut Aircraft,
    kin: &Kinematics,
    targets: &mut Targets,
    nav: &mut Navigation,
    plan: &mut FlightPlan,
    radio: &mut RadioState,
    now_secs: f64,
    outbox: &mut RadioOutbox,
) {
    let Some(waypoint) = &nav.direct_to else {
        return;
    };

    if kin.position.distance_to(&waypoint.position) >= WAYPOINT_CAPTURE_RADIUS_PX {
        targets.heading_deg = kin.position.bearing_to(&waypoint.position);
        return;
    }

    nav.direct_to = None;
    let passed_fix = plan
        .current_segment()
        .and_then(RouteSegment::fix)
        .map(str::to_owned);
    plan.advance();
    if plan.is_complete() && nav.landing_runway.is_none() {
        debug!(callsign = %aircraft.callsign, "flight plan complete in this sector");
        aircraft.phase = FlightPhase::ReadyForHandoff;
    }
    targets.heading_deg = kin.heading_deg;

    // One position report per fix passed.
    if let Some(fix) = passed_fix {
        if radio.last_fix_reported.as_deref() != Some(fix.as_str()) {
            outbox.push((
                aircraft.callsign.clone(),
                RadioCall::ApproachingFix { fix: fix.clone() },
            ));
            radio.last_fix_reported = Some(fix);
            radio.last_tx_secs = now_secs;
        }
    }
}

/// With no direct-to active, point the aircraft at its next route segment.
/// Segment targets only overwrite altitude/speed the aircraft has already
/// satisfied, preserving controller overrides mid-leg.
fn resolve_route_segment(
    aircraft: &mut Aircraft,
    kin: &Kinematics,
    targets: &mut Targets,
    nav: &mut Navigation,
    plan: &FlightPlan,
    airspace: &Airspace,
) {
    if nav.direct_to.is_some() {
        return;
    }
    let Some(segment) = plan.current_segment().cloned() else {
        return;
    };

    match segment {
        RouteSegment::Transit {
            fix,
            target_altitude_ft,
            target_speed_kt,
        } => match airspace.waypoint(&fix) {
            Some(waypoint) => {
                nav.direct_to = Some(waypoint.clone());
                if targets.altitude_ft == kin.altitude_ft {
                    apply_altitude_target(aircraft, kin, targets, target_altitude_ft);
                }
                if targets.speed_kt == kin.speed_kt {
                    targets.speed_kt = target_speed_kt;
                }
                debug!(callsign = %aircraft.callsign, %fix, cursor = plan.cursor, "proceeding direct");
            }
            None => {
                warn!(
                    callsign = %aircraft.callsign,
                    %fix,
                    cursor = plan.cursor,
                    "route fix not found, continuing on present heading"
                );
            }
        },
        RouteSegment::Landing {
            airport_id,
            runway,
            target_altitude_ft,
            target_speed_kt,
        } => {
            let found = airspace
                .airport(&airport_id)
                .and_then(|airport| airport.runways.get(&runway));
            match found {
                Some(rwy) => {
                    nav.landing_runway = Some(rwy.clone());
                    nav.direct_to = Some(Waypoint {
                        name: rwy.name.clone(),
                        position: rwy.threshold,
                    });
                    if targets.altitude_ft == kin.altitude_ft {
                        apply_altitude_target(aircraft, kin, targets, target_altitude_ft);
                    }
                    if targets.speed_kt == kin.speed_kt {
                        targets.speed_kt = target_speed_kt;
                    }
                    aircraft.phase = FlightPhase::Approach;
                    debug!(
                        callsign = %aircraft.callsign,
                        runway = %rwy.name,
                        airport = %airport_id,
                        "beginning approach"
                    );
                }
                None => {
                    warn!(
                        callsign = %aircraft.callsign,
                        airport = %airport_id,
                        runway = %runway,
                        "landing segment references an unknown airport or runway"
                    );
                }
            }
        }
    }
}

/// Approach geometry: continuously re-aim at the threshold, tighten the
/// speed/altitude profile through distance and altitude bands, and catch
/// the touchdown window.
fn fly_approach(
    aircraft: &mut Aircraft,
    kin: &mut Kinematics,
    targets: &mut Targets,
    nav: &mut Navigation,
    plan: &mut FlightPlan,
    outbox: &mut RadioOutbox,
) {
    if aircraft.phase != FlightPhase::Approach {
        return;
    }
    let Some(runway) = nav.landing_runway.clone() else {
        return;
    };

    targets.heading_deg = kin.position.bearing_to(&runway.threshold);
    let distance = kin.position.distance_to(&runway.threshold);

    if distance < APPROACH_SLOW_RADIUS_PX {
        targets.speed_kt = FINAL_APPROACH_SPEED_KT;
        targets.altitude_ft = 0.0;
        nav.descent_limit_fpm = Some(
            if kin.altitude_ft > STEEP_DESCENT_ABOVE_FT && distance < APPROACH_STEEP_RADIUS_PX {
                STEEP_DESCENT_FPM
            } else if kin.altitude_ft > MEDIUM_DESCENT_ABOVE_FT {
                MEDIUM_DESCENT_FPM
            } else {
                SHALLOW_DESCENT_FPM
            },
        );
    } else {
        targets.speed_kt = APPROACH_SPEED_KT;
        // The banded cap only applies inside the ring.
        nav.descent_limit_fpm = None;
    }

    if distance < LANDED_CAPTURE_RADIUS_PX && kin.altitude_ft < LANDED_MAX_ALTITUDE_FT {
        aircraft.phase = FlightPhase::Landed;
        kin.speed_kt = 0.0;
        kin.climb_rate_fpm = 0.0;
        kin.position = runway.threshold;
        targets.speed_kt = 0.0;
        targets.heading_deg = kin.heading_deg;
        nav.direct_to = None;
        nav.descent_limit_fpm = None;
        plan.complete();
        info!(callsign = %aircraft.callsign, runway = %runway.name, "touchdown");
        outbox.push((
            aircraft.callsign.clone(),
            RadioCall::Touchdown {
                runway: runway.name.clone(),
            },
        ));
    }
}

/// Turn toward the target heading at the max turn rate, via the shorter
/// arc, snapping when less than one tick's turn remains.
fn turn_toward_target(kin: &mut Kinematics, targets: &Targets, perf: &Performance, dt: f64) {
    if kin.heading_deg == targets.heading_deg {
        return;
    }
    let diff = (targets.heading_deg - kin.heading_deg).rem_euclid(360.0);
    let step = perf.max_turn_rate_deg_s * dt;
    let remaining = if diff > 180.0 { 360.0 - diff } else { diff };
    if remaining < step {
        kin.heading_deg = targets.heading_deg;
    } else if diff > 180.0 {
        kin.heading_deg = (kin.heading_deg - step).rem_euclid(360.0);
    } else {
        kin.heading_deg = (kin.heading_deg + step).rem_euclid(360.0);
    }
}

/// Accelerate or decelerate linearly toward the target speed, clamped.
fn adjust_speed(kin: &mut Kinematics, targets: &Targets, perf: &Performance, dt: f64) {
    if kin.speed_kt < targets.speed_kt {
        kin.speed_kt = (kin.speed_kt + perf.acceleration_kt_s * dt).min(targets.speed_kt);
    } else if kin.speed_kt > targets.speed_kt {
        kin.speed_kt = (kin.speed_kt - perf.acceleration_kt_s * dt).max(targets.speed_kt);
    }
}

/// Integrate position from heading and speed. 0° is north (screen-up),
/// clockwise positive; knots convert to pixels/sec through the NM scale.
fn integrate_position(kin: &mut Kinematics, dt: f64) {
    let radians = kin.heading_deg.to_radians();
    let px_per_sec = kin.speed_kt / 3600.0 * NM_TO_PX;
    kin.position.x += px_per_sec * radians.sin() * dt;
    kin.position.y -= px_per_sec * radians.cos() * dt;
}

/// Automated pilot transmissions. Altitude requests are debounced and
/// one-shot per direction; the approach-clearance request fires once per
/// assignment while established toward the runway.
fn run_radio(
    aircraft: &Aircraft,
    kin: &Kinematics,
    targets: &Targets,
    nav: &Navigation,
    radio: &mut RadioState,
    now_secs: f64,
    outbox: &mut RadioOutbox,
) {
    if now_secs - radio.last_tx_secs > RADIO_DEBOUNCE_SECS {
        if aircraft.cleared_for_landing {
            radio.altitude_request_pending = false;
        } else if targets.altitude_ft > kin.altitude_ft + ALTITUDE_REQUEST_THRESHOLD_FT
            && !radio.altitude_request_pending
        {
            outbox.push((
                aircraft.callsign.clone(),
                RadioCall::RequestHigher {
                    flight_level: (targets.altitude_ft / 100.0).round() as u32,
                },
            ));
            radio.altitude_request_pending = true;
            radio.last_tx_secs = now_secs;
        } else if targets.altitude_ft < kin.altitude_ft - ALTITUDE_REQUEST_THRESHOLD_FT
            && !radio.altitude_request_pending
        {
            outbox.push((
                aircraft.callsign.clone(),
                RadioCall::RequestLower {
                    flight_level: (targets.altitude_ft / 100.0).round() as u32,
                },
            ));
            radio.altitude_request_pending = true;
            radio.last_tx_secs = now_secs;
        } else if (targets.altitude_ft - kin.altitude_ft).abs() < ALTITUDE_REQUEST_THRESHOLD_FT {
            radio.altitude_request_pending = false;
        }
    }

    if aircraft.phase == FlightPhase::Approach
        && !aircraft.cleared_for_landing
        && !radio.requested_landing_clearance
    {
        if let Some(runway) = &nav.landing_runway {
            let distance = kin.position.distance_to(&runway.threshold);
            let mut offset = (kin.heading_deg - runway.heading_deg).abs();
            if offset > 180.0 {
                offset = 360.0 - offset;
            }
            if distance > LANDING_REQUEST_MIN_DISTANCE_PX
                && kin.altitude_ft < LANDING_REQUEST_MAX_ALTITUDE_FT
                && offset < LANDING_REQUEST_MAX_OFFSET_DEG
            {
                outbox.push((
                    aircraft.callsign.clone(),
                    RadioCall::RequestLandingClearance {
                        runway: runway.name.clone(),
                    },
                ));
                radio.requested_landing_clearance = true;
                radio.last_tx_secs = now_secs;
            }
        }
    }
}
