//! Simulation engine — the core of the sector game.
//!
//! `AtcEngine` owns the hecs ECS world and the airspace, applies
//! controller commands synchronously between ticks, runs all systems in
//! a fixed order each tick, and produces `Snapshot`s. Completely
//! headless, enabling deterministic testing from a seed.

use std::collections::{HashSet, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use atc_core::airspace::Airspace;
use atc_core::commands::{AtcCommand, CommandError};
use atc_core::components::{
    Aircraft, Kinematics, Navigation, Performance, RadioState, Targets,
};
use atc_core::constants::*;
use atc_core::enums::FlightPhase;
use atc_core::events::{RadioCall, RadioMessage};
use atc_core::flightplan::{FlightPlan, RouteSegment};
use atc_core::state::{AircraftView, Counters, Snapshot};
use atc_core::types::{normalize_heading, SimTime};

use crate::systems;
use crate::systems::cleanup::{Removal, WorldRect};
use crate::systems::spawner::{NewFlight, SpawnControl};
use crate::systems::RadioOutbox;

/// Callsign used for controller-side radio messages.
const ATC_CALLSIGN: &str = "ATC";

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same traffic.
    pub seed: u64,
    /// Maximum concurrent aircraft before spawning pauses.
    pub max_aircraft: usize,
    /// Seconds between spawn attempts.
    pub spawn_interval_secs: f64,
    /// Probability that a new flight is landing-bound.
    pub landing_probability: f64,
    /// Spawn the first arrival immediately on construction.
    pub spawn_initial: bool,
    /// Simulated time of day at startup (seconds since midnight).
    pub start_of_day_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_aircraft: MAX_AIRCRAFT,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            landing_probability: LANDING_PROBABILITY,
            spawn_initial: true,
            start_of_day_secs: 8.0 * 3600.0,
        }
    }
}

/// The camera/world mapping injected by the rendering layer.
/// The engine only uses it to derive the visible world rectangle for
/// cleanup; without one, the default world bounds apply.
pub struct Viewport {
    pub screen_width: f64,
    pub screen_height: f64,
    pub screen_to_world: Box<dyn Fn(f64, f64) -> (f64, f64) + Send + Sync>,
}

/// The simulation engine. Owns the world, the airspace, and all counters.
pub struct AtcEngine {
    world: World,
    airspace: Airspace,
    time: SimTime,
    time_of_day_secs: f64,
    rng: ChaCha8Rng,
    counters: Counters,
    radio_log: VecDeque<RadioMessage>,
    radio_outbox: RadioOutbox,
    spawn_control: SpawnControl,
    active_conflicts: HashSet<(String, String)>,
    removal_buffer: Vec<Removal>,
    viewport: Option<Viewport>,
}

impl AtcEngine {
    /// Create an engine over the default training airspace.
    pub fn new(config: SimConfig) -> Self {
        Self::with_airspace(config, Airspace::default())
    }

    /// Create an engine over a custom airspace.
    pub fn with_airspace(config: SimConfig, airspace: Airspace) -> Self {
        let spawn_control = SpawnControl {
            interval_secs: config.spawn_interval_secs,
            max_aircraft: config.max_aircraft,
            landing_probability: config.landing_probability,
            ..SpawnControl::default()
        };
        let mut engine = Self {
            world: World::new(),
            airspace,
            time: SimTime::default(),
            time_of_day_secs: config.start_of_day_secs,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            counters: Counters::default(),
            radio_log: VecDeque::new(),
            radio_outbox: Vec::new(),
            spawn_control,
            active_conflicts: HashSet::new(),
            removal_buffer: Vec::new(),
            viewport: None,
        };
        if config.spawn_initial {
            let flight = systems::spawner::roll_flight(
                &mut engine.rng,
                &engine.airspace,
                &mut engine.spawn_control,
            );
            engine.add_aircraft(flight);
        }
        engine
    }

    /// Install the camera/world mapping used by the cleanup bounds check.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    /// Advance the simulation by one fixed tick and return the snapshot.
    pub fn tick(&mut self) -> Snapshot {
        self.time.advance();
        self.time_of_day_secs += DT;

        // 1. Per-aircraft kinematics and flight-plan progression.
        systems::flight::run(
            &mut self.world,
            &self.airspace,
            self.time.elapsed_secs,
            &mut self.radio_outbox,
        );
        self.drain_radio_outbox();

        // 2. Retire flights that finished their plan.
        self.resolve_completed_plans();

        // 3. Separation scan; count pairs newly in conflict.
        let pairs = systems::conflict::run(&mut self.world);
        for pair in pairs.difference(&self.active_conflicts) {
            warn!(first = %pair.0, second = %pair.1, "loss of separation");
            self.counters.conflicts += 1;
        }
        self.active_conflicts = pairs;

        // 4. New traffic.
        self.maybe_spawn();

        // 5. Remove strays that left the visible world.
        self.run_cleanup();

        systems::snapshot::build(
            &self.world,
            &self.time,
            self.time_of_day_secs,
            &self.counters,
            &self.radio_log,
        )
    }

    // --- Read surface ---

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn airspace(&self) -> &Airspace {
        &self.airspace
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn radio_log(&self) -> &VecDeque<RadioMessage> {
        &self.radio_log
    }

    pub fn aircraft_count(&self) -> usize {
        let mut query = self.world.query::<&Aircraft>();
        query.iter().count()
    }

    /// Public state of one aircraft, by callsign.
    pub fn aircraft(&self, callsign: &str) -> Option<AircraftView> {
        let mut query = self
            .world
            .query::<(&Aircraft, &Kinematics, &Targets, &Navigation, &FlightPlan)>();
        query
            .iter()
            .find(|(_, (aircraft, ..))| aircraft.callsign == callsign)
            .map(|(_, (aircraft, kin, targets, nav, plan))| {
                systems::snapshot::build_view(aircraft, kin, targets, nav, plan)
            })
    }

    // --- Command surface ---

    /// Execute a parsed controller command.
    pub fn execute(&mut self, command: AtcCommand) -> Result<(), CommandError> {
        match command {
            AtcCommand::Heading {
                callsign,
                heading_deg,
            } => self.issue_heading(&callsign, heading_deg),
            AtcCommand::Altitude {
                callsign,
                altitude_ft,
            } => self.issue_altitude(&callsign, altitude_ft),
            AtcCommand::Speed { callsign, speed_kt } => self.issue_speed(&callsign, speed_kt),
            AtcCommand::DirectTo { callsign, fix } => self.issue_direct_to(&callsign, &fix),
            AtcCommand::ClearHandoff { callsign } => self.clear_handoff(&callsign),
            AtcCommand::ClearLanding { callsign, runway } => {
                self.clear_landing(&callsign, &runway)
            }
        }
    }

    /// Fly a heading (normalized to [0, 360)); cancels any direct-to.
    pub fn issue_heading(&mut self, callsign: &str, heading_deg: f64) -> Result<(), CommandError> {
        let entity = self.require_aircraft(callsign)?;
        if let Ok((targets, nav)) = self
            .world
            .query_one_mut::<(&mut Targets, &mut Navigation)>(entity)
        {
            targets.heading_deg = normalize_heading(heading_deg);
            nav.direct_to = None;
        }
        Ok(())
    }

    /// Climb or descend to an altitude.
    pub fn issue_altitude(&mut self, callsign: &str, altitude_ft: f64) -> Result<(), CommandError> {
        let entity = self.require_aircraft(callsign)?;
        if let Ok((aircraft, kin, targets)) = self
            .world
            .query_one_mut::<(&mut Aircraft, &Kinematics, &mut Targets)>(entity)
        {
            systems::flight::apply_altitude_target(aircraft, kin, targets, altitude_ft);
        }
        Ok(())
    }

    /// Adjust target speed.
    pub fn issue_speed(&mut self, callsign: &str, speed_kt: f64) -> Result<(), CommandError> {
        let entity = self.require_aircraft(callsign)?;
        if let Ok(targets) = self.world.query_one_mut::<&mut Targets>(entity) {
            targets.speed_kt = speed_kt;
        }
        Ok(())
    }

    /// Proceed direct to a fix. If the fix is a still-ahead route segment
    /// the plan cursor jumps to it; the override is set either way.
    pub fn issue_direct_to(&mut self, callsign: &str, fix: &str) -> Result<(), CommandError> {
        let entity = self.require_aircraft(callsign)?;
        let waypoint = self
            .airspace
            .waypoint(fix)
            .cloned()
            .ok_or_else(|| CommandError::UnknownWaypoint(fix.to_owned()))?;
        if let Ok((nav, plan)) = self
            .world
            .query_one_mut::<(&mut Navigation, &mut FlightPlan)>(entity)
        {
            if !plan.is_complete() {
                let ahead = plan.route[plan.cursor..]
                    .iter()
                    .position(|segment| segment.fix() == Some(waypoint.name.as_str()));
                if let Some(offset) = ahead {
                    plan.cursor += offset;
                }
            }
            nav.direct_to = Some(waypoint);
        }
        Ok(())
    }

    /// Clear an aircraft for handoff. Only valid once its plan is
    /// exhausted; idempotent when already cleared.
    pub fn clear_handoff(&mut self, callsign: &str) -> Result<(), CommandError> {
        let entity = self.require_aircraft(callsign)?;

        enum Status {
            NotReady,
            AlreadyCleared,
            Cleared,
        }
        let status = match self
            .world
            .query_one_mut::<(&mut Aircraft, &FlightPlan)>(entity)
        {
            Ok((aircraft, plan)) => {
                if !plan.is_complete() {
                    Status::NotReady
                } else if aircraft.cleared_for_handoff {
                    Status::AlreadyCleared
                } else {
                    aircraft.cleared_for_handoff = true;
                    Status::Cleared
                }
            }
            Err(_) => return Err(CommandError::AircraftNotFound(callsign.to_owned())),
        };

        match status {
            Status::NotReady => {
                self.push_radio(
                    ATC_CALLSIGN,
                    format!("Negative, {callsign}, you are not ready for handoff."),
                    true,
                );
                Err(CommandError::NotReadyForHandoff(callsign.to_owned()))
            }
            Status::AlreadyCleared => {
                self.push_radio(
                    ATC_CALLSIGN,
                    format!("Confirming handoff clearance for {callsign}, you are already cleared."),
                    false,
                );
                Ok(())
            }
            Status::Cleared => {
                self.push_radio(
                    ATC_CALLSIGN,
                    format!("{callsign}, contact departure, good day."),
                    false,
                );
                Ok(())
            }
        }
    }

    /// Clear an aircraft to land: replaces its remaining route with a
    /// single landing segment for the named runway. Idempotent when
    /// already cleared; an unknown runway leaves the plan untouched.
    pub fn clear_landing(&mut self, callsign: &str, runway: &str) -> Result<(), CommandError> {
        let entity = self.require_aircraft(callsign)?;
        let Some(rwy) = self.airspace.find_runway(runway).cloned() else {
            self.push_radio(
                ATC_CALLSIGN,
                format!("Negative, {callsign}, runway {runway} is not valid."),
                true,
            );
            return Err(CommandError::UnknownRunway(runway.to_owned()));
        };

        let already_cleared = match self
            .world
            .query_one_mut::<(&mut Aircraft, &mut Navigation, &mut FlightPlan, &mut RadioState)>(
                entity,
            ) {
            Ok((aircraft, nav, plan, radio)) => {
                if aircraft.cleared_for_landing {
                    true
                } else {
                    plan.route = vec![RouteSegment::Landing {
                        airport_id: rwy.airport_id.clone(),
                        runway: rwy.name.clone(),
                        target_altitude_ft: FILED_APPROACH_ALTITUDE_FT,
                        target_speed_kt: CLEARED_APPROACH_SPEED_KT,
                    }];
                    plan.cursor = 0;
                    nav.landing_runway = Some(rwy.clone());
                    nav.direct_to = None;
                    aircraft.cleared_for_landing = true;
                    radio.altitude_request_pending = false;
                    radio.requested_landing_clearance = false;
                    false
                }
            }
            Err(_) => return Err(CommandError::AircraftNotFound(callsign.to_owned())),
        };

        if already_cleared {
            self.push_radio(
                ATC_CALLSIGN,
                format!("Confirming landing clearance for {callsign} on {}.", rwy.name),
                false,
            );
        } else {
            self.push_radio(
                ATC_CALLSIGN,
                format!("{callsign}, cleared for ILS approach runway {}.", rwy.name),
                false,
            );
        }
        Ok(())
    }

    /// Register a new aircraft in Cruise with targets equal to its state.
    /// Duplicate callsigns are dropped with a warning.
    pub fn add_aircraft(&mut self, flight: NewFlight) {
        if self.entity_by_callsign(&flight.callsign).is_some() {
            warn!(callsign = %flight.callsign, "duplicate callsign, spawn dropped");
            return;
        }
        let callsign = flight.callsign.clone();
        let destination = flight.plan.destination.clone();
        self.world.spawn((
            Aircraft {
                callsign: flight.callsign,
                phase: FlightPhase::Cruise,
                cleared_for_handoff: false,
                cleared_for_landing: false,
                conflicting: false,
                spawned_at_secs: self.time.elapsed_secs,
            },
            Kinematics {
                position: flight.position,
                altitude_ft: flight.altitude_ft,
                heading_deg: flight.heading_deg,
                speed_kt: flight.speed_kt,
                climb_rate_fpm: 0.0,
            },
            Targets {
                altitude_ft: flight.altitude_ft,
                heading_deg: flight.heading_deg,
                speed_kt: flight.speed_kt,
            },
            Performance::default(),
            Navigation::default(),
            flight.plan,
            RadioState {
                last_tx_secs: self.time.elapsed_secs,
                ..RadioState::default()
            },
        ));
        info!(%callsign, %destination, "aircraft entered the sector");
        self.push_radio(
            &callsign,
            RadioCall::RequestingClearance { destination }.render(),
            false,
        );
    }

    // --- Internals ---

    fn entity_by_callsign(&self, callsign: &str) -> Option<Entity> {
        let mut query = self.world.query::<&Aircraft>();
        query
            .iter()
            .find(|(_, aircraft)| aircraft.callsign == callsign)
            .map(|(entity, _)| entity)
    }

    fn require_aircraft(&self, callsign: &str) -> Result<Entity, CommandError> {
        self.entity_by_callsign(callsign)
            .ok_or_else(|| CommandError::AircraftNotFound(callsign.to_owned()))
    }

    /// Render queued pilot calls into the bounded radio log.
    fn drain_radio_outbox(&mut self) {
        let calls = std::mem::take(&mut self.radio_outbox);
        for (callsign, call) in calls {
            let text = call.render();
            self.push_radio(&callsign, text, false);
        }
    }

    fn push_radio(&mut self, callsign: &str, text: String, urgent: bool) {
        self.radio_log.push_back(RadioMessage {
            time_secs: self.time.elapsed_secs,
            callsign: callsign.to_owned(),
            text,
            urgent,
        });
        while self.radio_log.len() > RADIO_LOG_CAPACITY {
            self.radio_log.pop_front();
        }
    }

    /// Retire flights whose plan is exhausted: landed aircraft score a
    /// landing; cleared aircraft within the exit capture radius are
    /// handed off. Aircraft cleared to land but still airborne keep
    /// flying, as do uncleared flights awaiting a handoff clearance.
    fn resolve_completed_plans(&mut self) {
        enum Outcome {
            Landed,
            HandedOff,
        }
        let mut outcomes: Vec<(Entity, String, Outcome)> = Vec::new();
        for (entity, (aircraft, kin, plan)) in self
            .world
            .query_mut::<(&Aircraft, &Kinematics, &FlightPlan)>()
        {
            if !plan.is_complete() {
                continue;
            }
            if aircraft.phase == FlightPhase::Landed {
                outcomes.push((entity, aircraft.callsign.clone(), Outcome::Landed));
            } else if aircraft.cleared_for_handoff {
                let at_exit = self
                    .airspace
                    .exit_fixes
                    .iter()
                    .filter_map(|name| self.airspace.waypoint(name))
                    .any(|wp| kin.position.distance_to(&wp.position) < EXIT_CAPTURE_RADIUS_PX);
                if at_exit {
                    outcomes.push((entity, aircraft.callsign.clone(), Outcome::HandedOff));
                }
            }
        }

        for (entity, callsign, outcome) in outcomes {
            match outcome {
                Outcome::Landed => {
                    self.counters.landings += 1;
                    info!(%callsign, "landed and left the frequency");
                }
                Outcome::HandedOff => {
                    self.counters.handoffs += 1;
                    self.push_radio(&callsign, RadioCall::SignOff.render(), false);
                    info!(%callsign, "handed off to the next controller");
                }
            }
            let _ = self.world.despawn(entity);
        }
    }

    /// Spawn a new arrival when below the cap and the interval elapsed.
    fn maybe_spawn(&mut self) {
        if self.aircraft_count() >= self.spawn_control.max_aircraft {
            return;
        }
        if self.time.elapsed_secs - self.spawn_control.last_spawn_secs
            < self.spawn_control.interval_secs
        {
            return;
        }
        self.spawn_control.last_spawn_secs = self.time.elapsed_secs;
        let flight = systems::spawner::roll_flight(
            &mut self.rng,
            &self.airspace,
            &mut self.spawn_control,
        );
        self.add_aircraft(flight);
    }

    /// Remove aircraft that left the visible world; an unfinished plan at
    /// removal counts as a missed handoff.
    fn run_cleanup(&mut self) {
        let bounds = self.visible_world_rect();
        let now = self.time.elapsed_secs;
        let mut removals = std::mem::take(&mut self.removal_buffer);
        systems::cleanup::run(&mut self.world, &bounds, now, &mut removals);
        for removal in removals.drain(..) {
            if removal.missed_handoff {
                self.counters.missed_handoffs += 1;
                warn!(callsign = %removal.callsign, "left the sector without a handoff");
            } else {
                info!(callsign = %removal.callsign, "departed the sector");
            }
            let _ = self.world.despawn(removal.entity);
        }
        self.removal_buffer = removals;
    }

    /// The visible world rectangle plus the cleanup buffer, derived from
    /// the injected viewport mapping when one is installed.
    fn visible_world_rect(&self) -> WorldRect {
        let rect = match &self.viewport {
            Some(viewport) => {
                let (x0, y0) = (viewport.screen_to_world)(0.0, 0.0);
                let (x1, y1) =
                    (viewport.screen_to_world)(viewport.screen_width, viewport.screen_height);
                WorldRect {
                    min_x: x0.min(x1),
                    min_y: y0.min(y1),
                    max_x: x0.max(x1),
                    max_y: y0.max(y1),
                }
            }
            None => WorldRect {
                min_x: 0.0,
                min_y: 0.0,
                max_x: WORLD_WIDTH_PX,
                max_y: WORLD_HEIGHT_PX,
            },
        };
        rect.expand(CLEANUP_BUFFER_PX)
    }
}
