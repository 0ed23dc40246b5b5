//! Cleanup system: finds aircraft that drifted out of the visible world.
//!
//! Aircraft are exempt while younger than the grace period or while
//! actively navigating to a direct-to fix. The engine applies the
//! removals, counting a missed handoff for any flight removed with an
//! unfinished plan.

use hecs::{Entity, World};

use atc_core::components::{Aircraft, Kinematics, Navigation};
use atc_core::constants::CLEANUP_GRACE_SECS;
use atc_core::flightplan::FlightPlan;
use atc_core::types::Position;

/// An axis-aligned world-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl WorldRect {
    pub fn contains(&self, position: &Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    /// Grow the rectangle outward on all sides.
    pub fn expand(&self, margin: f64) -> WorldRect {
        WorldRect {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

/// One aircraft due for removal.
#[derive(Debug, Clone)]
pub struct Removal {
    pub entity: Entity,
    pub callsign: String,
    /// The flight plan was unfinished at removal time.
    pub missed_handoff: bool,
}

/// Collect aircraft outside `bounds` into `removals` (cleared first).
pub fn run(world: &mut World, bounds: &WorldRect, now_secs: f64, removals: &mut Vec<Removal>) {
    removals.clear();
    for (entity, (aircraft, kin, nav, plan)) in
        world.query_mut::<(&Aircraft, &Kinematics, &Navigation, &FlightPlan)>()
    {
        if now_secs - aircraft.spawned_at_secs < CLEANUP_GRACE_SECS || nav.direct_to.is_some() {
            continue;
        }
        if !bounds.contains(&kin.position) {
            removals.push(Removal {
                entity,
                callsign: aircraft.callsign.clone(),
                missed_handoff: !plan.is_complete(),
            });
        }
    }
}
