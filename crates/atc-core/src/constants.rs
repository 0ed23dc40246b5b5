//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Pixels per nautical mile. All distances in the sim are pixels;
/// speeds in knots are converted through this scale.
pub const NM_TO_PX: f64 = 8.0;

// --- World bounds ---

/// Default world width in pixels.
pub const WORLD_WIDTH_PX: f64 = 1024.0;

/// Default world height in pixels.
pub const WORLD_HEIGHT_PX: f64 = 768.0;

/// Margin kept between spawn points and the world edge.
pub const SPAWN_MARGIN_PX: f64 = 100.0;

// --- Separation minima ---

/// Minimum lateral separation (nautical miles).
pub const MIN_HORIZONTAL_SEPARATION_NM: f64 = 5.0;

/// Minimum vertical separation (feet).
pub const MIN_VERTICAL_SEPARATION_FT: f64 = 1000.0;

// --- Navigation capture radii ---

/// Distance at which a direct-to waypoint counts as reached (pixels).
pub const WAYPOINT_CAPTURE_RADIUS_PX: f64 = 30.0;

/// Distance from an exit fix within which a cleared aircraft is handed off.
pub const EXIT_CAPTURE_RADIUS_PX: f64 = 50.0;

// --- Approach and landing ---

/// Distance from the threshold at which final approach speed applies.
pub const APPROACH_SLOW_RADIUS_PX: f64 = 150.0;

/// Distance from the threshold below which a high aircraft descends steeply.
pub const APPROACH_STEEP_RADIUS_PX: f64 = 100.0;

/// Speed target while being vectored toward the threshold (knots).
pub const APPROACH_SPEED_KT: f64 = 200.0;

/// Speed target inside the slow radius (knots).
pub const FINAL_APPROACH_SPEED_KT: f64 = 150.0;

/// Banded descent rates on final (feet per minute, negative = down).
pub const STEEP_DESCENT_FPM: f64 = -1500.0;
pub const MEDIUM_DESCENT_FPM: f64 = -500.0;
pub const SHALLOW_DESCENT_FPM: f64 = -200.0;

/// Altitude bands selecting the descent rate on final (feet).
pub const STEEP_DESCENT_ABOVE_FT: f64 = 1000.0;
pub const MEDIUM_DESCENT_ABOVE_FT: f64 = 500.0;

/// Touchdown capture window: threshold distance (pixels) and ceiling (feet).
pub const LANDED_CAPTURE_RADIUS_PX: f64 = 20.0;
pub const LANDED_MAX_ALTITUDE_FT: f64 = 100.0;

/// Altitude/speed applied to landing segments filed at spawn time.
pub const FILED_APPROACH_ALTITUDE_FT: f64 = 2000.0;
pub const FILED_APPROACH_SPEED_KT: f64 = 225.0;

/// Speed applied when a controller issues a landing clearance (knots).
pub const CLEARED_APPROACH_SPEED_KT: f64 = 200.0;

// --- Aircraft performance defaults ---

pub const MAX_TURN_RATE_DEG_S: f64 = 3.0;
pub const MAX_CLIMB_RATE_FPM: f64 = 3000.0;
pub const MAX_DESCENT_RATE_FPM: f64 = -2500.0;
pub const ACCELERATION_KT_S: f64 = 10.0 / 60.0;

// --- Radio ---

/// Minimum interval between automated pilot transmissions (seconds).
pub const RADIO_DEBOUNCE_SECS: f64 = 5.0;

/// Altitude gap beyond which pilots request higher/lower (feet).
pub const ALTITUDE_REQUEST_THRESHOLD_FT: f64 = 100.0;

/// Conditions for the approach-clearance request: still outside this
/// distance, below this altitude, within this heading offset of the runway.
pub const LANDING_REQUEST_MIN_DISTANCE_PX: f64 = 500.0;
pub const LANDING_REQUEST_MAX_ALTITUDE_FT: f64 = 5000.0;
pub const LANDING_REQUEST_MAX_OFFSET_DEG: f64 = 30.0;

/// Radio log capacity; oldest entries drop past this.
pub const RADIO_LOG_CAPACITY: usize = 50;

// --- Traffic generation ---

/// Seconds between spawn attempts.
pub const SPAWN_INTERVAL_SECS: f64 = 20.0;

/// Maximum concurrent aircraft.
pub const MAX_AIRCRAFT: usize = 5;

/// Probability that a spawned flight is landing-bound.
pub const LANDING_PROBABILITY: f64 = 0.8;

/// Initial cruise altitude range (thousands of feet, inclusive).
pub const SPAWN_MIN_ALTITUDE_KFT: u32 = 10;
pub const SPAWN_MAX_ALTITUDE_KFT: u32 = 30;

/// Initial speed range (knots).
pub const SPAWN_MIN_SPEED_KT: f64 = 200.0;
pub const SPAWN_MAX_SPEED_KT: f64 = 300.0;

/// Most intermediate fixes added to a landing-bound route.
pub const MAX_INTERMEDIATE_FIXES: usize = 2;

/// Attempts at picking a distinct intermediate fix before giving up.
pub const INTERMEDIATE_FIX_RETRIES: u32 = 8;

/// First tail number issued by the callsign generator.
pub const FIRST_TAIL_NUMBER: u32 = 100;

/// Airline prefixes for generated callsigns.
pub const AIRLINE_PREFIXES: &[&str] = &[
    "AAL", "SWA", "DAL", "UAL", "JBU", "ASA", "FFT", "AIC", "JAL",
];

// --- Cleanup ---

/// Aircraft younger than this are never bounds-checked (seconds).
pub const CLEANUP_GRACE_SECS: f64 = 60.0;

/// Extra slack around the visible world rectangle (pixels).
pub const CLEANUP_BUFFER_PX: f64 = 100.0;
