//! Default tuning values for the lander simulation.
//!
//! Distances are in screen units, velocities in units per frame and
//! accelerations in units per frame squared. One frame is one physics step.

// Viewport
pub const VIEWPORT_WIDTH: f64 = 1000.0;
pub const VIEWPORT_HEIGHT: f64 = 800.0;
/// The lander is kept inside the central band; the outer `1 / EDGE_SCROLL_DIVISOR`
/// of the viewport on each side triggers a terrain pan.
pub const EDGE_SCROLL_DIVISOR: f64 = 6.0;

// Terrain
pub const TERRAIN_WIDTH: usize = 500;
pub const MIN_TERRAIN_WIDTH: usize = 8;
pub const TERRAIN_SPACING: f64 = 10.0;
pub const TERRAIN_REFERENCE_HEIGHT: f64 = -150.0;
pub const TERRAIN_MIN_HEIGHT: f64 = -175.0;
pub const TERRAIN_MAX_HEIGHT: f64 = 25.0;
pub const HILL_STEP: f64 = 25.0;
pub const HILL_UP_CHANCE: f64 = 0.42;
pub const HILL_DOWN_CHANCE: f64 = 0.84;
pub const CENTER_PULL_DIVISOR: f64 = 10_000.0;
pub const FLAT_RUN_DIVIDER: f64 = 2.0;
/// Anchored vertices at each end of the polyline.
pub const TERRAIN_ANCHOR_VERTICES: usize = 2;

// Lander body and flight
pub const LANDER_SIZE: f64 = 25.0;
pub const SPAWN_X: f64 = 200.0;
pub const SPAWN_Y: f64 = 100.0;
pub const GRAVITY: f64 = 0.004;
pub const MAX_THRUST: f64 = 0.01;
pub const TURN_SPEED: f64 = 0.01;
pub const MAX_THROTTLE: u8 = 100;
pub const FUEL_BURN_DIVISOR: f64 = 20.0;
/// Each started block of this many throttle percent spawns one particle.
pub const THROTTLE_PER_PARTICLE: u32 = 20;
pub const THRUST_NOZZLE_OFFSET: f64 = 6.25;

// Ground contact and scoring
pub const MAX_LANDING_VELOCITY: f64 = 0.35;
pub const MAX_LANDING_SCORE: u32 = 100;

// Session bookkeeping
pub const STARTING_FUEL: f64 = 10_000.0;
pub const STARTING_LIVES: u32 = 2;
pub const MIN_FUEL_TO_CONTINUE: f64 = 0.1;
pub const LANDING_DELAY_FRAMES: u32 = 300;
pub const CRASH_SETTLE_FRAMES: u32 = 5;
pub const CRASH_PARTICLE_COUNT: u32 = 100;

// World bounds on the terrain pan offset
pub const OUT_OF_WORLD_MIN: f64 = -150.0;
pub const OUT_OF_WORLD_MAX: f64 = 1600.0;
pub const BOUNDS_WARNING_MIN: f64 = 150.0;
pub const BOUNDS_WARNING_MAX: f64 = 1300.0;

// Frame timing (~60 FPS)
pub const PHYSICS_TICK_MS: u64 = 16;
pub const MAX_TICK_DT_MS: u64 = 100;
