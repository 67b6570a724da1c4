//! Session data structures.

use crate::config::LanderConfig;
use crate::error::LanderError;
use crate::flight::LanderState;
use crate::ground::GroundEvaluator;
use crate::terrain::{landing_pads, LandingPad, Terrain, TerrainGenerator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Player commands. Each one is a single impulse; holding a key is modelled
/// by sending the command every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanderInput {
    ThrottleUp,
    ThrottleDown,
    RotateLeft,
    RotateRight,
}

/// Things the presentation layer reacts to. Emitted in the order they happen
/// within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Exhaust to draw. `direction` is the engine axis in degrees.
    ThrustParticles {
        count: u32,
        origin_x: f64,
        origin_y: f64,
        direction: f64,
    },
    CrashParticles {
        count: u32,
        origin_x: f64,
        origin_y: f64,
    },
    LandingResult {
        success: bool,
        points: u32,
    },
    /// The pan offset left the world; a life was lost without touchdown.
    OutOfBounds,
    /// "Turn around" hint switched on or off.
    BoundsWarning {
        active: bool,
    },
    GameOver {
        final_score: u32,
    },
    Respawned {
        game_over: bool,
    },
}

/// Plain-data copy of everything a renderer or test needs from a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub lander: LanderState,
    pub terrain: Terrain,
    pub landing_pads: Vec<LandingPad>,
    pub land_position_x: f64,
    pub bounds_warning: bool,
    pub delay_frames: u32,
    pub frame_count: u64,
}

/// Main session state.
///
/// Generic over the random source so seeded sessions replay exactly.
#[derive(Debug, Clone)]
pub struct Session<R: Rng = ChaCha8Rng> {
    pub(super) config: LanderConfig,
    pub(super) generator: TerrainGenerator,
    pub(super) evaluator: GroundEvaluator,
    pub(super) rng: R,

    pub lander: LanderState,
    pub terrain: Terrain,
    /// Score overlays for the current terrain.
    pub landing_pads: Vec<LandingPad>,
    /// Horizontal pan of the terrain under the viewport.
    pub land_position_x: f64,
    pub bounds_warning: bool,

    /// Frames left before a landed or crashed lander respawns.
    pub delay_frames: u32,
    /// Frames left in which a crashed lander keeps drifting.
    pub settle_frames: u32,

    pub accumulated_time_ms: u64,
    pub frame_count: u64,
}

impl<R: Rng> Session<R> {
    /// Validate the configuration, generate the first terrain and spawn.
    pub fn new(config: LanderConfig, mut rng: R) -> Result<Self, LanderError> {
        config.validate()?;
        let generator = TerrainGenerator::from_config(&config)?;
        let evaluator = GroundEvaluator::from_config(&config);

        let terrain = generator.generate(&mut rng);
        let pads = landing_pads(&terrain);
        let mut lander = LanderState::new(&config);
        lander.vx = spawn_velocity(&config, &mut rng);
        let land_position_x = config.initial_land_position();

        Ok(Self {
            config,
            generator,
            evaluator,
            rng,
            lander,
            terrain,
            landing_pads: pads,
            land_position_x,
            bounds_warning: false,
            delay_frames: 0,
            settle_frames: 0,
            accumulated_time_ms: 0,
            frame_count: 0,
        })
    }

    pub fn config(&self) -> &LanderConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &GroundEvaluator {
        &self.evaluator
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            lander: self.lander.clone(),
            terrain: self.terrain.clone(),
            landing_pads: self.landing_pads.clone(),
            land_position_x: self.land_position_x,
            bounds_warning: self.bounds_warning,
            delay_frames: self.delay_frames,
            frame_count: self.frame_count,
        }
    }
}

impl Session<ChaCha8Rng> {
    /// Deterministic session: the same config and seed replay identically.
    pub fn seeded(config: LanderConfig, seed: u64) -> Result<Self, LanderError> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Horizontal velocity a fresh lander starts with.
pub(super) fn spawn_velocity<R: Rng + ?Sized>(config: &LanderConfig, rng: &mut R) -> f64 {
    if config.randomize_spawn_velocity {
        rng.gen::<f64>()
    } else {
        0.0
    }
}
