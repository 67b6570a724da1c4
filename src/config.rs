//! Session configuration and difficulty presets.

use crate::constants::*;
use crate::error::LanderError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Generate the standard `ALL`, `from_index()`, and `name()` methods for a
/// four-variant difficulty enum (Novice / Apprentice / Journeyman / Master).
macro_rules! difficulty_enum_impl {
    ($name:ident) => {
        impl $name {
            pub const ALL: [$name; 4] = [
                $name::Novice,
                $name::Apprentice,
                $name::Journeyman,
                $name::Master,
            ];

            pub fn from_index(index: usize) -> Self {
                Self::ALL.get(index).copied().unwrap_or($name::Journeyman)
            }

            pub fn name(&self) -> &'static str {
                match self {
                    Self::Novice => "Novice",
                    Self::Apprentice => "Apprentice",
                    Self::Journeyman => "Journeyman",
                    Self::Master => "Master",
                }
            }
        }
    };
}

/// Difficulty presets. Journeyman plays with the stock tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanderDifficulty {
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

difficulty_enum_impl!(LanderDifficulty);

impl LanderDifficulty {
    /// Downward acceleration per frame.
    pub fn gravity(&self) -> f64 {
        match self {
            Self::Novice => 0.003,
            Self::Apprentice => 0.0035,
            Self::Journeyman => GRAVITY,
            Self::Master => 0.005,
        }
    }

    pub fn starting_fuel(&self) -> f64 {
        match self {
            Self::Novice => 15_000.0,
            Self::Apprentice => 12_000.0,
            Self::Journeyman => STARTING_FUEL,
            Self::Master => 8_000.0,
        }
    }

    /// Largest `|vx| + |vy|` that still counts as a soft touchdown.
    pub fn max_landing_velocity(&self) -> f64 {
        match self {
            Self::Novice => 0.45,
            Self::Apprentice => 0.4,
            Self::Journeyman => MAX_LANDING_VELOCITY,
            Self::Master => 0.3,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

/// Every tunable of a play session.
///
/// Missing fields in a JSON document fall back to the defaults, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,

    /// Number of terrain samples (two per vertex). Must be even and at least 8.
    pub terrain_width: usize,
    pub terrain_spacing: f64,

    pub lander_size: f64,
    pub spawn_x: f64,
    pub spawn_y: f64,
    /// Draw a random horizontal velocity in [0, 1) on every spawn.
    pub randomize_spawn_velocity: bool,

    pub gravity: f64,
    pub max_thrust: f64,
    pub turn_speed: f64,
    pub max_landing_velocity: f64,

    pub starting_fuel: f64,
    pub starting_lives: u32,

    pub landing_delay_frames: u32,
    pub crash_settle_frames: u32,
    pub crash_particle_count: u32,

    pub out_of_world_min: f64,
    pub out_of_world_max: f64,
    pub bounds_warning_min: f64,
    pub bounds_warning_max: f64,
}

impl Default for LanderConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            terrain_width: TERRAIN_WIDTH,
            terrain_spacing: TERRAIN_SPACING,
            lander_size: LANDER_SIZE,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            randomize_spawn_velocity: true,
            gravity: GRAVITY,
            max_thrust: MAX_THRUST,
            turn_speed: TURN_SPEED,
            max_landing_velocity: MAX_LANDING_VELOCITY,
            starting_fuel: STARTING_FUEL,
            starting_lives: STARTING_LIVES,
            landing_delay_frames: LANDING_DELAY_FRAMES,
            crash_settle_frames: CRASH_SETTLE_FRAMES,
            crash_particle_count: CRASH_PARTICLE_COUNT,
            out_of_world_min: OUT_OF_WORLD_MIN,
            out_of_world_max: OUT_OF_WORLD_MAX,
            bounds_warning_min: BOUNDS_WARNING_MIN,
            bounds_warning_max: BOUNDS_WARNING_MAX,
        }
    }
}

impl LanderConfig {
    /// Stock tuning with the difficulty's gravity, fuel and landing tolerance.
    pub fn for_difficulty(difficulty: LanderDifficulty) -> Self {
        Self {
            gravity: difficulty.gravity(),
            starting_fuel: difficulty.starting_fuel(),
            max_landing_velocity: difficulty.max_landing_velocity(),
            ..Default::default()
        }
    }

    /// Parse a (possibly partial) JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, LanderError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Horizontal extent covered by the generated terrain.
    pub fn terrain_span(&self) -> f64 {
        terrain_span(self.terrain_width, self.terrain_spacing)
    }

    /// Pan offset that centres the terrain under the viewport on (re)spawn.
    pub fn initial_land_position(&self) -> f64 {
        self.terrain_span() / 2.0 - self.viewport_width / 2.0
    }

    /// Reject configurations a session cannot run with.
    pub fn validate(&self) -> Result<(), LanderError> {
        let result = self.check();
        if let Err(ref err) = result {
            warn!(%err, "rejected lander configuration");
        }
        result
    }

    fn check(&self) -> Result<(), LanderError> {
        validate_terrain_width(self.terrain_width)?;
        positive("viewport_width", self.viewport_width)?;
        positive("viewport_height", self.viewport_height)?;
        positive("terrain_spacing", self.terrain_spacing)?;
        positive("lander_size", self.lander_size)?;
        positive("max_landing_velocity", self.max_landing_velocity)?;
        non_negative("gravity", self.gravity)?;
        non_negative("max_thrust", self.max_thrust)?;
        non_negative("turn_speed", self.turn_speed)?;
        non_negative("starting_fuel", self.starting_fuel)?;
        if self.out_of_world_min >= self.out_of_world_max {
            return Err(LanderError::invalid(
                "out_of_world_min",
                format!(
                    "must be below out_of_world_max ({} >= {})",
                    self.out_of_world_min, self.out_of_world_max
                ),
            ));
        }
        if self.bounds_warning_min >= self.bounds_warning_max {
            return Err(LanderError::invalid(
                "bounds_warning_min",
                format!(
                    "must be below bounds_warning_max ({} >= {})",
                    self.bounds_warning_min, self.bounds_warning_max
                ),
            ));
        }
        Ok(())
    }
}

/// Horizontal extent of a terrain with `width` samples.
pub fn terrain_span(width: usize, spacing: f64) -> f64 {
    (width.saturating_sub(2 * TERRAIN_ANCHOR_VERTICES) / 2) as f64 * spacing
}

pub(crate) fn validate_terrain_width(width: usize) -> Result<(), LanderError> {
    if width < MIN_TERRAIN_WIDTH {
        return Err(LanderError::invalid(
            "terrain_width",
            format!("must be at least {MIN_TERRAIN_WIDTH}, got {width}"),
        ));
    }
    if width % 2 != 0 {
        return Err(LanderError::invalid(
            "terrain_width",
            format!("must be even, got {width}"),
        ));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), LanderError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LanderError::invalid(
            field,
            format!("must be positive, got {value}"),
        ))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), LanderError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LanderError::invalid(
            field,
            format!("must not be negative, got {value}"),
        ))
    }
}
