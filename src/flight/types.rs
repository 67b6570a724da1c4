//! Lander flight data structures.

use crate::config::LanderConfig;
use crate::constants::MAX_THROTTLE;
use serde::{Deserialize, Serialize};

/// Everything the presentation layer needs to draw the lander and its HUD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanderState {
    /// Screen-space x of the lander's top-left corner.
    pub x: f64,
    /// Screen-space y of the lander's top-left corner. 0 = top, grows downward.
    pub y: f64,
    /// Horizontal velocity (positive = rightward).
    pub vx: f64,
    /// Vertical velocity (positive = downward).
    pub vy: f64,
    /// Rotation in degrees. 0 = upright.
    pub rotation: f64,
    /// Degrees added to `rotation` every frame.
    pub rotational_velocity: f64,
    /// Throttle percent, 0..=100.
    pub throttle: u8,
    pub fuel: f64,
    pub lives: u32,
    pub score: u32,
    pub landed: bool,
    pub crashed: bool,
}

impl LanderState {
    /// Fresh lander at the configured spawn point with full fuel and lives.
    pub fn new(config: &LanderConfig) -> Self {
        Self {
            x: config.spawn_x,
            y: config.spawn_y,
            vx: 0.0,
            vy: 0.0,
            rotation: 0.0,
            rotational_velocity: 0.0,
            throttle: 0,
            fuel: config.starting_fuel,
            lives: config.starting_lives,
            score: 0,
            landed: false,
            crashed: false,
        }
    }

    /// Put the lander back at the spawn point. Fuel, lives and score persist.
    pub fn respawn(&mut self, config: &LanderConfig, vx: f64) {
        self.x = config.spawn_x;
        self.y = config.spawn_y;
        self.vx = vx;
        self.vy = 0.0;
        self.rotation = 0.0;
        self.rotational_velocity = 0.0;
        self.throttle = 0;
        self.landed = false;
        self.crashed = false;
    }

    /// Neither landed nor crashed.
    pub fn is_airborne(&self) -> bool {
        !self.landed && !self.crashed
    }

    /// Sum of absolute velocity components, the quantity touchdown is judged on.
    pub fn speed(&self) -> f64 {
        self.vx.abs() + self.vy.abs()
    }

    /// True while a touchdown right now would be soft enough to land.
    pub fn is_safe_speed(&self, max_landing_velocity: f64) -> bool {
        self.speed() < max_landing_velocity
    }

    pub fn center(&self, lander_size: f64) -> (f64, f64) {
        (self.x + lander_size / 2.0, self.y + lander_size / 2.0)
    }

    pub fn adjust_throttle(&mut self, delta: i16) {
        let next = (i16::from(self.throttle) + delta).clamp(0, i16::from(MAX_THROTTLE));
        self.throttle = next as u8;
    }
}

/// Control inputs for one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightControls {
    pub throttle: u8,
    pub rotational_velocity: f64,
}

impl FlightControls {
    pub fn from_state(state: &LanderState) -> Self {
        Self {
            throttle: state.throttle,
            rotational_velocity: state.rotational_velocity,
        }
    }
}

/// Environment constants applied by the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPhysics {
    pub gravity: f64,
    pub max_thrust: f64,
}

impl FlightPhysics {
    pub fn from_config(config: &LanderConfig) -> Self {
        Self {
            gravity: config.gravity,
            max_thrust: config.max_thrust,
        }
    }
}

/// Observable side effects of one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightOutput {
    /// Exhaust particles to spawn this frame. Purely cosmetic.
    pub thrust_particles: u32,
    pub fuel_burned: f64,
}
