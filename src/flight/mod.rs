//! Lander flight dynamics: thrust, gravity, rotation and edge-scroll panning.

pub mod logic;
pub mod types;

pub use logic::{
    advance, apply_gravity, edge_scroll, integrate, nozzle_position, settle,
    thrust_particle_count,
};
pub use types::{FlightControls, FlightOutput, FlightPhysics, LanderState};
