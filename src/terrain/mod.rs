//! Moon surface: the generated polyline and its landing pads.

pub mod generation;
pub mod types;

pub use generation::TerrainGenerator;
pub use types::{landing_pads, LandingPad, Terrain};
