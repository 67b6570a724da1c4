//! Lunar Lander - simulation core for a 2D lunar-landing arcade game.
//!
//! Terrain generation, flight integration, touchdown classification and the
//! session state machine, exposed as plain data for any presentation layer.
//! The crate never draws or reads input devices; callers feed it frame
//! deltas and commands and render what it returns.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod error;
pub mod flight;
pub mod ground;
pub mod session;
pub mod simulator;
pub mod terrain;

pub use config::{LanderConfig, LanderDifficulty};
pub use error::LanderError;
pub use flight::LanderState;
pub use ground::{Contact, ContactOutcome, GroundEvaluator};
pub use session::{LanderInput, Session, SessionEvent, SessionSnapshot};
pub use terrain::{landing_pads, LandingPad, Terrain, TerrainGenerator};
