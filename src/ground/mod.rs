//! Ground contact: clearance, flatness, touchdown classification and scoring.

pub mod logic;
pub mod types;

pub use logic::GroundEvaluator;
pub use types::{Contact, ContactOutcome};
