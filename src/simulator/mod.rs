//! Headless balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of seeded sessions with a scripted autopilot to measure:
//! - How often approaches end in a landing, a crash or leaving the world
//! - Score and fuel per session at each difficulty preset
//!
//! The simulator drives `Session` through its public input and step API,
//! so results match real gameplay behaviour.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, RunStats};
