//! A play session: one lander, one terrain, lives, score and the attempt
//! state machine that ties flight and ground contact together.

pub mod logic;
pub mod types;

pub use types::{LanderInput, Session, SessionEvent, SessionSnapshot};
