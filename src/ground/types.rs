//! Ground contact data structures.

use serde::{Deserialize, Serialize};

/// How a touchdown ended the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    Landed,
    Crashed,
}

/// Result of probing the terrain under the lander for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Vertical gap between the lander's top edge and the terrain below it.
    pub clearance: f64,
    /// Whether the terrain interval under the lander is level.
    pub is_flat: bool,
    /// `None` while the lander is still clear of the ground.
    pub outcome: Option<ContactOutcome>,
}

impl Contact {
    pub fn touched_down(&self) -> bool {
        self.outcome.is_some()
    }
}
