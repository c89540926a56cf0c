//! Commands the engine hands to the turn driver.
//!
//! A command is an opaque value from the driver's point of view: it is
//! submitted to whatever transport the driver uses and the real outcome is
//! observed on the next board the driver passes back in.

use serde::{Deserialize, Serialize};

use super::area::AreaId;

/// A single move of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Attack from an owned area onto an adjacent enemy area.
    Attack { source: AreaId, target: AreaId },

    /// Move dice between two adjacent owned areas.
    Transfer { source: AreaId, target: AreaId },

    /// Finish the turn and collect reinforcements.
    EndTurn,
}

impl Command {
    /// Returns true for the end-turn command.
    pub fn is_end_turn(self) -> bool {
        matches!(self, Command::EndTurn)
    }
}
