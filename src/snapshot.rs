//! Snapshot/rollback for destructive simulation.
//!
//! Every destructive step in the search is bracketed by a matching
//! capture/restore pair. Mementos are plain values captured by copy, never
//! aliased with live board state, and each remembers which area it came
//! from, so restore order between mementos is irrelevant.

use crate::board::{AreaId, Board, Player};

/// The mutable fields of one area, captured by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaMemento {
    area: AreaId,
    owner: Option<Player>,
    dice: u8,
}

impl AreaMemento {
    pub fn capture(board: &Board, area: AreaId) -> Self {
        let a = board.area(area);
        AreaMemento {
            area,
            owner: a.owner(),
            dice: a.dice(),
        }
    }

    /// Overwrites both captured fields of the captured area.
    pub fn restore(&self, board: &mut Board) {
        let a = board.area_mut(self.area);
        a.set_owner(self.owner);
        a.set_dice(self.dice);
    }

    /// Returns true if the area currently matches the captured fields.
    pub fn matches(&self, board: &Board) -> bool {
        let a = board.area(self.area);
        a.owner() == self.owner && a.dice() == self.dice
    }
}

/// The two areas touched by an attack or transfer, restored as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairMemento {
    source: AreaMemento,
    target: AreaMemento,
}

impl PairMemento {
    pub fn capture(board: &Board, source: AreaId, target: AreaId) -> Self {
        PairMemento {
            source: AreaMemento::capture(board, source),
            target: AreaMemento::capture(board, target),
        }
    }

    pub fn restore(&self, board: &mut Board) {
        self.source.restore(board);
        self.target.restore(board);
    }
}

/// A whole player's area set, captured around a simulated end-turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMemento {
    areas: Vec<AreaMemento>,
}

impl PlayerMemento {
    pub fn capture(board: &Board, player: Player) -> Self {
        PlayerMemento {
            areas: board
                .player_areas(player)
                .into_iter()
                .map(|id| AreaMemento::capture(board, id))
                .collect(),
        }
    }

    pub fn restore(&self, board: &mut Board) {
        for memento in &self.areas {
            memento.restore(board);
        }
    }
}

/// Every area on the board. The top-level search entry captures one of
/// these as a rollback-defect guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMemento {
    areas: Vec<AreaMemento>,
}

impl BoardMemento {
    pub fn capture(board: &Board) -> Self {
        BoardMemento {
            areas: board
                .area_ids()
                .collect::<Vec<_>>()
                .into_iter()
                .map(|id| AreaMemento::capture(board, id))
                .collect(),
        }
    }

    pub fn restore(&self, board: &mut Board) {
        for memento in &self.areas {
            memento.restore(board);
        }
    }

    /// Field-for-field comparison against the captured state.
    pub fn matches(&self, board: &Board) -> bool {
        self.areas.iter().all(|m| m.matches(board))
    }
}
