//! Board fixtures: a serde-friendly description of a position.
//!
//! Used by tests, benches, and the self-play harness to construct boards
//! from JSON and to dump a live board back out for inspection. Building a
//! board validates the description; the board itself performs no validation
//! after that.

use serde::{Deserialize, Serialize};

use super::area::{AreaId, Player, MAX_DICE};
use super::state::Board;

/// Errors raised while building a board from a setup description.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("duplicate area id {0}")]
    DuplicateArea(AreaId),

    #[error("area {area} lists unknown neighbor {neighbor}")]
    UnknownNeighbor { area: AreaId, neighbor: AreaId },

    #[error("area {area} has {dice} dice, outside [1,8]")]
    DiceOutOfRange { area: AreaId, dice: u8 },

    #[error("area {0} lists itself as a neighbor")]
    SelfAdjacency(AreaId),
}

/// One area of a setup description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSetup {
    pub id: AreaId,
    pub owner: Option<Player>,
    pub dice: u8,
    #[serde(default)]
    pub neighbors: Vec<AreaId>,
}

/// A whole-board description. Adjacency may be listed on either endpoint;
/// it is symmetrized while building.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoardSetup {
    pub areas: Vec<AreaSetup>,
}

impl BoardSetup {
    /// Validates the description and builds a board from it.
    pub fn build(&self) -> Result<Board, SetupError> {
        let mut board = Board::new();
        for area in &self.areas {
            if !(1..=MAX_DICE).contains(&area.dice) {
                return Err(SetupError::DiceOutOfRange {
                    area: area.id,
                    dice: area.dice,
                });
            }
            if !board.add_area(area.id, area.owner, area.dice) {
                return Err(SetupError::DuplicateArea(area.id));
            }
        }
        for area in &self.areas {
            for &neighbor in &area.neighbors {
                if neighbor == area.id {
                    return Err(SetupError::SelfAdjacency(area.id));
                }
                if !board.connect(area.id, neighbor) {
                    return Err(SetupError::UnknownNeighbor {
                        area: area.id,
                        neighbor,
                    });
                }
            }
        }
        Ok(board)
    }

    /// Dumps a live board into a setup description.
    pub fn from_board(board: &Board) -> Self {
        BoardSetup {
            areas: board
                .areas()
                .map(|a| AreaSetup {
                    id: a.id(),
                    owner: a.owner(),
                    dice: a.dice(),
                    neighbors: a.neighbors().to_vec(),
                })
                .collect(),
        }
    }

    /// Parses a setup from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the setup as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: AreaId, owner: Player, dice: u8, neighbors: Vec<AreaId>) -> AreaSetup {
        AreaSetup {
            id,
            owner: Some(owner),
            dice,
            neighbors,
        }
    }

    #[test]
    fn build_symmetrizes_one_sided_adjacency() {
        let setup = BoardSetup {
            areas: vec![pair(1, 0, 3, vec![2]), pair(2, 1, 2, vec![])],
        };
        let board = setup.build().unwrap();
        assert!(board.area(1).is_adjacent_to(2));
        assert!(board.area(2).is_adjacent_to(1));
    }

    #[test]
    fn build_rejects_duplicate_ids() {
        let setup = BoardSetup {
            areas: vec![pair(1, 0, 3, vec![]), pair(1, 1, 2, vec![])],
        };
        assert_eq!(setup.build().unwrap_err(), SetupError::DuplicateArea(1));
    }

    #[test]
    fn build_rejects_unknown_neighbor() {
        let setup = BoardSetup {
            areas: vec![pair(1, 0, 3, vec![9])],
        };
        assert_eq!(
            setup.build().unwrap_err(),
            SetupError::UnknownNeighbor { area: 1, neighbor: 9 }
        );
    }

    #[test]
    fn build_rejects_bad_dice() {
        let setup = BoardSetup {
            areas: vec![pair(1, 0, 0, vec![])],
        };
        assert_eq!(
            setup.build().unwrap_err(),
            SetupError::DiceOutOfRange { area: 1, dice: 0 }
        );

        let setup = BoardSetup {
            areas: vec![pair(1, 0, 9, vec![])],
        };
        assert!(matches!(
            setup.build(),
            Err(SetupError::DiceOutOfRange { .. })
        ));
    }

    #[test]
    fn json_roundtrip_preserves_board() {
        let setup = BoardSetup {
            areas: vec![
                pair(1, 0, 5, vec![2]),
                pair(2, 1, 3, vec![3]),
                pair(3, 1, 2, vec![]),
            ],
        };
        let board = setup.build().unwrap();

        let json = BoardSetup::from_board(&board).to_json().unwrap();
        let reparsed = BoardSetup::from_json(&json).unwrap().build().unwrap();
        assert_eq!(reparsed, board);
    }
}
