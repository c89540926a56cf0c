//! Areas: the smallest unit of territory.
//!
//! An area has one owner (or none), a dice count in [1,8], and a sorted list
//! of adjacent area ids. The accessors are plain field operations with no
//! validation; the combat model is responsible for keeping the dice count in
//! range.

/// Identifies an area on the board.
pub type AreaId = u16;

/// Identifies a player.
pub type Player = u8;

/// The largest dice count an area can hold.
pub const MAX_DICE: u8 = 8;

/// A single territory on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    id: AreaId,
    owner: Option<Player>,
    dice: u8,
    /// Adjacent area ids, kept sorted for deterministic iteration.
    neighbors: Vec<AreaId>,
}

impl Area {
    /// Creates an area with no neighbors.
    pub fn new(id: AreaId, owner: Option<Player>, dice: u8) -> Self {
        Area {
            id,
            owner,
            dice,
            neighbors: Vec::new(),
        }
    }

    pub fn id(&self) -> AreaId {
        self.id
    }

    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: Option<Player>) {
        self.owner = owner;
    }

    pub fn dice(&self) -> u8 {
        self.dice
    }

    pub fn set_dice(&mut self, dice: u8) {
        self.dice = dice;
    }

    /// Adjacent area ids in ascending order.
    pub fn neighbors(&self) -> &[AreaId] {
        &self.neighbors
    }

    pub fn is_adjacent_to(&self, other: AreaId) -> bool {
        self.neighbors.binary_search(&other).is_ok()
    }

    /// Returns true if the owner matches. `None` owners match nothing.
    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Some(player)
    }

    /// Records an adjacency. Idempotent; keeps the neighbor list sorted.
    pub(crate) fn add_neighbor(&mut self, other: AreaId) {
        if let Err(pos) = self.neighbors.binary_search(&other) {
            self.neighbors.insert(pos, other);
        }
    }
}
