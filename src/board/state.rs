//! The board: a graph of areas keyed by id.
//!
//! Uses an ordered map so that every query iterates areas in ascending id
//! order; the search relies on that for reproducible candidate ordering.
//! During a search the board is exclusively owned by the search call, which
//! mutates it destructively and must restore it before returning.

use std::collections::BTreeMap;

use super::area::{Area, AreaId, Player};
use super::region;

/// The full game board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    areas: BTreeMap<AreaId, Area>,
}

impl Board {
    /// Creates a board with no areas.
    pub fn new() -> Self {
        Board {
            areas: BTreeMap::new(),
        }
    }

    /// Adds an area. Returns false if the id is already taken.
    pub fn add_area(&mut self, id: AreaId, owner: Option<Player>, dice: u8) -> bool {
        if self.areas.contains_key(&id) {
            return false;
        }
        self.areas.insert(id, Area::new(id, owner, dice));
        true
    }

    /// Records a symmetric adjacency between two areas.
    /// Returns false if either area is unknown or `a == b`.
    pub fn connect(&mut self, a: AreaId, b: AreaId) -> bool {
        if a == b || !self.areas.contains_key(&a) || !self.areas.contains_key(&b) {
            return false;
        }
        if let Some(area) = self.areas.get_mut(&a) {
            area.add_neighbor(b);
        }
        if let Some(area) = self.areas.get_mut(&b) {
            area.add_neighbor(a);
        }
        true
    }

    /// Looks up an area by id.
    ///
    /// # Panics
    /// Panics if the id is unknown; area ids are fixed for the lifetime of a
    /// board, so an unknown id is a caller bug.
    pub fn area(&self, id: AreaId) -> &Area {
        &self.areas[&id]
    }

    /// Mutable lookup, same contract as [`Board::area`].
    pub fn area_mut(&mut self, id: AreaId) -> &mut Area {
        self.areas
            .get_mut(&id)
            .unwrap_or_else(|| panic!("unknown area id {id}"))
    }

    /// Checked lookup for callers that cannot rule out a bad id.
    pub fn get_area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// All areas in ascending id order.
    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    /// All area ids in ascending order.
    pub fn area_ids(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.areas.keys().copied()
    }

    /// Ids of the areas owned by a player, ascending.
    pub fn player_areas(&self, player: Player) -> Vec<AreaId> {
        self.areas
            .values()
            .filter(|a| a.is_owned_by(player))
            .map(Area::id)
            .collect()
    }

    /// Number of areas owned by a player.
    pub fn player_area_count(&self, player: Player) -> usize {
        self.areas.values().filter(|a| a.is_owned_by(player)).count()
    }

    /// Ids of the player's areas that touch an area with a different owner.
    pub fn player_border(&self, player: Player) -> Vec<AreaId> {
        self.areas
            .values()
            .filter(|a| {
                a.is_owned_by(player)
                    && a.neighbors()
                        .iter()
                        .any(|&n| self.areas[&n].owner() != Some(player))
            })
            .map(Area::id)
            .collect()
    }

    /// Total dice on the player's areas.
    pub fn player_dice(&self, player: Player) -> u32 {
        self.areas
            .values()
            .filter(|a| a.is_owned_by(player))
            .map(|a| u32::from(a.dice()))
            .sum()
    }

    /// The player's maximal connected regions, recomputed from current
    /// ownership and adjacency.
    pub fn player_regions(&self, player: Player) -> Vec<Vec<AreaId>> {
        region::player_regions(self, player)
    }

    /// Size of the player's largest region, or 0 with no areas.
    pub fn largest_region_size(&self, player: Player) -> usize {
        region::largest_region_size(self, player)
    }

    /// Returns true if the player owns at least one area.
    pub fn is_alive(&self, player: Player) -> bool {
        self.areas.values().any(|a| a.is_owned_by(player))
    }
}
