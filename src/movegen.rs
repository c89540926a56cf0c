//! Candidate move generation and the default admissibility predicates.
//!
//! Generation enumerates every legal attack or transfer in ascending board
//! order; the predicates then bound the branching factor. Both predicates
//! are injected into the search at construction, so callers can swap in
//! their own gates without touching the engine.

use crate::board::{Area, AreaId, Board, Player, MAX_DICE};
use crate::combat::attack_success_probability;

/// A (source, target) pair of area ids.
pub type MovePair = (AreaId, AreaId);

/// Success probability a candidate attack must clear to be explored.
pub const ATTACK_PROBABILITY_GATE: f32 = 0.6;

/// Every legal attack for `player`: an owned source with more than one die
/// and an adjacent target with a different owner. Ascending (source, target)
/// order.
pub fn possible_attacks(board: &Board, player: Player) -> Vec<MovePair> {
    let mut attacks = Vec::new();
    for source in board.areas() {
        if !source.is_owned_by(player) || source.dice() <= 1 {
            continue;
        }
        for &neighbor in source.neighbors() {
            if board.area(neighbor).owner() != Some(player) {
                attacks.push((source.id(), neighbor));
            }
        }
    }
    attacks
}

/// Every legal transfer for `player`: an owned source with more than one
/// die and an adjacent target of the same owner with room for more dice.
/// Ascending (source, target) order.
pub fn possible_transfers(board: &Board, player: Player) -> Vec<MovePair> {
    let mut transfers = Vec::new();
    for source in board.areas() {
        if !source.is_owned_by(player) || source.dice() <= 1 {
            continue;
        }
        for &neighbor in source.neighbors() {
            let target = board.area(neighbor);
            if target.is_owned_by(player) && target.dice() < MAX_DICE {
                transfers.push((source.id(), neighbor));
            }
        }
    }
    transfers
}

/// Default attack gate: the fight must involve the searching agent, and the
/// attacker must either clear the probability gate or be an 8-vs-8 stack
/// battle (worth forcing despite the near coin flip).
pub fn favorable_attack(_board: &Board, agent: Player, source: &Area, target: &Area) -> bool {
    let probable = if source.dice() == MAX_DICE && target.dice() == MAX_DICE {
        true
    } else {
        attack_success_probability(source.dice(), target.dice()) > ATTACK_PROBABILITY_GATE
    };
    let relevant = source.is_owned_by(agent) || target.is_owned_by(agent);
    probable && relevant
}

/// Default transfer gate: refuse to undo any transfer already simulated this
/// turn, and refuse to repeat the most recent one.
pub fn non_oscillating_transfer(_board: &Board, candidate: MovePair, done: &[MovePair]) -> bool {
    let (source, target) = candidate;
    let reversed = (target, source);
    !done.contains(&reversed) && done.last() != Some(&candidate)
}
