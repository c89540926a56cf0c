//! Handcrafted leaf evaluators.
//!
//! Each evaluator scores a board position for one player; the search calls
//! it once per player at every leaf to fill the score vector. All three are
//! plain functions so any of them (or a caller's own) can be injected into
//! the engine.

use crate::board::{AreaId, Board, Player};
use crate::combat::hold_probability;

/// Devaluation applied to each ring of areas further from the frontier.
const INLAND_DEVALUATION: f32 = 0.8;

/// Raw dice total. The cheapest possible signal.
pub fn dice_advantage(board: &Board, player: Player) -> f32 {
    board.player_dice(player) as f32
}

/// Dice total plus region structure: every region contributes its size, and
/// the largest region counts once more, mirroring how reinforcements are
/// actually earned.
pub fn territory_strength(board: &Board, player: Player) -> f32 {
    let mut score = board.player_dice(player) as f32;
    let mut largest = 0usize;
    for region in board.player_regions(player) {
        score += region.len() as f32;
        largest = largest.max(region.len());
    }
    score + largest as f32
}

/// Frontier-weighted dice value: border areas count their dice scaled by the
/// chance of holding them, and each ring further inland is devalued, so deep
/// safe stacks are worth less than contested ones.
pub fn frontier_hold(board: &Board, player: Player) -> f32 {
    let mut counted: Vec<AreaId> = Vec::new();
    let mut ring = board.player_border(player);
    // Isolated players with no border still own dice.
    if ring.is_empty() {
        ring = board.player_areas(player);
    }
    let mut multiplier = 1.0;
    let mut score = 0.0;

    while !ring.is_empty() {
        counted.extend_from_slice(&ring);
        let mut next_ring: Vec<AreaId> = Vec::new();
        for &id in &ring {
            let area = board.area(id);
            score += area.dice() as f32 * (1.0 + hold_probability(board, id)) * multiplier;
            for &neighbor in area.neighbors() {
                if board.area(neighbor).is_owned_by(player)
                    && !counted.contains(&neighbor)
                    && !next_ring.contains(&neighbor)
                {
                    next_ring.push(neighbor);
                }
            }
        }
        ring = next_ring;
        multiplier *= INLAND_DEVALUATION;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1(p0,5)-2(p0,2)-3(p1,6), a chain.
    fn board() -> Board {
        let mut b = Board::new();
        b.add_area(1, Some(0), 5);
        b.add_area(2, Some(0), 2);
        b.add_area(3, Some(1), 6);
        b.connect(1, 2);
        b.connect(2, 3);
        b
    }

    #[test]
    fn dice_advantage_counts_dice() {
        let b = board();
        assert_eq!(dice_advantage(&b, 0), 7.0);
        assert_eq!(dice_advantage(&b, 1), 6.0);
        assert_eq!(dice_advantage(&b, 9), 0.0);
    }

    #[test]
    fn territory_strength_rewards_connected_territory() {
        let b = board();
        // dice 7 + region size 2 + largest 2
        assert_eq!(territory_strength(&b, 0), 11.0);
        // dice 6 + region size 1 + largest 1
        assert_eq!(territory_strength(&b, 1), 8.0);
    }

    #[test]
    fn territory_strength_prefers_one_large_region() {
        // Same dice and area count, split vs connected.
        let mut split = Board::new();
        split.add_area(1, Some(0), 3);
        split.add_area(2, Some(1), 1);
        split.add_area(3, Some(0), 3);
        split.connect(1, 2);
        split.connect(2, 3);

        let mut joined = Board::new();
        joined.add_area(1, Some(0), 3);
        joined.add_area(2, Some(0), 3);
        joined.add_area(3, Some(1), 1);
        joined.connect(1, 2);
        joined.connect(2, 3);

        assert!(territory_strength(&joined, 0) > territory_strength(&split, 0));
    }

    #[test]
    fn frontier_hold_devalues_interior_dice() {
        // Chain of three owned areas with the enemy at one end: the border
        // area counts fully, deeper areas progressively less.
        let mut b = Board::new();
        b.add_area(1, Some(0), 4);
        b.add_area(2, Some(0), 4);
        b.add_area(3, Some(0), 4);
        b.add_area(4, Some(1), 4);
        b.connect(1, 2);
        b.connect(2, 3);
        b.connect(3, 4);

        let safe_hold = 2.0; // hold probability 1.0 for interior areas
        let border = frontier_hold(&b, 0);
        // Interior rings contribute 4 * 2.0 * 0.8 and 4 * 2.0 * 0.64; the
        // border ring contributes less than 4 * 2.0 because it is contested.
        assert!(border < 4.0 * safe_hold + 4.0 * safe_hold * 0.8 + 4.0 * safe_hold * 0.64);
        assert!(border > 0.0);
    }

    #[test]
    fn frontier_hold_covers_isolated_players() {
        let mut b = Board::new();
        b.add_area(1, Some(0), 3);
        b.add_area(2, Some(0), 3);
        b.connect(1, 2);
        // No border at all: both areas still count at full hold.
        assert_eq!(frontier_hold(&b, 0), 12.0);
    }
}
