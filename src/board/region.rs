//! Connected-region computation.
//!
//! A region is a maximal set of same-owner areas connected through each
//! other. Regions are never stored on the board; they are recomputed from
//! current ownership and adjacency whenever asked for, so any mutation
//! invalidates them implicitly.

use std::collections::VecDeque;

use super::area::{AreaId, Player};
use super::state::Board;

/// Splits the player's areas into maximal connected regions.
///
/// The returned regions partition exactly the areas owned by the player;
/// each region is sorted ascending, and regions are ordered by their
/// smallest member.
pub fn player_regions(board: &Board, player: Player) -> Vec<Vec<AreaId>> {
    let mut pending = board.player_areas(player);
    let mut regions = Vec::new();

    while let Some(&start) = pending.first() {
        let region = flood_fill(board, start, &pending);
        pending.retain(|id| !region.contains(id));
        regions.push(region);
    }
    regions
}

/// Size of the player's largest region, or 0 with no areas.
pub fn largest_region_size(board: &Board, player: Player) -> usize {
    player_regions(board, player)
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
}

/// BFS over `available` starting at `start`, returning the reached ids
/// sorted ascending.
fn flood_fill(board: &Board, start: AreaId, available: &[AreaId]) -> Vec<AreaId> {
    let mut reached = vec![start];
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &neighbor in board.area(current).neighbors() {
            if reached.contains(&neighbor) || !available.contains(&neighbor) {
                continue;
            }
            reached.push(neighbor);
            queue.push_back(neighbor);
        }
    }
    reached.sort_unstable();
    reached
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two disconnected clumps for player 0 separated by an enemy area:
    /// 1-2 (p0), 3 (p1), 4-5 (p0), all in a chain.
    fn split_board() -> Board {
        let mut board = Board::new();
        board.add_area(1, Some(0), 2);
        board.add_area(2, Some(0), 3);
        board.add_area(3, Some(1), 4);
        board.add_area(4, Some(0), 1);
        board.add_area(5, Some(0), 5);
        for (a, b) in [(1, 2), (2, 3), (3, 4), (4, 5)] {
            board.connect(a, b);
        }
        board
    }

    #[test]
    fn regions_partition_player_areas() {
        let board = split_board();
        let regions = player_regions(&board, 0);
        assert_eq!(regions, vec![vec![1, 2], vec![4, 5]]);

        let mut all: Vec<AreaId> = regions.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, board.player_areas(0));
    }

    #[test]
    fn no_two_regions_are_adjacent() {
        let board = split_board();
        let regions = player_regions(&board, 0);
        for (i, ra) in regions.iter().enumerate() {
            for rb in regions.iter().skip(i + 1) {
                for &a in ra {
                    assert!(!rb.iter().any(|&b| board.area(a).is_adjacent_to(b)));
                }
            }
        }
    }

    #[test]
    fn largest_region_size_of_single_region() {
        let board = split_board();
        assert_eq!(largest_region_size(&board, 1), 1);
        assert_eq!(largest_region_size(&board, 0), 2);
        assert_eq!(largest_region_size(&board, 9), 0);
    }

    #[test]
    fn ownership_change_shows_up_in_next_computation() {
        let mut board = split_board();
        board.area_mut(3).set_owner(Some(0));
        assert_eq!(largest_region_size(&board, 0), 5);
    }
}
