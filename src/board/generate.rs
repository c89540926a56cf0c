//! Random board generation for self-play and property tests.
//!
//! Produces a connected board: a spanning chain over all areas plus a few
//! extra random edges, owners dealt round-robin from a shuffled order, and
//! roughly three dice per area dealt one at a time so counts vary without
//! leaving [1,8].

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::area::{AreaId, Player, MAX_DICE};
use super::state::Board;

/// Average dice per area dealt at generation time.
const DICE_PER_AREA: usize = 3;

/// Generates a connected random board with `area_count` areas split among
/// `players`. Panics if `area_count == 0` or `players` is empty.
pub fn random_board(area_count: usize, players: &[Player], rng: &mut SmallRng) -> Board {
    assert!(area_count > 0, "area_count must be positive");
    assert!(!players.is_empty(), "players must be non-empty");

    let mut board = Board::new();

    // Deal ownership round-robin over a shuffled area order so each player
    // gets an equal share at random positions in the chain.
    let mut order: Vec<AreaId> = (1..=area_count as AreaId).collect();
    order.shuffle(rng);
    for (i, &id) in order.iter().enumerate() {
        board.add_area(id, Some(players[i % players.len()]), 1);
    }

    // Spanning chain keeps the board connected; extra edges add branching.
    for id in 1..area_count as AreaId {
        board.connect(id, id + 1);
    }
    let extra_edges = area_count / 2;
    for _ in 0..extra_edges {
        let a = rng.gen_range(1..=area_count as AreaId);
        let b = rng.gen_range(1..=area_count as AreaId);
        if a != b {
            board.connect(a, b);
        }
    }

    // One die at a time onto random areas below the cap.
    for &player in players {
        let areas = board.player_areas(player);
        let mut budget = areas.len() * (DICE_PER_AREA - 1);
        let mut spins = 0;
        while budget > 0 && spins < 10_000 {
            spins += 1;
            let id = areas[rng.gen_range(0..areas.len())];
            let dice = board.area(id).dice();
            if dice < MAX_DICE {
                board.area_mut(id).set_dice(dice + 1);
                budget -= 1;
            }
        }
    }

    board
}
