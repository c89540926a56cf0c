//! End-turn reinforcement distribution.
//!
//! Two deliberately asymmetric policies. The searching agent charges itself
//! pessimistically: interior areas soak up dice before the border sees any.
//! Opponents are credited optimistically: their dice land straight on the
//! borders that face the agent. The asymmetry biases the search toward
//! positions that survive a well-reinforced opponent.

use crate::board::{AreaId, Board, Player, MAX_DICE};

/// Distribution used when the acting player is the searching agent itself:
/// fill interior areas to capacity first, ascending by dice, then water-fill
/// the border with whatever remains. Returns the undistributed gain.
pub fn distribute_pessimistic(board: &mut Board, player: Player, gain: u16) -> u16 {
    let border = board.player_border(player);
    let interior: Vec<AreaId> = board
        .player_areas(player)
        .into_iter()
        .filter(|id| !border.contains(id))
        .collect();

    let gain = fill_weakest(board, &interior, gain);
    if gain == 0 {
        return 0;
    }
    water_fill(board, &border, gain)
}

/// Distribution used for modeled opponents: water-fill the player's border
/// areas that touch the agent's territory, then top off the weakest of the
/// player's areas. Returns the undistributed gain.
pub fn distribute_optimistic(board: &mut Board, player: Player, agent: Player, gain: u16) -> u16 {
    let facing: Vec<AreaId> = board
        .player_border(player)
        .into_iter()
        .filter(|&id| {
            board
                .area(id)
                .neighbors()
                .iter()
                .any(|&n| board.area(n).is_owned_by(agent))
        })
        .collect();

    let gain = water_fill(board, &facing, gain);
    if gain == 0 {
        return 0;
    }
    let all = board.player_areas(player);
    fill_weakest(board, &all, gain)
}

/// Tops areas up to the dice cap one area at a time, weakest first.
/// Returns the undistributed gain.
fn fill_weakest(board: &mut Board, areas: &[AreaId], mut gain: u16) -> u16 {
    let mut order: Vec<AreaId> = areas.to_vec();
    order.sort_by_key(|&id| (board.area(id).dice(), id));

    for id in order {
        if gain == 0 {
            break;
        }
        let dice = board.area(id).dice();
        let allocation = u16::from(MAX_DICE - dice).min(gain);
        gain -= allocation;
        board.area_mut(id).set_dice(dice + allocation as u8);
    }
    gain
}

/// Raises areas evenly, weakest first: the current prefix is lifted to the
/// next-higher area's dice count (the cap for the last), any remainder going
/// one die each to the top of the prefix. Returns the undistributed gain.
fn water_fill(board: &mut Board, areas: &[AreaId], mut gain: u16) -> u16 {
    let mut order: Vec<AreaId> = areas.to_vec();
    order.sort_by_key(|&id| (board.area(id).dice(), id));
    let count = order.len();

    for index in 0..count {
        if gain == 0 {
            break;
        }
        let dice = u16::from(board.area(order[index]).dice());
        let level = if index + 1 < count {
            u16::from(board.area(order[index + 1]).dice())
        } else {
            u16::from(MAX_DICE)
        };
        let prefix = (index + 1) as u16;
        let headroom = level.saturating_sub(dice);
        let allocation = (headroom * prefix).min(gain);
        let per_area = allocation / prefix;
        let remainder = allocation % prefix;
        gain -= allocation;

        for &id in &order[..=index] {
            let d = board.area(id).dice();
            board.area_mut(id).set_dice(d + per_area as u8);
        }
        for &id in &order[index + 1 - remainder as usize..=index] {
            let d = board.area(id).dice();
            board.area_mut(id).set_dice(d + 1);
        }
    }
    gain
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 and 2 are interior for player 0; 3 borders the enemy at 4.
    fn layered_board() -> Board {
        let mut b = Board::new();
        b.add_area(1, Some(0), 2);
        b.add_area(2, Some(0), 4);
        b.add_area(3, Some(0), 3);
        b.add_area(4, Some(1), 5);
        b.connect(1, 2);
        b.connect(2, 3);
        b.connect(3, 4);
        b
    }

    fn dice(board: &Board, id: AreaId) -> u8 {
        board.area(id).dice()
    }

    #[test]
    fn pessimistic_fills_interior_before_border() {
        let mut b = layered_board();
        let leftover = distribute_pessimistic(&mut b, 0, 5);
        assert_eq!(leftover, 0);
        // Weakest interior area first: 1 goes 2 -> 7; border untouched.
        assert_eq!(dice(&b, 1), 7);
        assert_eq!(dice(&b, 2), 4);
        assert_eq!(dice(&b, 3), 3);
    }

    #[test]
    fn pessimistic_spills_to_border_once_interior_is_full() {
        let mut b = layered_board();
        let leftover = distribute_pessimistic(&mut b, 0, 12);
        assert_eq!(leftover, 0);
        assert_eq!(dice(&b, 1), 8);
        assert_eq!(dice(&b, 2), 8);
        assert_eq!(dice(&b, 3), 5);
    }

    #[test]
    fn optimistic_reinforces_the_border_facing_the_agent() {
        let mut b = layered_board();
        // Player 1's only area borders player 0, so it gets everything.
        let leftover = distribute_optimistic(&mut b, 1, 0, 3);
        assert_eq!(leftover, 0);
        assert_eq!(dice(&b, 4), 8);
    }

    #[test]
    fn optimistic_tops_off_weakest_when_borders_are_full() {
        let mut b = layered_board();
        b.area_mut(4).set_dice(8);
        b.area_mut(3).set_owner(Some(1));
        // Area 3 faces the agent (via area 2); area 4 is already full and
        // no longer borders an enemy, so the spill lands on it last.
        let leftover = distribute_optimistic(&mut b, 1, 0, 7);
        assert_eq!(leftover, 2);
        assert_eq!(dice(&b, 3), 8);
        assert_eq!(dice(&b, 4), 8);
    }

    #[test]
    fn water_fill_levels_before_raising() {
        let mut b = Board::new();
        b.add_area(1, Some(0), 2);
        b.add_area(2, Some(0), 5);
        b.add_area(3, Some(0), 5);
        b.connect(1, 2);
        b.connect(2, 3);

        // 3 dice: area 1 levels up to 5 before anyone moves past it.
        let leftover = water_fill(&mut b, &[1, 2, 3], 3);
        assert_eq!(leftover, 0);
        assert_eq!(dice(&b, 1), 5);
        assert_eq!(dice(&b, 2), 5);
        assert_eq!(dice(&b, 3), 5);
    }

    #[test]
    fn water_fill_spreads_remainder_across_the_prefix() {
        let mut b = Board::new();
        b.add_area(1, Some(0), 4);
        b.add_area(2, Some(0), 4);
        b.connect(1, 2);

        // 5 dice over two level areas: one gets 3, the other 2, neither
        // exceeds the cap.
        let leftover = water_fill(&mut b, &[1, 2], 5);
        assert_eq!(leftover, 0);
        let total = u16::from(dice(&b, 1)) + u16::from(dice(&b, 2));
        assert_eq!(total, 13);
        assert!(dice(&b, 1) <= MAX_DICE && dice(&b, 2) <= MAX_DICE);
    }

    #[test]
    fn distribution_never_exceeds_the_cap() {
        let mut b = layered_board();
        let leftover = distribute_pessimistic(&mut b, 0, 64);
        for id in [1, 2, 3] {
            assert_eq!(dice(&b, id), MAX_DICE);
        }
        // 15 dice fit; the rest comes back for banking.
        assert_eq!(leftover, 64 - 15);
    }
}
