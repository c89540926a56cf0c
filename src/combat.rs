//! Combat model: attack and transfer arithmetic, win probabilities, and
//! end-turn reinforcement sizing.
//!
//! The three mutating operations are the only code allowed to change dice
//! counts during a search, and each keeps every touched area inside [1,8]
//! by construction. The win-probability table is the game's precomputed
//! distribution of "sum of N attacker dice beats sum of M defender dice";
//! an attack with a single die can never win.

use crate::board::{AreaId, Board, Player, MAX_DICE};

/// P(attacker rolls strictly higher), indexed `[attacker - 1][defender - 1]`.
#[rustfmt::skip]
const ATTACK_SUCCESS: [[f32; 8]; 8] = [
    // attacker 1: a lone die cannot attack
    [0.0,        0.0,        0.0,        0.0,        0.0,        0.0,        0.0,        0.0       ],
    [0.83796296, 0.44367284, 0.15200617, 0.03587963, 0.00610497, 0.00076625, 0.00007095, 0.00000473],
    [0.97299383, 0.77854938, 0.45357510, 0.19170096, 0.06071269, 0.01487860, 0.00288998, 0.00045192],
    [0.99729938, 0.93923611, 0.74283050, 0.45952825, 0.22044235, 0.08342284, 0.02544975, 0.00637948],
    [0.99984568, 0.98794224, 0.90934714, 0.71807842, 0.46365360, 0.24244910, 0.10362599, 0.03674187],
    [0.99999100, 0.99821589, 0.97529981, 0.88395347, 0.69961639, 0.46673060, 0.25998382, 0.12150697],
    [0.99999953, 0.99980134, 0.99466336, 0.96153588, 0.86237652, 0.68516499, 0.46913917, 0.27437553],
    [0.99999998, 0.99998345, 0.99906917, 0.98953404, 0.94773146, 0.83903716, 0.67822251, 0.47109073],
];

/// Reinforcement gain per end-turn is capped here regardless of region size
/// and banked reserve.
pub const MAX_END_TURN_GAIN: u16 = 64;

/// Probability that `attacker_dice` beat `defender_dice`.
///
/// # Panics
/// Panics if either count is outside [1,8].
pub fn attack_success_probability(attacker_dice: u8, defender_dice: u8) -> f32 {
    assert!((1..=MAX_DICE).contains(&attacker_dice), "attacker dice out of range");
    assert!((1..=MAX_DICE).contains(&defender_dice), "defender dice out of range");
    ATTACK_SUCCESS[attacker_dice as usize - 1][defender_dice as usize - 1]
}

/// Probability the current owner keeps `area` against its strongest
/// adjacent enemy. 1.0 when no enemy is adjacent.
pub fn hold_probability(board: &Board, area: AreaId) -> f32 {
    let defender = board.area(area);
    let mut worst: f32 = 0.0;
    for &neighbor in defender.neighbors() {
        let enemy = board.area(neighbor);
        if enemy.owner() == defender.owner() {
            continue;
        }
        worst = worst.max(attack_success_probability(enemy.dice(), defender.dice()));
    }
    1.0 - worst
}

/// Applies a won attack: the target flips to the attacker and receives the
/// source's dice minus the one left behind.
pub fn successful_attack(board: &mut Board, source: AreaId, target: AreaId, attacker: Player) {
    let source_dice = board.area(source).dice();
    debug_assert!(source_dice > 1, "attack from a single die");
    board.area_mut(source).set_dice(1);
    let tgt = board.area_mut(target);
    tgt.set_dice(source_dice - 1);
    tgt.set_owner(Some(attacker));
}

/// Applies a lost attack: the source collapses to one die, and the defender
/// loses dice scaled by how large the attack was (never below one).
pub fn failed_attack(board: &mut Board, source: AreaId, target: AreaId) {
    let source_dice = board.area(source).dice();
    board.area_mut(source).set_dice(1);
    let loss = match source_dice {
        8 => 2,
        4..=7 => 1,
        _ => 0,
    };
    let tgt = board.area_mut(target);
    tgt.set_dice(tgt.dice().saturating_sub(loss).max(1));
}

/// Moves as many dice as fit from source to target, leaving at least one
/// behind and never exceeding the cap. Returns the magnitude moved.
pub fn transfer(board: &mut Board, source: AreaId, target: AreaId) -> u8 {
    let source_dice = board.area(source).dice();
    let target_dice = board.area(target).dice();
    let magnitude = (MAX_DICE - target_dice).min(source_dice - 1);
    board.area_mut(source).set_dice(source_dice - magnitude);
    board.area_mut(target).set_dice(target_dice + magnitude);
    magnitude
}

/// Dice awarded at end of turn: largest region plus banked reserve,
/// capped at [`MAX_END_TURN_GAIN`].
pub fn end_turn_gain(board: &Board, player: Player, reserve: u16) -> u16 {
    let unbound = board.largest_region_size(player) as u16 + reserve;
    unbound.min(MAX_END_TURN_GAIN)
}

/// Cap on a player's banked reserve: |24 - area count|.
pub fn reserve_cap(board: &Board, player: Player) -> u16 {
    (24i32 - board.player_area_count(player) as i32).unsigned_abs() as u16
}
