//! Self-play: whole games played in-process.
//!
//! Pits one engine per player against the others on a generated board,
//! resolving attacks with real dice rolls and applying the game's real
//! end-turn reinforcement. Used to exercise the engine end to end and to
//! compare configurations. Games are independent, so they run concurrently
//! when more than one thread is configured.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{random_board, AreaId, Board, Command, Player, MAX_DICE};
use crate::combat;
use crate::engine::{Engine, EngineConfig, EngineError, TurnContext};

/// Hard stop on moves within one turn, in case a cached tree and the real
/// board disagree in a loop.
const MAX_MOVES_PER_TURN: u32 = 128;

/// Configuration for a batch of self-play games.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Areas per generated board.
    pub area_count: usize,
    /// Number of players seated.
    pub player_count: u8,
    /// Search depth in full rounds.
    pub search_plies: u32,
    /// Rounds of the table before a game is called a draw.
    pub max_rounds: u32,
    /// Worker threads for concurrent games.
    pub threads: usize,
    /// Master seed; 0 draws one from entropy.
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            area_count: 24,
            player_count: 4,
            search_plies: 2,
            max_rounds: 200,
            threads: 4,
            seed: 0,
        }
    }
}

/// The result of one finished game.
#[derive(Debug, Clone, Copy)]
pub struct GameOutcome {
    /// The player left owning the whole board, or None on a draw.
    pub winner: Option<Player>,
    /// Rounds of the table played.
    pub rounds: u32,
    /// Commands submitted across the whole game.
    pub moves: u64,
}

/// Aggregated results of a batch.
#[derive(Debug, Clone, Default)]
pub struct SelfPlaySummary {
    /// Wins per player seat.
    pub wins: Vec<(Player, usize)>,
    pub draws: usize,
    pub outcomes: Vec<GameOutcome>,
}

/// Plays a batch of games, concurrently when `threads > 1`.
pub fn play_games(config: &SelfPlayConfig) -> Result<SelfPlaySummary, EngineError> {
    let base_seed = if config.seed == 0 {
        SmallRng::from_entropy().gen()
    } else {
        config.seed
    };

    let seeds: Vec<u64> = (0..config.num_games)
        .map(|i| base_seed.wrapping_add(i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .collect();

    let pool = (config.threads > 1)
        .then(|| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()
        })
        .and_then(|built| match built {
            Ok(pool) => Some(pool),
            Err(e) => {
                eprintln!("selfplay: thread pool unavailable ({e}); playing sequentially");
                None
            }
        });

    let outcomes: Vec<GameOutcome> = match pool {
        Some(pool) => {
            use rayon::prelude::*;
            pool.install(|| {
                seeds
                    .par_iter()
                    .map(|&seed| play_game(config, seed))
                    .collect::<Result<Vec<_>, _>>()
            })?
        }
        None => seeds
            .iter()
            .map(|&seed| play_game(config, seed))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let mut summary = SelfPlaySummary::default();
    for player in 0..config.player_count {
        let wins = outcomes.iter().filter(|o| o.winner == Some(player)).count();
        summary.wins.push((player, wins));
    }
    summary.draws = outcomes.iter().filter(|o| o.winner.is_none()).count();
    summary.outcomes = outcomes;
    Ok(summary)
}

/// Plays one game to completion.
pub fn play_game(config: &SelfPlayConfig, seed: u64) -> Result<GameOutcome, EngineError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let players: Vec<Player> = (0..config.player_count).collect();
    let mut board = random_board(config.area_count, &players, &mut rng);

    let engine_config = EngineConfig {
        search_plies: config.search_plies,
        ..EngineConfig::default()
    };
    let mut engines: Vec<Engine> = players
        .iter()
        .map(|&p| Engine::new(p, players.clone(), engine_config))
        .collect::<Result<_, _>>()?;

    let mut reserves: Vec<u16> = vec![0; players.len()];
    let mut moves: u64 = 0;

    for round in 0..config.max_rounds {
        for (seat, &player) in players.iter().enumerate() {
            if !board.is_alive(player) {
                continue;
            }
            play_turn(
                &mut board,
                &mut engines[seat],
                player,
                &mut reserves[seat],
                &mut moves,
                &mut rng,
            );

            if let Some(winner) = sole_survivor(&board, &players) {
                return Ok(GameOutcome {
                    winner: Some(winner),
                    rounds: round + 1,
                    moves,
                });
            }
        }
    }

    Ok(GameOutcome {
        winner: None,
        rounds: config.max_rounds,
        moves,
    })
}

/// Runs one player's turn: query the engine until it ends the turn, then
/// apply the real reinforcement.
fn play_turn(
    board: &mut Board,
    engine: &mut Engine,
    player: Player,
    reserve: &mut u16,
    moves: &mut u64,
    rng: &mut SmallRng,
) {
    let mut moves_this_turn = 0u32;
    let mut transfers_this_turn = 0u32;

    while moves_this_turn < MAX_MOVES_PER_TURN {
        let turn = TurnContext {
            moves_this_turn,
            transfers_this_turn,
            time_left: Duration::from_secs(10),
        };
        let command = engine.act(board, &turn);
        *moves += 1;

        match command {
            Command::EndTurn => break,
            Command::Attack { source, target } => {
                if !legal_attack(board, player, source, target) {
                    break;
                }
                let attacker_roll = roll(board.area(source).dice(), rng);
                let defender_roll = roll(board.area(target).dice(), rng);
                if attacker_roll > defender_roll {
                    combat::successful_attack(board, source, target, player);
                } else {
                    combat::failed_attack(board, source, target);
                }
            }
            Command::Transfer { source, target } => {
                if !legal_transfer(board, player, source, target) {
                    break;
                }
                combat::transfer(board, source, target);
                transfers_this_turn += 1;
            }
        }
        moves_this_turn += 1;
    }

    reinforce(board, player, reserve, rng);
}

/// The game's real end-turn reinforcement: largest region plus bank, placed
/// one die at a time onto random areas with room, the leftover banked under
/// the reserve cap.
fn reinforce(board: &mut Board, player: Player, reserve: &mut u16, rng: &mut SmallRng) {
    let mut gain = combat::end_turn_gain(board, player, *reserve);
    loop {
        let open: Vec<AreaId> = board
            .player_areas(player)
            .into_iter()
            .filter(|&id| board.area(id).dice() < MAX_DICE)
            .collect();
        if gain == 0 || open.is_empty() {
            break;
        }
        let id = open[rng.gen_range(0..open.len())];
        let dice = board.area(id).dice();
        board.area_mut(id).set_dice(dice + 1);
        gain -= 1;
    }
    *reserve = gain.min(combat::reserve_cap(board, player));
}

fn legal_attack(board: &Board, player: Player, source: AreaId, target: AreaId) -> bool {
    match (board.get_area(source), board.get_area(target)) {
        (Some(src), Some(tgt)) => {
            src.is_owned_by(player)
                && src.dice() > 1
                && src.is_adjacent_to(target)
                && !tgt.is_owned_by(player)
        }
        _ => false,
    }
}

fn legal_transfer(board: &Board, player: Player, source: AreaId, target: AreaId) -> bool {
    match (board.get_area(source), board.get_area(target)) {
        (Some(src), Some(tgt)) => {
            src.is_owned_by(player)
                && src.dice() > 1
                && src.is_adjacent_to(target)
                && tgt.is_owned_by(player)
                && tgt.dice() < MAX_DICE
        }
        _ => false,
    }
}

/// Sum of `count` six-sided dice.
fn roll(count: u8, rng: &mut SmallRng) -> u32 {
    (0..count).map(|_| rng.gen_range(1..=6u32)).sum()
}

/// The single player left alive, if the game is over.
fn sole_survivor(board: &Board, players: &[Player]) -> Option<Player> {
    let mut alive = players.iter().copied().filter(|&p| board.is_alive(p));
    let first = alive.next()?;
    alive.next().is_none().then_some(first)
}
