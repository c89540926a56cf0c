//! Driver-facing engine.
//!
//! Wraps one search instance with the default evaluator and admissibility
//! gates, and applies the per-turn protocol: one full search on the first
//! move of a turn, cached-tree descent for every move after it, and an
//! unconditional end-turn once the clock runs low.

use std::time::Duration;

use crate::board::{Area, Board, Command, Player};
use crate::eval::territory_strength;
use crate::movegen::{favorable_attack, non_oscillating_transfer, MovePair};
use crate::search::{MaxN, SearchStats};

/// Errors raised when an engine is configured inconsistently. These are
/// fatal: the engine is never constructed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("search depth must be at least one ply")]
    ZeroSearchDepth,

    #[error("turn order must not be empty")]
    EmptyPlayerOrder,

    #[error("agent {0} does not appear in the turn order")]
    AgentNotInOrder(Player),
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Full rounds of the table to search (must be >= 1).
    pub search_plies: u32,
    /// Transfers explored per simulated turn.
    pub search_transfers: u8,
    /// The game's per-turn transfer cap; transfer commands are suppressed
    /// once the driver reports this many already made.
    pub turn_transfer_limit: u32,
    /// End the turn outright when less than this much time remains.
    pub time_floor: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            search_plies: 2,
            search_transfers: 1,
            turn_transfer_limit: 6,
            time_floor: Duration::from_secs(2),
        }
    }
}

/// What the driver knows about the turn in progress.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext {
    /// Moves already made this turn (0 on the first call of a turn).
    pub moves_this_turn: u32,
    /// Transfers already made this turn.
    pub transfers_this_turn: u32,
    /// Wall-clock budget remaining for this agent.
    pub time_left: Duration,
}

type EvalFn = fn(&Board, Player) -> f32;
type AttackFilterFn = fn(&Board, Player, &Area, &Area) -> bool;
type TransferFilterFn = fn(&Board, MovePair, &[MovePair]) -> bool;

/// One agent's decision loop over a whole game.
pub struct Engine {
    config: EngineConfig,
    search: MaxN<EvalFn, AttackFilterFn, TransferFilterFn>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine for `agent` with the default evaluator and gates.
    pub fn new(
        agent: Player,
        players_order: Vec<Player>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        if config.search_plies == 0 {
            return Err(EngineError::ZeroSearchDepth);
        }
        if players_order.is_empty() {
            return Err(EngineError::EmptyPlayerOrder);
        }
        if !players_order.contains(&agent) {
            return Err(EngineError::AgentNotInOrder(agent));
        }
        Ok(Engine {
            search: MaxN::new(
                agent,
                players_order,
                config.search_transfers,
                territory_strength,
                favorable_attack,
                non_oscillating_transfer,
            ),
            config,
        })
    }

    /// Picks the next command of the turn.
    ///
    /// The first move of a turn triggers the full search; later moves are
    /// answered from the cached tree against the real board. Below the time
    /// floor the turn ends immediately, and transfers stop once the game's
    /// per-turn cap is reached.
    pub fn act(&mut self, board: &mut Board, turn: &TurnContext) -> Command {
        if turn.time_left < self.config.time_floor {
            return Command::EndTurn;
        }

        let command = if turn.moves_this_turn == 0 {
            self.search.simulate(board, self.config.search_plies)
        } else {
            self.search.command(board)
        };

        match command {
            Command::Transfer { .. }
                if turn.transfers_this_turn >= self.config.turn_transfer_limit =>
            {
                Command::EndTurn
            }
            other => other,
        }
    }

    pub fn agent(&self) -> Player {
        self.search.agent()
    }

    /// Statistics from the most recent full search.
    pub fn stats(&self) -> SearchStats {
        self.search.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duel_board() -> Board {
        let mut b = Board::new();
        b.add_area(1, Some(0), 5);
        b.add_area(2, Some(1), 3);
        b.add_area(3, Some(1), 2);
        b.connect(1, 2);
        b.connect(2, 3);
        b
    }

    fn first_move(time_left: Duration) -> TurnContext {
        TurnContext {
            moves_this_turn: 0,
            transfers_this_turn: 0,
            time_left,
        }
    }

    #[test]
    fn config_validation_is_fatal() {
        let bad = EngineConfig {
            search_plies: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            Engine::new(0, vec![0, 1], bad).unwrap_err(),
            EngineError::ZeroSearchDepth
        );
        assert_eq!(
            Engine::new(0, vec![], EngineConfig::default()).unwrap_err(),
            EngineError::EmptyPlayerOrder
        );
        assert_eq!(
            Engine::new(5, vec![0, 1], EngineConfig::default()).unwrap_err(),
            EngineError::AgentNotInOrder(5)
        );
    }

    #[test]
    fn low_clock_ends_the_turn_without_searching() {
        let mut engine = Engine::new(0, vec![0, 1], EngineConfig::default()).unwrap();
        let mut board = duel_board();
        let command = engine.act(&mut board, &first_move(Duration::from_millis(500)));
        assert_eq!(command, Command::EndTurn);
        assert_eq!(engine.stats().nodes, 0);
    }

    #[test]
    fn first_move_searches_and_later_moves_descend() {
        let config = EngineConfig {
            search_plies: 1,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(0, vec![0, 1], config).unwrap();
        let mut board = duel_board();

        let command = engine.act(&mut board, &first_move(Duration::from_secs(9)));
        assert_eq!(command, Command::Attack { source: 1, target: 2 });
        assert!(engine.stats().nodes > 0);

        // Pretend the attack failed; the follow-up comes from the cache.
        crate::combat::failed_attack(&mut board, 1, 2);
        let followup = engine.act(
            &mut board,
            &TurnContext {
                moves_this_turn: 1,
                transfers_this_turn: 0,
                time_left: Duration::from_secs(8),
            },
        );
        assert_eq!(followup, Command::EndTurn);
    }

    #[test]
    fn transfer_commands_respect_the_turn_cap() {
        // A board where the best move is a transfer toward the border.
        let mut board = Board::new();
        board.add_area(1, Some(0), 6);
        board.add_area(2, Some(0), 2);
        board.add_area(3, Some(1), 8);
        board.connect(1, 2);
        board.connect(2, 3);

        let config = EngineConfig {
            search_plies: 1,
            turn_transfer_limit: 0,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(0, vec![0, 1], config).unwrap();
        let command = engine.act(&mut board, &first_move(Duration::from_secs(9)));
        // Whatever the search wanted, no transfer may be submitted.
        assert!(!matches!(command, Command::Transfer { .. }));
    }
}
