//! Depth-limited multi-player search.
//!
//! Every player in the simulation — the agent and its opponents alike —
//! greedily maximizes its own component of the score vector at its own
//! decision points; nobody minimizes anyone else. The board is mutated in
//! place and restored around every explored branch, and one ply means one
//! full round of the table: the counter only drops when the turn wraps
//! back to the searching agent.
//!
//! A turn is searched once in full; the remaining moves of the turn are
//! answered from the cached tree by descending it against the real
//! outcome of each submitted command.

use std::time::{Duration, Instant};

use crate::board::{Area, AreaId, Board, Command, Player, MAX_DICE};
use crate::combat;
use crate::movegen::{possible_attacks, possible_transfers, MovePair};
use crate::snapshot::{BoardMemento, PairMemento, PlayerMemento};

use super::move_tree::MoveNode;

/// Raised when a simulation step leaves the board in a state no rollback
/// discipline should ever produce. Indicates a defect, not a game state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("area {area} holds {dice} dice after a simulated step, outside [1,8]")]
    DiceOutOfRange { area: AreaId, dice: u8 },
}

/// Statistics from the most recent full search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub elapsed: Duration,
    pub plies: u32,
}

/// Working state threaded through one search call.
struct Ctx {
    reserves: Vec<u16>,
    transfers: Vec<MovePair>,
    nodes: u64,
}

/// The search engine. Generic over its injected capabilities: the leaf
/// evaluator and the attack/transfer admissibility gates.
///
/// One instance drives one agent. The cached tree and the banked-reserve
/// vector belong to the instance; at most one search may be in flight.
pub struct MaxN<E, A, T>
where
    E: Fn(&Board, Player) -> f32,
    A: Fn(&Board, Player, &Area, &Area) -> bool,
    T: Fn(&Board, MovePair, &[MovePair]) -> bool,
{
    agent: Player,
    players_order: Vec<Player>,
    max_transfers: u8,
    evaluate: E,
    attack_filter: A,
    transfer_filter: T,
    reserves: Vec<u16>,
    root: Option<MoveNode>,
    stats: SearchStats,
}

impl<E, A, T> MaxN<E, A, T>
where
    E: Fn(&Board, Player) -> f32,
    A: Fn(&Board, Player, &Area, &Area) -> bool,
    T: Fn(&Board, MovePair, &[MovePair]) -> bool,
{
    /// Creates an engine for `agent`.
    ///
    /// # Panics
    /// Panics if `players_order` is empty or does not contain `agent`.
    pub fn new(
        agent: Player,
        players_order: Vec<Player>,
        max_transfers: u8,
        evaluate: E,
        attack_filter: A,
        transfer_filter: T,
    ) -> Self {
        assert!(!players_order.is_empty(), "players_order must be non-empty");
        assert!(
            players_order.contains(&agent),
            "agent must appear in players_order"
        );
        let player_count = players_order.len();
        MaxN {
            agent,
            players_order,
            max_transfers,
            evaluate,
            attack_filter,
            transfer_filter,
            reserves: vec![0; player_count],
            root: None,
            stats: SearchStats::default(),
        }
    }

    /// Runs one full search and caches the resulting tree.
    ///
    /// The board is destructively simulated and restored; it is identical
    /// to its pre-call state when this returns. If the rollback discipline
    /// is ever violated the search is discarded, the board restored from
    /// the entry snapshot, and `EndTurn` returned as the safe default.
    pub fn simulate(&mut self, board: &mut Board, max_plies: u32) -> Command {
        let started = Instant::now();
        let guard = BoardMemento::capture(board);
        let mut ctx = Ctx {
            reserves: self.reserves.clone(),
            transfers: Vec::new(),
            nodes: 0,
        };

        let outcome = self.maximize(board, self.agent, max_plies, &mut ctx);
        self.stats = SearchStats {
            nodes: ctx.nodes,
            elapsed: started.elapsed(),
            plies: max_plies,
        };

        match outcome {
            Ok(root) => {
                let clean = guard.matches(board);
                debug_assert!(clean, "board drifted from its pre-search state");
                if !clean {
                    eprintln!("search: board drifted from its pre-search state, discarding tree");
                    guard.restore(board);
                    self.root = None;
                    return Command::EndTurn;
                }
                let command = root.command();
                self.root = Some(root);
                command
            }
            Err(e) => {
                eprintln!("search aborted: {e}");
                guard.restore(board);
                self.root = None;
                Command::EndTurn
            }
        }
    }

    /// Answers the next move of the turn from the cached tree, descending
    /// one level against the real board. `EndTurn` once the tree is
    /// exhausted or no tree is cached.
    pub fn command(&mut self, board: &Board) -> Command {
        match self.root.take() {
            Some(node) => match node.into_child(board, self.agent) {
                Some(child) => {
                    let command = child.command();
                    self.root = Some(child);
                    command
                }
                None => Command::EndTurn,
            },
            None => Command::EndTurn,
        }
    }

    /// The cached tree, if a search result is still being consumed.
    pub fn cached(&self) -> Option<&MoveNode> {
        self.root.as_ref()
    }

    /// Statistics from the most recent `simulate` call.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn agent(&self) -> Player {
        self.agent
    }

    /// One decision point: pick the candidate that maximizes the acting
    /// player's own score component. End-turn is always legal and is
    /// evaluated first, so it wins exact ties and survives empty candidate
    /// lists.
    fn maximize(
        &self,
        board: &mut Board,
        current: Player,
        plies: u32,
        ctx: &mut Ctx,
    ) -> Result<MoveNode, SearchError> {
        ctx.nodes += 1;
        if plies == 0 {
            return Ok(MoveNode::leaf(Command::EndTurn, self.evaluate_all(board)));
        }
        let deciding = self.order_of(current);

        let mut best = self.end_turn_candidate(board, current, plies, ctx)?;

        if (ctx.transfers.len() as u8) < self.max_transfers {
            for (source, target) in possible_transfers(board, current) {
                if !(self.transfer_filter)(board, (source, target), &ctx.transfers) {
                    continue;
                }
                let candidate =
                    self.transfer_candidate(board, current, plies, (source, target), ctx)?;
                if candidate.score_for(deciding) > best.score_for(deciding) {
                    best = candidate;
                }
            }
        }

        for (source, target) in possible_attacks(board, current) {
            if !(self.attack_filter)(board, self.agent, board.area(source), board.area(target)) {
                continue;
            }
            let candidate = self.attack_candidate(board, current, plies, (source, target), ctx)?;
            if candidate.score_for(deciding) > best.score_for(deciding) {
                best = candidate;
            }
        }

        Ok(best)
    }

    /// Simulates ending the turn: reinforce, bank the leftover, hand the
    /// board to the next player, and recurse. The player's whole area set
    /// and reserve entry are restored as one unit on the way out.
    fn end_turn_candidate(
        &self,
        board: &mut Board,
        current: Player,
        plies: u32,
        ctx: &mut Ctx,
    ) -> Result<MoveNode, SearchError> {
        let areas = PlayerMemento::capture(board, current);
        let index = self.order_of(current);
        let reserve_before = ctx.reserves[index];

        let gain = combat::end_turn_gain(board, current, reserve_before);
        let leftover = if current == self.agent {
            super::reinforce::distribute_pessimistic(board, current, gain)
        } else {
            super::reinforce::distribute_optimistic(board, current, self.agent, gain)
        };
        ctx.reserves[index] = leftover.min(combat::reserve_cap(board, current));

        let checked = self.check_player_dice(board, current);

        let next = self.next_player(current);
        let next_plies = if next == self.agent { plies - 1 } else { plies };

        let saved_transfers = std::mem::take(&mut ctx.transfers);
        let result = checked.and_then(|()| self.maximize(board, next, next_plies, ctx));
        ctx.transfers = saved_transfers;

        areas.restore(board);
        ctx.reserves[index] = reserve_before;

        let continuation = result?;
        Ok(MoveNode::leaf(
            Command::EndTurn,
            continuation.scores().to_vec(),
        ))
    }

    /// Simulates one transfer and recurses with it recorded against the
    /// per-turn limit and the anti-oscillation gate.
    fn transfer_candidate(
        &self,
        board: &mut Board,
        current: Player,
        plies: u32,
        (source, target): MovePair,
        ctx: &mut Ctx,
    ) -> Result<MoveNode, SearchError> {
        let pair = PairMemento::capture(board, source, target);
        combat::transfer(board, source, target);

        ctx.transfers.push((source, target));
        let result = self
            .check_areas_dice(board, &[source, target])
            .and_then(|()| self.maximize(board, current, plies, ctx));
        ctx.transfers.pop();

        pair.restore(board);
        let continuation = result?;
        Ok(MoveNode::step(
            Command::Transfer { source, target },
            continuation,
        ))
    }

    /// Simulates both outcomes of one attack and combines them. Transfer
    /// tracking is reset for the continuations: an attack commits the turn,
    /// so earlier shuffling no longer constrains it.
    fn attack_candidate(
        &self,
        board: &mut Board,
        current: Player,
        plies: u32,
        (source, target): MovePair,
        ctx: &mut Ctx,
    ) -> Result<MoveNode, SearchError> {
        let pair = PairMemento::capture(board, source, target);
        let probability =
            combat::attack_success_probability(board.area(source).dice(), board.area(target).dice());
        let saved_transfers = std::mem::take(&mut ctx.transfers);

        combat::successful_attack(board, source, target, current);
        let won = self
            .check_areas_dice(board, &[source, target])
            .and_then(|()| self.maximize(board, current, plies, ctx));
        pair.restore(board);

        let outcome = won.and_then(|success| {
            combat::failed_attack(board, source, target);
            let lost = self
                .check_areas_dice(board, &[source, target])
                .and_then(|()| self.maximize(board, current, plies, ctx));
            pair.restore(board);
            lost.map(|failure| (success, failure))
        });

        ctx.transfers = saved_transfers;
        let (success, failure) = outcome?;

        Ok(MoveNode::attack(
            source,
            target,
            self.order_of(current),
            probability,
            success,
            failure,
        ))
    }

    fn evaluate_all(&self, board: &Board) -> Vec<f32> {
        self.players_order
            .iter()
            .map(|&player| (self.evaluate)(board, player))
            .collect()
    }

    fn order_of(&self, player: Player) -> usize {
        self.players_order
            .iter()
            .position(|&p| p == player)
            .expect("player missing from turn order")
    }

    fn next_player(&self, current: Player) -> Player {
        let index = self.order_of(current);
        self.players_order[(index + 1) % self.players_order.len()]
    }

    /// Dice-range check after a destructive step. These fire only on a
    /// rollback or arithmetic defect, never on legal game states.
    fn check_areas_dice(&self, board: &Board, areas: &[AreaId]) -> Result<(), SearchError> {
        for &id in areas {
            let dice = board.area(id).dice();
            debug_assert!(
                (1..=MAX_DICE).contains(&dice),
                "area {id} left with {dice} dice"
            );
            if !(1..=MAX_DICE).contains(&dice) {
                return Err(SearchError::DiceOutOfRange { area: id, dice });
            }
        }
        Ok(())
    }

    fn check_player_dice(&self, board: &Board, player: Player) -> Result<(), SearchError> {
        let areas = board.player_areas(player);
        self.check_areas_dice(board, &areas)
    }
}
