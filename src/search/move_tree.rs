//! The cached decision tree produced by a search.
//!
//! Each node records the command to submit, a per-player score vector
//! indexed by the fixed turn order, and its continuations. Attack nodes
//! always carry both outcomes so the tree can be descended against the
//! real result; other nodes carry at most one continuation.

use crate::board::{AreaId, Board, Command, Player};

/// One node of the cached decision tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveNode {
    /// An attack with both explored outcomes. `target` is the attacked
    /// area, consulted later to tell the outcomes apart on the real board.
    Attack {
        command: Command,
        target: AreaId,
        scores: Vec<f32>,
        success: Box<MoveNode>,
        failure: Box<MoveNode>,
    },

    /// Any non-attack move: a transfer with its continuation, or an
    /// end-turn / leaf with none.
    Other {
        command: Command,
        scores: Vec<f32>,
        next: Option<Box<MoveNode>>,
    },
}

impl MoveNode {
    /// A node with a directly supplied score vector and no continuation.
    pub fn leaf(command: Command, scores: Vec<f32>) -> Self {
        MoveNode::Other {
            command,
            scores,
            next: None,
        }
    }

    /// A node whose score vector is copied from its sole continuation.
    pub fn step(command: Command, next: MoveNode) -> Self {
        MoveNode::Other {
            scores: next.scores().to_vec(),
            command,
            next: Some(Box::new(next)),
        }
    }

    /// Combines the two explored outcomes of an attack.
    ///
    /// The branch the attacker itself prefers (success on ties) supplies
    /// the node's score vector, scaled by that branch's occurrence
    /// probability — success probability for the success branch, its
    /// complement for the failure branch. The non-preferred branch does
    /// not contribute to the vector at all.
    pub fn attack(
        source: AreaId,
        target: AreaId,
        attacker_index: usize,
        success_probability: f32,
        success: MoveNode,
        failure: MoveNode,
    ) -> Self {
        let (preferred, weight) =
            if success.score_for(attacker_index) >= failure.score_for(attacker_index) {
                (&success, success_probability)
            } else {
                (&failure, 1.0 - success_probability)
            };
        let scores = preferred.scores().iter().map(|s| s * weight).collect();
        MoveNode::Attack {
            command: Command::Attack { source, target },
            target,
            scores,
            success: Box::new(success),
            failure: Box::new(failure),
        }
    }

    /// The command this node submits.
    pub fn command(&self) -> Command {
        match self {
            MoveNode::Attack { command, .. } | MoveNode::Other { command, .. } => *command,
        }
    }

    /// The per-player score vector, indexed by the fixed turn order.
    pub fn scores(&self) -> &[f32] {
        match self {
            MoveNode::Attack { scores, .. } | MoveNode::Other { scores, .. } => scores,
        }
    }

    /// One player's component of the score vector.
    pub fn score_for(&self, index: usize) -> f32 {
        self.scores()[index]
    }

    /// Descends one level against ground truth.
    ///
    /// An attack node consults the current board: if the attacked area is
    /// now owned by the acting player the attack succeeded, so the success
    /// child is taken, otherwise the failure child. Other nodes yield their
    /// sole continuation, or nothing when the tree is exhausted.
    pub fn into_child(self, board: &Board, acting_player: Player) -> Option<MoveNode> {
        match self {
            MoveNode::Attack {
                target,
                success,
                failure,
                ..
            } => {
                if board.area(target).is_owned_by(acting_player) {
                    Some(*success)
                } else {
                    Some(*failure)
                }
            }
            MoveNode::Other { next, .. } => next.map(|n| *n),
        }
    }
}
