//! Position evaluation.
//!
//! Scores a board for one player at a time; the search engine fills its
//! per-player score vectors by calling an injected evaluator for every
//! player in turn order.

pub mod heuristic;

pub use heuristic::{dice_advantage, frontier_hold, territory_strength};
