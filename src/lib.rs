//! Hegemon engine library.
//!
//! A multi-player game-tree search engine for territory dice games:
//! the board model, combat model, snapshot/rollback discipline, maxn
//! search with a cached per-turn decision tree, and a driver-facing
//! engine, plus a self-play harness for whole games.

pub mod board;
pub mod combat;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod search;
pub mod selfplay;
pub mod snapshot;
