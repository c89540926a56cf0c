//! Search and planning.
//!
//! The maxn engine explores the space of attacks, transfers, and end-turns
//! for every player in order, producing a cached decision tree that answers
//! the rest of the turn's moves without re-searching.

pub mod maxn;
pub mod move_tree;
pub mod reinforce;

pub use maxn::{MaxN, SearchError, SearchStats};
pub use move_tree::MoveNode;
pub use reinforce::{distribute_optimistic, distribute_pessimistic};
