//! Board representation and game-state types.
//!
//! Contains the territory graph (areas, ownership, dice, adjacency), derived
//! connected-region computation, the command type handed to the turn driver,
//! and helpers for building boards from fixtures or at random.

pub mod area;
pub mod command;
pub mod generate;
pub mod region;
pub mod setup;
pub mod state;

pub use area::{Area, AreaId, Player, MAX_DICE};
pub use command::Command;
pub use generate::random_board;
pub use setup::{AreaSetup, BoardSetup, SetupError};
pub use state::Board;
