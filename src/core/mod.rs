//! Core types: coordinates, tiles, players, moves, errors and the game state.
//!
//! Everything here is plain data plus mechanical state transitions. Rule
//! checks live in [`crate::rules`].

pub mod action;
pub mod deck;
pub mod direction;
pub mod error;
pub mod player;
pub mod position;
pub mod rng;
pub mod state;
pub mod tile;

pub use action::{Move, MoveKind, MoveParam};
pub use deck::TileHolder;
pub use direction::{Direction, FallAxis};
pub use error::{
    ErrorSeverity, IllegalMove, InternalError, RuleError, SetupError, SnapshotError, WireError,
};
pub use player::{Player, PlayerColor};
pub use position::Position;
pub use rng::GameRng;
pub use state::Game;
pub use tile::Tile;
