//! # tng-engine
//!
//! Rules engine for a cooperative tile-revealing escape game: players start
//! in the dark on a toroidal board, reveal passages around them, collect
//! keys, dodge wax eaters and try to meet on a gate before the tiles run
//! out.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `apply_move(&Game, &Move) -> Result<Game, _>`.
//!    The input state is never modified and the same inputs always give the
//!    same result. Randomness is confined to the seeded deck shuffle at
//!    setup.
//!
//! 2. **Persistent data structures**: O(1) cloning via `im-rs`, so every
//!    move derives a new state sharing structure with the previous one.
//!
//! 3. **Explicit turn structure**: a phase stack plus a queue of pending
//!    decisions model the nested sub-procedures of a turn.
//!
//! ## Modules
//!
//! - `core`: Coordinates, tiles, players, moves, errors and the game state
//! - `board`: Toroidal grid of cells and one-sided connectivity
//! - `stack`: Phase stack and pending-decision queue
//! - `monsters`: Monster ray casting, chain reactions and attacks
//! - `lighting`: Enlightened cells and dropping unlit tiles
//! - `rules`: Phase handlers and the move dispatcher
//! - `setup`: Game builder and deck composition
//! - `view`: Serializable read model
//!
//! ## Example
//!
//! ```
//! use tng_engine::{apply_move, new_game, Move, MoveParam, Phase, PlayerColor, Position};
//!
//! let game = new_game(&[PlayerColor::Red, PlayerColor::Blue], 42).unwrap();
//! let mv = Move::new(PlayerColor::Red, MoveParam::PlaceTile { pos: Position::new(2, 2) });
//!
//! let next = apply_move(&game, &mv).unwrap();
//! assert_eq!(next.phase(), Phase::RotatePlaced);
//! assert_eq!(game.phase(), Phase::PlaceStart);
//! ```

pub mod board;
pub mod core;
pub mod lighting;
pub mod monsters;
pub mod rules;
pub mod setup;
pub mod stack;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    Direction, FallAxis, Position,
    Tile, Player, PlayerColor,
    Move, MoveKind, MoveParam,
    Game, TileHolder, GameRng,
    ErrorSeverity, IllegalMove, InternalError, RuleError, SetupError, SnapshotError, WireError,
};

pub use crate::board::{Board, Cell};

pub use crate::stack::{Decision, DecisionQueue, Phase, PhaseStack};

pub use crate::rules::{apply_move, GameResult, Rules, RulesEngine};

pub use crate::setup::{new_game, DeckSpec, GameBuilder};

pub use crate::view::{CellView, PublicView};
