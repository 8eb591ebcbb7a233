//! Game setup: player validation, board size and the shuffled deck.

mod builder;

pub use builder::{DeckSpec, GameBuilder};

use crate::core::{Game, PlayerColor, SetupError};

/// Standard game for the given colors (in turn order).
pub fn new_game(colors: &[PlayerColor], seed: u64) -> Result<Game, SetupError> {
    GameBuilder::new()
        .players(colors.iter().copied())
        .seed(seed)
        .build()
}
