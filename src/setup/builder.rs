//! Game construction.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Game, GameRng, PlayerColor, SetupError, Tile};
use crate::rules::constants::{edge_length_for, MAX_PLAYERS};

/// Tile pools a deck is built from.
///
/// The opening pool is shuffled on its own and dealt first, so the first
/// draws are always plain passages. The remainder pool follows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSpec {
    pub opening: Vec<(Tile, usize)>,
    pub remainder: Vec<(Tile, usize)>,
}

impl DeckSpec {
    /// Standard pools for a player count: 76 tiles up to four players,
    /// 75 for five.
    #[must_use]
    pub fn standard(player_count: usize) -> Self {
        if player_count > 4 {
            Self {
                opening: vec![
                    (Tile::TPassage, 5),
                    (Tile::FourWayPassage, 3),
                    (Tile::StraightPassage, 2),
                ],
                remainder: vec![
                    (Tile::Key, 7),
                    (Tile::WaxEater, 10),
                    (Tile::Gate, 4),
                    (Tile::TPassage, 27),
                    (Tile::FourWayPassage, 9),
                    (Tile::StraightPassage, 8),
                ],
            }
        } else {
            Self {
                opening: vec![
                    (Tile::TPassage, 4),
                    (Tile::FourWayPassage, 2),
                    (Tile::StraightPassage, 2),
                ],
                remainder: vec![
                    (Tile::Key, 6),
                    (Tile::WaxEater, 12),
                    (Tile::Gate, 4),
                    (Tile::TPassage, 28),
                    (Tile::FourWayPassage, 10),
                    (Tile::StraightPassage, 8),
                ],
            }
        }
    }

    /// Total number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.opening
            .iter()
            .chain(&self.remainder)
            .map(|(_, n)| n)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shuffle both pools independently and deal opening first.
    #[must_use]
    pub fn shuffled(&self, rng: &GameRng) -> Vector<Tile> {
        let mut opening = expand(&self.opening);
        let mut remainder = expand(&self.remainder);

        rng.for_context("opening").shuffle(&mut opening);
        rng.for_context("remainder").shuffle(&mut remainder);

        opening.into_iter().chain(remainder).collect()
    }
}

fn expand(pool: &[(Tile, usize)]) -> Vec<Tile> {
    pool.iter()
        .flat_map(|&(tile, n)| std::iter::repeat(tile).take(n))
        .collect()
}

/// Builder for a new game.
///
/// ```
/// use tng_engine::core::PlayerColor;
/// use tng_engine::setup::GameBuilder;
///
/// let game = GameBuilder::new()
///     .player(PlayerColor::Red)
///     .player(PlayerColor::Blue)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(game.board().len(), 36);
/// assert_eq!(game.tile_holder().len(), 76);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    colors: Vec<PlayerColor>,
    seed: u64,
    deck_spec: Option<DeckSpec>,
    deck: Option<Vec<Tile>>,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player; turn order follows insertion order.
    #[must_use]
    pub fn player(mut self, color: PlayerColor) -> Self {
        self.colors.push(color);
        self
    }

    #[must_use]
    pub fn players(mut self, colors: impl IntoIterator<Item = PlayerColor>) -> Self {
        self.colors.extend(colors);
        self
    }

    /// Seed for the deck shuffle.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the standard pools.
    #[must_use]
    pub fn deck_spec(mut self, spec: DeckSpec) -> Self {
        self.deck_spec = Some(spec);
        self
    }

    /// Use this exact tile sequence instead of shuffling.
    #[must_use]
    pub fn deck(mut self, tiles: Vec<Tile>) -> Self {
        self.deck = Some(tiles);
        self
    }

    /// Validate the configuration and deal the initial state.
    pub fn build(self) -> Result<Game, SetupError> {
        let count = self.colors.len();

        if count == 0 {
            return Err(SetupError::NoPlayers);
        }
        if count > MAX_PLAYERS {
            return Err(SetupError::TooManyPlayers(count));
        }
        for (i, color) in self.colors.iter().enumerate() {
            if self.colors[..i].contains(color) {
                return Err(SetupError::DuplicateColor(*color));
            }
        }

        let tiles = match self.deck {
            Some(tiles) => tiles.into_iter().collect(),
            None => self
                .deck_spec
                .unwrap_or_else(|| DeckSpec::standard(count))
                .shuffled(&GameRng::new(self.seed)),
        };

        if tiles.is_empty() {
            return Err(SetupError::EmptyDeck);
        }

        tracing::debug!(players = count, tiles = tiles.len(), seed = self.seed, "game dealt");

        Ok(Game::new(edge_length_for(count), &self.colors, tiles))
    }
}
