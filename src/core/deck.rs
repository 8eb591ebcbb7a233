//! The shuffled tile sequence and its draw cursor.
//!
//! Drawing never removes a tile: only `draw_index` moves forward, so the
//! full sequence stays available for replays and diagnostics.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::tile::Tile;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileHolder {
    tiles: Vector<Tile>,
    draw_index: usize,
}

impl TileHolder {
    #[must_use]
    pub fn new(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
            draw_index: 0,
        }
    }

    /// Total number of tiles, drawn or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn draw_index(&self) -> usize {
        self.draw_index
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tiles.len() - self.draw_index
    }

    /// No tile left to draw ("final flickers").
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.draw_index >= self.tiles.len()
    }

    /// Next tile to be drawn.
    #[must_use]
    pub fn peek(&self) -> Option<Tile> {
        self.tiles.get(self.draw_index).copied()
    }

    /// Most recently drawn tile.
    #[must_use]
    pub fn last_drawn(&self) -> Option<Tile> {
        self.draw_index
            .checked_sub(1)
            .and_then(|i| self.tiles.get(i).copied())
    }

    /// Draw one tile, or `None` when exhausted.
    #[must_use]
    pub fn draw(&self) -> Option<(Self, Tile)> {
        let tile = self.peek()?;
        Some((self.advanced(1), tile))
    }

    /// Advance the cursor by `n`, stopping at the end of the deck.
    #[must_use]
    pub fn advanced(&self, n: usize) -> Self {
        Self {
            tiles: self.tiles.clone(),
            draw_index: (self.draw_index + n).min(self.tiles.len()),
        }
    }

    /// Every tile in deck order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }
}
