//! A single board cell.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Direction, PlayerColor, Tile};

/// Occupant list of a cell. More than one occupant only happens on gates.
pub type Occupants = SmallVec<[PlayerColor; 2]>;

/// Tile, stored orientation and occupants of one cell.
///
/// A cell without a tile is "unexplored" and has no open directions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub tile: Option<Tile>,
    pub orientation: Direction,
    pub occupants: Occupants,
}

impl Cell {
    #[must_use]
    pub fn is_explored(&self) -> bool {
        self.tile.is_some()
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Effective exits of this cell; empty when unexplored.
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.tile
            .into_iter()
            .flat_map(move |t| t.open_directions(self.orientation))
    }

    #[must_use]
    pub fn opens_towards(&self, d: Direction) -> bool {
        self.open_directions().any(|od| od == d)
    }

    #[must_use]
    pub fn holds_monster(&self) -> bool {
        self.tile.is_some_and(Tile::is_monster)
    }

    #[must_use]
    pub(crate) fn with_tile(&self, tile: Tile, orientation: Direction) -> Self {
        Self {
            tile: Some(tile),
            orientation,
            occupants: self.occupants.clone(),
        }
    }

    #[must_use]
    pub(crate) fn without_tile(&self) -> Self {
        Self {
            tile: None,
            orientation: Direction::North,
            occupants: self.occupants.clone(),
        }
    }

    #[must_use]
    pub(crate) fn with_occupant(&self, color: PlayerColor) -> Self {
        let mut next = self.clone();
        next.occupants.push(color);
        next
    }

    #[must_use]
    pub(crate) fn without_occupant(&self, color: PlayerColor) -> Self {
        let mut next = self.clone();
        next.occupants.retain(|c| *c != color);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell() {
        let cell = Cell::default();

        assert!(!cell.is_explored());
        assert!(!cell.is_occupied());
        assert_eq!(cell.open_directions().count(), 0);
    }

    #[test]
    fn test_occupants_keep_order() {
        let cell = Cell::default()
            .with_tile(Tile::Gate, Direction::North)
            .with_occupant(PlayerColor::Red)
            .with_occupant(PlayerColor::Blue);

        assert_eq!(cell.occupants.as_slice(), &[PlayerColor::Red, PlayerColor::Blue]);

        let left = cell.without_occupant(PlayerColor::Red);
        assert_eq!(left.occupants.as_slice(), &[PlayerColor::Blue]);
        assert!(cell.is_occupied());
    }

    #[test]
    fn test_opens_towards() {
        let cell = Cell::default().with_tile(Tile::StraightPassage, Direction::East);

        assert!(cell.opens_towards(Direction::East));
        assert!(cell.opens_towards(Direction::West));
        assert!(!cell.opens_towards(Direction::North));
    }
}
