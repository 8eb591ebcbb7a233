//! The toroidal board.
//!
//! A fixed square of `edge_length²` cells addressed by wrapped `(x, y)`.
//! Every operation returns a new `Board`; the cell array is an `im::Vector`
//! so a changed board shares all untouched cells with its predecessor.
//!
//! ## Connectivity
//!
//! Connectivity is **one-sided**: a cell is connected towards `d` when its
//! own exits include `d`, whatever the neighbor looks like (it may even be
//! unexplored). This is what lets a lit player see the holes around them.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use crate::core::{Direction, InternalError, PlayerColor, Position, Tile};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    edge_length: usize,
    cells: Vector<Cell>,
}

impl Board {
    /// An empty board: every cell unexplored and unoccupied.
    #[must_use]
    pub fn new(edge_length: usize) -> Self {
        assert!(edge_length > 0, "Board must have at least one cell");

        Self {
            edge_length,
            cells: std::iter::repeat(Cell::default())
                .take(edge_length * edge_length)
                .collect(),
        }
    }

    #[must_use]
    pub fn edge_length(&self) -> usize {
        self.edge_length
    }

    /// Number of cells (`edge_length²`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells with their positions, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Position::from_index(i, self.edge_length), c))
    }

    /// Cell at a (wrapped) position.
    #[must_use]
    pub fn at(&self, pos: Position) -> &Cell {
        &self.cells[pos.index(self.edge_length)]
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.edge_length)
    }

    /// Neighbor one step towards `d`, wrapping around the edges.
    #[must_use]
    pub fn neighbor(&self, pos: Position, d: Direction) -> Position {
        d.neighbor(pos, self.edge_length)
    }

    // === Updates ===

    /// Put a tile (replacing any previous one) keeping the occupants.
    #[must_use]
    pub fn place_tile(&self, pos: Position, tile: Tile, orientation: Direction) -> Self {
        let idx = pos.index(self.edge_length);
        let cell = self.cells[idx].with_tile(tile, orientation);

        Self {
            edge_length: self.edge_length,
            cells: self.cells.update(idx, cell),
        }
    }

    /// Move an occupant. Either endpoint may be omitted: no `from` when a
    /// player is first placed or lands, no `to` when a player falls.
    #[must_use]
    pub fn move_occupant(
        &self,
        color: PlayerColor,
        from: Option<Position>,
        to: Option<Position>,
    ) -> Self {
        let mut cells = self.cells.clone();

        if let Some(from) = from {
            let idx = from.index(self.edge_length);
            let cell = cells[idx].without_occupant(color);
            cells.set(idx, cell);
        }

        if let Some(to) = to {
            let idx = to.index(self.edge_length);
            let cell = cells[idx].with_occupant(color);
            cells.set(idx, cell);
        }

        Self {
            edge_length: self.edge_length,
            cells,
        }
    }

    /// Clear tile and orientation of the given cells.
    ///
    /// Occupied cells are never dropped.
    #[must_use]
    pub fn drop_tiles(&self, positions: impl IntoIterator<Item = Position>) -> Self {
        let mut cells = self.cells.clone();

        for pos in positions {
            let idx = pos.index(self.edge_length);
            if cells[idx].is_occupied() {
                continue;
            }
            let cell = cells[idx].without_tile();
            cells.set(idx, cell);
        }

        Self {
            edge_length: self.edge_length,
            cells,
        }
    }

    // === Connectivity ===

    /// Effective exits of an explored cell.
    pub fn open_directions(&self, pos: Position) -> Result<Vec<Direction>, InternalError> {
        let cell = self.at(pos);

        if !cell.is_explored() {
            return Err(InternalError::MissingTile(pos.wrapped(self.edge_length)));
        }

        Ok(cell.open_directions().collect())
    }

    /// One-sided: true iff the cell at `from` opens towards `d`.
    #[must_use]
    pub fn is_connected(&self, from: Position, d: Direction) -> bool {
        self.at(from).opens_towards(d)
    }

    /// Cells one step away through every exit of `pos`. Empty for an
    /// unexplored cell.
    #[must_use]
    pub fn neighbors_visible_from(&self, pos: Position) -> Vec<Position> {
        self.at(pos)
            .open_directions()
            .map(|d| self.neighbor(pos, d))
            .collect()
    }

    /// Check if any cell visible from `pos` is still unexplored.
    #[must_use]
    pub fn has_unexplored_neighbors(&self, pos: Position) -> bool {
        self.neighbors_visible_from(pos)
            .into_iter()
            .any(|p| !self.at(p).is_explored())
    }

    /// Cell holding a given occupant, if any.
    #[must_use]
    pub fn find_occupant(&self, color: PlayerColor) -> Option<Position> {
        self.cells()
            .find(|(_, c)| c.occupants.contains(&color))
            .map(|(p, _)| p)
    }

    /// Number of explored cells.
    #[must_use]
    pub fn explored_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_explored()).count()
    }
}
