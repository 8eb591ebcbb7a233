//! Board coordinates.
//!
//! Positions are signed so that out-of-bounds requests coming off the wire
//! can be represented and rejected. Everything the board stores is wrapped
//! into `0..edge_length` first.

use serde::{Deserialize, Serialize};

/// A cell coordinate. Serialized as `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if this position lies on a board of the given edge length
    /// without wrapping.
    #[must_use]
    pub fn in_bounds(self, edge_length: usize) -> bool {
        let edge = edge_length as i32;
        (0..edge).contains(&self.x) && (0..edge).contains(&self.y)
    }

    /// Reduce both coordinates modulo the edge length.
    #[must_use]
    pub fn wrapped(self, edge_length: usize) -> Self {
        let edge = edge_length as i32;
        Self {
            x: self.x.rem_euclid(edge),
            y: self.y.rem_euclid(edge),
        }
    }

    /// Row-major index into a board's cell array.
    #[must_use]
    pub fn index(self, edge_length: usize) -> usize {
        let p = self.wrapped(edge_length);
        p.y as usize * edge_length + p.x as usize
    }

    /// Inverse of [`Position::index`].
    #[must_use]
    pub fn from_index(index: usize, edge_length: usize) -> Self {
        Self::new((index % edge_length) as i32, (index / edge_length) as i32)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for (i32, i32) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
