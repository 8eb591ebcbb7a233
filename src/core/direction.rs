//! Compass directions and fall axes.
//!
//! ## Rotation
//!
//! Directions form a cyclic group of order 4 (`N=0, E=1, S=2, W=3`).
//! Rotating `d` by `by` adds the two indices modulo 4, so rotating by
//! `North` is the identity and every tile orientation is itself a
//! `Direction`.
//!
//! ```
//! use tng_engine::core::Direction;
//!
//! assert_eq!(Direction::West.rotate(Direction::South), Direction::East);
//! assert_eq!(Direction::North.opposite(), Direction::South);
//! ```

use serde::{Deserialize, Serialize};

use super::position::Position;

/// One of the four compass directions.
///
/// North points towards decreasing `y`, east towards increasing `x`.
/// `North` is also the identity rotation, hence the default orientation.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Direction {
    #[default]
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl Direction {
    /// All directions in rotation order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position of this direction in the rotation group.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Direction for a group index, taken modulo 4.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }

    /// Compose two rotations.
    #[must_use]
    pub const fn rotate(self, by: Direction) -> Self {
        Self::from_index(self.index() + by.index())
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        self.rotate(Direction::South)
    }

    /// Coordinate offset of one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// The cell one step away on a toroidal board of the given edge length.
    #[must_use]
    pub fn neighbor(self, pos: Position, edge_length: usize) -> Position {
        let (dx, dy) = self.delta();
        Position::new(pos.x + dx, pos.y + dy).wrapped(edge_length)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
        };
        f.write_str(s)
    }
}

/// Line a falling player commits to before landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallAxis {
    /// Land somewhere on the player's row (`y` fixed).
    Row,
    /// Land somewhere on the player's column (`x` fixed).
    Column,
}

impl FallAxis {
    /// Cell at `place` along this axis through `origin`.
    #[must_use]
    pub fn cell_at(self, origin: Position, place: i32) -> Position {
        match self {
            FallAxis::Row => Position::new(place, origin.y),
            FallAxis::Column => Position::new(origin.x, place),
        }
    }

    /// Every cell along this axis through `origin`.
    pub fn cells(self, origin: Position, edge_length: usize) -> impl Iterator<Item = Position> {
        (0..edge_length as i32).map(move |place| self.cell_at(origin, place))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_identity() {
        for d in Direction::ALL {
            assert_eq!(d.rotate(Direction::North), d);
        }
    }

    #[test]
    fn test_rotate_composition() {
        assert_eq!(Direction::West.rotate(Direction::South), Direction::East);
        assert_eq!(Direction::East.rotate(Direction::East), Direction::South);
        assert_eq!(Direction::North.rotate(Direction::West), Direction::West);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::South.opposite(), Direction::North);
        assert_eq!(Direction::West.opposite(), Direction::East);
    }

    #[test]
    fn test_neighbor_wraps() {
        assert_eq!(Direction::North.neighbor(Position::new(0, 0), 6), Position::new(0, 5));
        assert_eq!(Direction::East.neighbor(Position::new(3, 4), 6), Position::new(4, 4));
        assert_eq!(Direction::East.neighbor(Position::new(5, 2), 6), Position::new(0, 2));
        assert_eq!(Direction::West.neighbor(Position::new(0, 6), 7), Position::new(6, 6));
        assert_eq!(Direction::South.neighbor(Position::new(6, 6), 7), Position::new(6, 0));
    }

    #[test]
    fn test_fall_axis_cells() {
        let origin = Position::new(2, 3);

        let row: Vec<_> = FallAxis::Row.cells(origin, 6).collect();
        assert_eq!(row.len(), 6);
        assert!(row.iter().all(|p| p.y == 3));

        let column: Vec<_> = FallAxis::Column.cells(origin, 6).collect();
        assert!(column.iter().all(|p| p.x == 2));
        assert_eq!(column[4], Position::new(2, 4));
    }

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&Direction::East).unwrap(), "\"E\"");
        let d: Direction = serde_json::from_str("\"W\"").unwrap();
        assert_eq!(d, Direction::West);
        assert_eq!(serde_json::to_string(&FallAxis::Column).unwrap(), "\"column\"");
    }
}
