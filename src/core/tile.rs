//! Tile kinds and their static metadata.
//!
//! Tile properties never vary per instance, so they are pure functions of
//! the kind rather than stored attributes. The base open directions are
//! given for orientation `North`; a placed tile's effective exits are these
//! rotated by the cell's stored orientation.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Every kind of tile in the deck (plus the `Start` and `Pit` kinds that
/// only ever appear on the board).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Start,
    Key,
    Gate,
    WaxEater,
    StraightPassage,
    TPassage,
    FourWayPassage,
    Pit,
}

const ALL_EXITS: &[Direction] = &[
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Tile {
    /// Open directions at orientation `North`.
    #[must_use]
    pub const fn base_open_directions(self) -> &'static [Direction] {
        match self {
            Tile::Start => &[Direction::South, Direction::West],
            Tile::StraightPassage => &[Direction::North, Direction::South],
            Tile::TPassage => &[Direction::East, Direction::South, Direction::West],
            Tile::Key | Tile::Gate | Tile::WaxEater | Tile::FourWayPassage => ALL_EXITS,
            Tile::Pit => &[],
        }
    }

    /// Open directions once rotated by `orientation`.
    pub fn open_directions(self, orientation: Direction) -> impl Iterator<Item = Direction> {
        self.base_open_directions()
            .iter()
            .map(move |d| d.rotate(orientation))
    }

    /// Tiles that turn into a pit once their occupant leaves.
    #[must_use]
    pub const fn is_crumbling(self) -> bool {
        matches!(self, Tile::Start)
    }

    #[must_use]
    pub const fn is_monster(self) -> bool {
        matches!(self, Tile::WaxEater)
    }

    /// Passages whose orientation the placing player must choose.
    #[must_use]
    pub const fn is_ambiguous(self) -> bool {
        matches!(self, Tile::StraightPassage | Tile::TPassage)
    }

    /// First orientation (in `N, E, S, W` order) that opens towards `exit`.
    #[must_use]
    pub fn orientation_opening(self, exit: Direction) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&o| self.open_directions(o).any(|d| d == exit))
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tile::Start => "start",
            Tile::Key => "key",
            Tile::Gate => "gate",
            Tile::WaxEater => "wax_eater",
            Tile::StraightPassage => "straight_passage",
            Tile::TPassage => "t_passage",
            Tile::FourWayPassage => "four_way_passage",
            Tile::Pit => "pit",
        };
        f.write_str(s)
    }
}
