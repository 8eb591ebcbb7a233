//! Player identification and per-player status.
//!
//! ## PlayerColor
//!
//! Players are identified by their (unique) color, which is also how moves
//! name them on the wire.
//!
//! ## Player
//!
//! Status record for one player. Only four combinations of
//! `(pos, falling, fall_axis)` are reachable:
//!
//! | pos | falling | fall_axis | meaning |
//! |---|---|---|---|
//! | none | no | none | start tile not placed yet |
//! | some | no | none | on the board |
//! | some | yes | none | just fell, must pick an axis |
//! | some | yes | some | awaiting landing |

use serde::{Deserialize, Serialize};

use super::direction::FallAxis;
use super::position::Position;
use crate::rules::constants::STARTING_NERVES;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 5] = [
        PlayerColor::Red,
        PlayerColor::Yellow,
        PlayerColor::Green,
        PlayerColor::Blue,
        PlayerColor::Purple,
    ];
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlayerColor::Red => "red",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Green => "green",
            PlayerColor::Blue => "blue",
            PlayerColor::Purple => "purple",
        };
        f.write_str(s)
    }
}

/// Status of a single player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub color: PlayerColor,
    pub has_key: bool,
    /// Spendable nerves, at most [`crate::rules::constants::MAX_NERVES`].
    pub nerves: u8,
    pub has_light: bool,
    pub falling: bool,
    pub pos: Option<Position>,
    pub fall_axis: Option<FallAxis>,
}

impl Player {
    /// A player as dealt at setup: unplaced, lit, one nerve, no key.
    #[must_use]
    pub fn new(color: PlayerColor) -> Self {
        Self {
            color,
            has_key: false,
            nerves: STARTING_NERVES,
            has_light: true,
            falling: false,
            pos: None,
            fall_axis: None,
        }
    }

    #[must_use]
    pub fn is_unplaced(&self) -> bool {
        self.pos.is_none() && !self.falling
    }

    /// Standing on a cell (lights it and can be hit by monsters).
    #[must_use]
    pub fn is_on_board(&self) -> bool {
        self.pos.is_some() && !self.falling
    }

    #[must_use]
    pub fn awaiting_axis(&self) -> bool {
        self.falling && self.pos.is_some() && self.fall_axis.is_none()
    }

    #[must_use]
    pub fn awaiting_landing(&self) -> bool {
        self.falling && self.pos.is_some() && self.fall_axis.is_some()
    }

    /// Check if the player can spend a nerve.
    #[must_use]
    pub fn has_spendable_nerve(&self) -> bool {
        self.nerves > 0
    }

    /// Position of a player on the board, for callers that are only
    /// reachable once the player has been placed.
    #[must_use]
    pub fn board_position(&self) -> Option<Position> {
        if self.is_on_board() {
            self.pos
        } else {
            None
        }
    }
}
