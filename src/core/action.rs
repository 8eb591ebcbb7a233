//! Move representation and wire encoding.
//!
//! A move is an envelope naming the acting player plus a tagged parameter
//! record. On the wire the record carries a literal `move` tag followed by
//! its fields in declaration order:
//!
//! ```
//! use tng_engine::core::{Move, MoveParam, PlayerColor, Position};
//!
//! let json = r#"{"player":"blue","param":{"move":"place_tile","pos":[1,4]}}"#;
//! let mv = Move::from_json(json).unwrap();
//!
//! assert_eq!(mv, Move::new(PlayerColor::Blue, MoveParam::PlaceTile { pos: Position::new(1, 4) }));
//! assert_eq!(mv.to_json().unwrap(), json);
//! ```

use serde::{Deserialize, Serialize};

use super::direction::{Direction, FallAxis};
use super::error::WireError;
use super::player::PlayerColor;
use super::position::Position;

/// Tag of a move record, without its fields.
///
/// Also used by decisions to name the move that resolves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    PlaceTile,
    RotateTile,
    Stay,
    Crawl,
    Fall,
    Land,
    DiscardTile,
    PassKey,
    Block,
    MoveAgain,
}

impl MoveKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MoveKind::PlaceTile => "place_tile",
            MoveKind::RotateTile => "rotate_tile",
            MoveKind::Stay => "stay",
            MoveKind::Crawl => "crawl",
            MoveKind::Fall => "fall",
            MoveKind::Land => "land",
            MoveKind::DiscardTile => "discard_tile",
            MoveKind::PassKey => "pass_key",
            MoveKind::Block => "block",
            MoveKind::MoveAgain => "move_again",
        }
    }
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a move, one variant per move kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "move", rename_all = "snake_case")]
pub enum MoveParam {
    PlaceTile {
        pos: Position,
    },
    RotateTile {
        direction: Direction,
    },
    Stay,
    Crawl {
        direction: Direction,
    },
    Fall {
        axis: FallAxis,
    },
    Land {
        /// Index along the chosen fall axis.
        place: i32,
    },
    DiscardTile {
        /// Cell to turn into a pit; absent means spending a nerve instead.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pos: Option<Position>,
    },
    PassKey {
        target: PlayerColor,
    },
    Block {
        block: bool,
    },
    MoveAgain,
}

impl MoveParam {
    #[must_use]
    pub fn kind(&self) -> MoveKind {
        match self {
            MoveParam::PlaceTile { .. } => MoveKind::PlaceTile,
            MoveParam::RotateTile { .. } => MoveKind::RotateTile,
            MoveParam::Stay => MoveKind::Stay,
            MoveParam::Crawl { .. } => MoveKind::Crawl,
            MoveParam::Fall { .. } => MoveKind::Fall,
            MoveParam::Land { .. } => MoveKind::Land,
            MoveParam::DiscardTile { .. } => MoveKind::DiscardTile,
            MoveParam::PassKey { .. } => MoveKind::PassKey,
            MoveParam::Block { .. } => MoveKind::Block,
            MoveParam::MoveAgain => MoveKind::MoveAgain,
        }
    }
}

/// A proposed move: who acts, and what they do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player: PlayerColor,
    pub param: MoveParam,
}

impl Move {
    #[must_use]
    pub fn new(player: PlayerColor, param: MoveParam) -> Self {
        Self { player, param }
    }

    #[must_use]
    pub fn kind(&self) -> MoveKind {
        self.param.kind()
    }

    /// Decode a move envelope from JSON.
    pub fn from_json(json: &str) -> Result<Self, WireError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this move as a JSON envelope.
    pub fn to_json(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.player, self.kind())?;
        match &self.param {
            MoveParam::PlaceTile { pos } => write!(f, " at {pos}"),
            MoveParam::RotateTile { direction } | MoveParam::Crawl { direction } => {
                write!(f, " {direction}")
            }
            MoveParam::Fall { axis } => write!(f, " {axis:?}"),
            MoveParam::Land { place } => write!(f, " on {place}"),
            MoveParam::DiscardTile { pos: Some(pos) } => write!(f, " {pos}"),
            MoveParam::PassKey { target } => write!(f, " to {target}"),
            MoveParam::Block { block } => write!(f, " {block}"),
            MoveParam::DiscardTile { pos: None } | MoveParam::Stay | MoveParam::MoveAgain => {
                Ok(())
            }
        }
    }
}
