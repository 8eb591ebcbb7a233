//! Read model for presentation layers.
//!
//! ## PublicView
//!
//! Everything a table shows, flattened into plain serializable records:
//! - Explored cells (tile, orientation, occupants)
//! - Players in turn order
//! - Phase stack (bottom first), whose turn it is, and who may act
//! - Tiles left in the holder
//! - Pending decisions in answer order
//!
//! The view is a snapshot: it borrows nothing from the [`Game`] it was
//! taken from.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Game, Player, PlayerColor, Position, Tile};
use crate::stack::{Decision, Phase};

/// One explored cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub pos: Position,
    pub tile: Tile,
    pub orientation: Direction,
    pub occupants: Vec<PlayerColor>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicView {
    pub edge_length: usize,
    pub cells: Vec<CellView>,
    pub players: Vec<Player>,
    pub phases: Vec<Phase>,
    pub turn: usize,
    /// Player expected to move next: the owner of the head decision, or
    /// the current player.
    pub acting: Option<PlayerColor>,
    pub tiles_remaining: usize,
    pub decisions: Vec<Decision>,
}

impl PublicView {
    #[must_use]
    pub fn of(game: &Game) -> Self {
        let cells = game
            .board()
            .cells()
            .filter_map(|(pos, cell)| {
                cell.tile.map(|tile| CellView {
                    pos,
                    tile,
                    orientation: cell.orientation,
                    occupants: cell.occupants.to_vec(),
                })
            })
            .collect();

        let acting = if game.is_over() {
            None
        } else {
            match game.decisions().head() {
                Some(head) => Some(head.player),
                None => game.current_player().ok().map(|p| p.color),
            }
        };

        Self {
            edge_length: game.edge_length(),
            cells,
            players: game.players().iter().cloned().collect(),
            phases: game.phases().iter().collect(),
            turn: game.turn(),
            acting,
            tiles_remaining: game.tile_holder().remaining(),
            decisions: game.decisions().iter().copied().collect(),
        }
    }

    /// The phase on top of the stack.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.phases.last().copied()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
