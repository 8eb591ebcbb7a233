//! Start placement, and orienting the tile a player stands on.

use crate::core::{Direction, Game, IllegalMove, InternalError, Position, RuleError, Tile};
use crate::stack::Phase;

use super::discovery::discovery_pending;
use super::engine::{Outcome, PhaseHandler};
use super::require_in_bounds;

/// Each player in turn puts their start tile on any empty cell.
pub struct PlaceStartHandler;

impl PhaseHandler for PlaceStartHandler {
    fn phase(&self) -> Phase {
        Phase::PlaceStart
    }

    fn place_tile(&self, game: &Game, actor: usize, pos: Position) -> Result<Outcome, RuleError> {
        let pos = require_in_bounds(game, pos)?;

        if game.board().at(pos).is_explored() {
            return Err(IllegalMove::TileNotEmpty(pos).into());
        }

        let placed = game
            .place_tile(pos, Tile::Start, Direction::North)
            .move_player(actor, pos)?;

        Ok(Outcome::Next(placed.push_phase(Phase::RotatePlaced)))
    }

    fn on_subphase_complete(&self, game: &Game, _completed: Phase) -> Result<Outcome, RuleError> {
        let next = game.turn() + 1;

        if next >= game.player_count() {
            return Ok(Outcome::Next(
                game.set_turn(0).replace_phase(Phase::MovePlayer),
            ));
        }

        Ok(Outcome::Next(game.set_turn(next).replace_phase(Phase::PlaceStart)))
    }
}

/// Orient the tile under the acting player: their start tile, or the tile
/// they just landed on.
pub struct RotatePlacedHandler;

impl PhaseHandler for RotatePlacedHandler {
    fn phase(&self) -> Phase {
        Phase::RotatePlaced
    }

    fn rotate_tile(
        &self,
        game: &Game,
        actor: usize,
        direction: Direction,
    ) -> Result<Outcome, RuleError> {
        let pos = game.position_of(actor)?;
        let tile = game
            .board()
            .at(pos)
            .tile
            .ok_or(InternalError::PlayerOnEmptyCell(pos))?;

        let rotated = game.place_tile(pos, tile, direction);

        if discovery_pending(&rotated, actor)? {
            return Ok(Outcome::Next(rotated.replace_phase(Phase::DiscoverTiles)));
        }

        Ok(Outcome::SubphaseComplete(rotated))
    }
}
