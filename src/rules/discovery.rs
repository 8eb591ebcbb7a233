//! Revealing the cells around the acting player.
//!
//! Discovery loops while the acting player, holding a light, can see an
//! unexplored cell and the deck still has tiles. Each step draws one tile
//! into a chosen visible cell; passages with more than one sensible
//! orientation are then rotated by the player.

use crate::core::{Direction, Game, IllegalMove, InternalError, Position, RuleError};
use crate::stack::Phase;

use super::engine::{Outcome, PhaseHandler};
use super::require_in_bounds;

/// Check if the acting player still has something to reveal.
pub(crate) fn discovery_pending(game: &Game, actor: usize) -> Result<bool, InternalError> {
    let player = game.player(actor)?;

    let Some(pos) = player.board_position() else {
        return Ok(false);
    };

    Ok(player.has_light
        && !game.is_final_flickers()
        && game.board().has_unexplored_neighbors(pos))
}

/// Keep discovering, or hand control back to the parent phase.
pub(crate) fn next_discovery(game: Game, actor: usize) -> Result<Outcome, RuleError> {
    if discovery_pending(&game, actor)? {
        return Ok(Outcome::Next(game.replace_phase(Phase::DiscoverTiles)));
    }

    Ok(Outcome::SubphaseComplete(game))
}

/// Direction leading from `from` to its visible neighbor `to`.
fn direction_towards(game: &Game, from: Position, to: Position) -> Option<Direction> {
    game.board()
        .at(from)
        .open_directions()
        .find(|&d| game.board().neighbor(from, d) == to)
}

pub struct DiscoverTilesHandler;

impl PhaseHandler for DiscoverTilesHandler {
    fn phase(&self) -> Phase {
        Phase::DiscoverTiles
    }

    fn place_tile(&self, game: &Game, actor: usize, pos: Position) -> Result<Outcome, RuleError> {
        let origin = game.position_of(actor)?;

        if game.is_final_flickers() {
            return Err(IllegalMove::DeckExhausted.into());
        }

        let pos = require_in_bounds(game, pos)?;
        let Some(outward) = direction_towards(game, origin, pos) else {
            return Err(IllegalMove::NotConnected(pos).into());
        };

        if game.board().at(pos).is_explored() {
            return Err(IllegalMove::TileNotEmpty(pos).into());
        }

        let (drawn, tile) = game.draw_tile()?;
        let orientation = tile.orientation_opening(outward.opposite()).unwrap_or_default();
        let placed = drawn.place_tile(pos, tile, orientation);

        tracing::trace!(%tile, %pos, "tile discovered");

        if tile.is_ambiguous() {
            return Ok(Outcome::Next(placed.replace_phase(Phase::RotateDiscoveredTile)));
        }

        next_discovery(placed, actor)
    }
}

/// Orient the tile just discovered. It must still open towards the player.
pub struct RotateDiscoveredTileHandler;

impl PhaseHandler for RotateDiscoveredTileHandler {
    fn phase(&self) -> Phase {
        Phase::RotateDiscoveredTile
    }

    fn rotate_tile(
        &self,
        game: &Game,
        actor: usize,
        direction: Direction,
    ) -> Result<Outcome, RuleError> {
        let origin = game.position_of(actor)?;
        let last = game.last_placed_tile_pos().ok_or(InternalError::NoPlacedTile)?;
        let tile = game
            .board()
            .at(last)
            .tile
            .ok_or(InternalError::MissingTile(last))?;

        let rotated = game.place_tile(last, tile, direction);

        if !rotated.board().neighbors_visible_from(last).contains(&origin) {
            return Err(IllegalMove::NotConnected(last).into());
        }

        next_discovery(rotated, actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerColor, Tile};
    use crate::setup::GameBuilder;

    /// Red on a start tile at (2,2) oriented north (exits south and west).
    fn game(deck: Vec<Tile>) -> Game {
        GameBuilder::new()
            .player(PlayerColor::Red)
            .deck(deck)
            .build()
            .unwrap()
            .place_tile(Position::new(2, 2), Tile::Start, Direction::North)
            .move_player(0, Position::new(2, 2))
            .unwrap()
            .replace_phase(Phase::MovePlayer)
            .push_phase(Phase::DiscoverTiles)
    }

    fn next(outcome: Outcome) -> Game {
        match outcome {
            Outcome::Next(g) => g,
            Outcome::SubphaseComplete(_) => panic!("unexpected completion"),
        }
    }

    #[test]
    fn test_discovered_tile_faces_player() {
        let game = game(vec![Tile::Key, Tile::Gate]);
        let placed = next(DiscoverTilesHandler.place_tile(&game, 0, Position::new(2, 3)).unwrap());

        assert_eq!(placed.board().at(Position::new(2, 3)).tile, Some(Tile::Key));
        assert_eq!(placed.tile_holder().draw_index(), 1);
        // West exit still unexplored.
        assert_eq!(placed.phase(), Phase::DiscoverTiles);
    }

    #[test]
    fn test_last_discovery_completes() {
        let game = game(vec![Tile::Key, Tile::Gate]);
        let first = next(DiscoverTilesHandler.place_tile(&game, 0, Position::new(2, 3)).unwrap());
        let outcome = DiscoverTilesHandler
            .place_tile(&first, 0, Position::new(1, 2))
            .unwrap();

        assert!(matches!(outcome, Outcome::SubphaseComplete(_)));
    }

    #[test]
    fn test_must_target_visible_empty_cell() {
        let game = game(vec![Tile::Key]);

        assert_eq!(
            DiscoverTilesHandler.place_tile(&game, 0, Position::new(3, 2)).unwrap_err(),
            RuleError::Illegal(IllegalMove::NotConnected(Position::new(3, 2)))
        );
        assert_eq!(
            DiscoverTilesHandler.place_tile(&game, 0, Position::new(2, 6)).unwrap_err(),
            RuleError::Illegal(IllegalMove::OutOfBounds(Position::new(2, 6)))
        );

        let filled = game.place_tile(Position::new(2, 3), Tile::Gate, Direction::North);
        assert_eq!(
            DiscoverTilesHandler.place_tile(&filled, 0, Position::new(2, 3)).unwrap_err(),
            RuleError::Illegal(IllegalMove::TileNotEmpty(Position::new(2, 3)))
        );
    }

    #[test]
    fn test_ambiguous_tile_needs_rotation() {
        let game = game(vec![Tile::StraightPassage, Tile::Key]);
        let placed = next(DiscoverTilesHandler.place_tile(&game, 0, Position::new(1, 2)).unwrap());

        assert_eq!(placed.phase(), Phase::RotateDiscoveredTile);
        // Opens back east towards the player.
        assert_eq!(placed.board().at(Position::new(1, 2)).orientation, Direction::East);

        let err = RotateDiscoveredTileHandler
            .rotate_tile(&placed, 0, Direction::North)
            .unwrap_err();
        assert_eq!(err, RuleError::Illegal(IllegalMove::NotConnected(Position::new(1, 2))));

        let rotated = next(
            RotateDiscoveredTileHandler
                .rotate_tile(&placed, 0, Direction::West)
                .unwrap(),
        );
        assert_eq!(rotated.board().at(Position::new(1, 2)).orientation, Direction::West);
        assert_eq!(rotated.phase(), Phase::DiscoverTiles);
    }

    #[test]
    fn test_exhausted_deck_stops_discovery() {
        let game = game(vec![Tile::Key]).draw_tiles(1);

        assert!(!discovery_pending(&game, 0).unwrap());
        assert_eq!(
            DiscoverTilesHandler.place_tile(&game, 0, Position::new(2, 3)).unwrap_err(),
            RuleError::Illegal(IllegalMove::DeckExhausted)
        );
    }
}
