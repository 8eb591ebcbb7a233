//! What a monster does to the players it hits.

use super::propagation::MonsterHits;
use crate::core::{Game, InternalError, MoveKind, Tile};
use crate::rules::constants::MONSTER_DRAW_PENALTY;

/// Apply every hit, players in turn order, monsters in wake order.
///
/// Monster tiles are read from `game` as given: a light going out halfway
/// through may drop a monster cell that still has to strike.
pub fn activate_monsters(game: &Game, hits: &MonsterHits) -> Result<Game, InternalError> {
    if hits.is_empty() {
        return Ok(game.clone());
    }

    let board = game.board();
    let mut next = game.clone();

    for (idx, player) in game.players().iter().enumerate() {
        for &monster in hits.for_player(player.color) {
            let tile = board
                .at(monster)
                .tile
                .ok_or(InternalError::MissingTile(monster))?;

            next = monster_attack(&next, tile, idx)?;
        }
    }

    Ok(next)
}

/// One monster striking one player.
pub fn monster_attack(game: &Game, monster: Tile, idx: usize) -> Result<Game, InternalError> {
    let player = game.player(idx)?;

    match monster {
        Tile::WaxEater if player.has_spendable_nerve() => {
            Ok(game.enqueue_decision(player.color, MoveKind::Block))
        }
        Tile::WaxEater => {
            tracing::debug!(player = %player.color, "wax eater strikes");
            game.draw_tiles(MONSTER_DRAW_PENALTY).light_out(idx)
        }
        other => Err(InternalError::UnknownMonster(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, PlayerColor, Position};
    use crate::monsters::trigger_monsters;
    use crate::setup::GameBuilder;

    fn game() -> Game {
        GameBuilder::new()
            .player(PlayerColor::Red)
            .player(PlayerColor::Blue)
            .deck(vec![Tile::FourWayPassage; 10])
            .build()
            .unwrap()
            .place_tile(Position::new(0, 0), Tile::FourWayPassage, Direction::North)
            .place_tile(Position::new(1, 0), Tile::WaxEater, Direction::North)
            .place_tile(Position::new(2, 0), Tile::FourWayPassage, Direction::North)
            .move_player(0, Position::new(0, 0))
            .unwrap()
            .move_player(1, Position::new(2, 0))
            .unwrap()
    }

    #[test]
    fn test_nerve_holder_gets_block_decision() {
        let game = game();
        let hits = trigger_monsters(game.board(), Position::new(0, 0), &[Direction::East]);
        let next = activate_monsters(&game, &hits).unwrap();

        // Red stands on the trigger cell, where rays stop.
        let owed: Vec<_> = next.decisions().iter().map(|d| (d.player, d.action)).collect();
        assert_eq!(owed, vec![(PlayerColor::Blue, MoveKind::Block)]);
        assert_eq!(next.tile_holder().draw_index(), 0);
    }

    #[test]
    fn test_no_nerve_draws_and_darkens() {
        let game = game().change_nerves(1, -1).unwrap();
        let next = monster_attack(&game, Tile::WaxEater, 1).unwrap();

        assert!(next.decisions().is_empty());
        assert_eq!(next.tile_holder().draw_index(), 3);
        assert!(!next.player(1).unwrap().has_light);
    }

    #[test]
    fn test_penalty_is_clamped() {
        let game = game().change_nerves(0, -1).unwrap().draw_tiles(9);
        let next = monster_attack(&game, Tile::WaxEater, 0).unwrap();

        assert!(next.is_final_flickers());
    }

    #[test]
    fn test_non_monster_is_internal_error() {
        let err = monster_attack(&game(), Tile::Key, 0).unwrap_err();
        assert_eq!(err, InternalError::UnknownMonster(Tile::Key));
    }
}
