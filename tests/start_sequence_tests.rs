//! Opening sequence tests.
//!
//! Every player places and orients a start tile, then reveals what their
//! light reaches, before the first movement turn.

use tng_engine::{
    apply_move, Direction, Game, GameBuilder, IllegalMove, Move, MoveParam, Phase, PlayerColor,
    Position, RuleError, Tile,
};

fn new_game() -> Game {
    GameBuilder::new()
        .player(PlayerColor::Red)
        .player(PlayerColor::Blue)
        .deck(vec![
            Tile::FourWayPassage,
            Tile::Key,
            Tile::Gate,
            Tile::TPassage,
            Tile::Key,
            Tile::Key,
        ])
        .build()
        .unwrap()
}

fn play(game: &Game, player: PlayerColor, param: MoveParam) -> Game {
    apply_move(game, &Move::new(player, param)).unwrap()
}

fn place(pos: (i32, i32)) -> MoveParam {
    MoveParam::PlaceTile { pos: pos.into() }
}

fn rotate(direction: Direction) -> MoveParam {
    MoveParam::RotateTile { direction }
}

/// Test the full opening for two players.
#[test]
fn test_two_player_opening() {
    let game = new_game();
    assert_eq!(game.phase(), Phase::PlaceStart);

    // Red: start at (2,2) facing north opens south and west.
    let game = play(&game, PlayerColor::Red, place((2, 2)));
    assert_eq!(game.phase(), Phase::RotatePlaced);

    let game = play(&game, PlayerColor::Red, rotate(Direction::North));
    assert_eq!(game.phase(), Phase::DiscoverTiles);
    assert_eq!(game.phases().len(), 2);

    let game = play(&game, PlayerColor::Red, place((2, 3)));
    let game = play(&game, PlayerColor::Red, place((1, 2)));

    assert_eq!(game.phase(), Phase::PlaceStart);
    assert_eq!(game.turn(), 1);

    // Blue cannot start on an explored cell.
    let err = apply_move(&game, &Move::new(PlayerColor::Blue, place((2, 2)))).unwrap_err();
    assert_eq!(err, RuleError::Illegal(IllegalMove::TileNotEmpty(Position::new(2, 2))));

    // Blue: start at (4,4) facing east opens west and north.
    let game = play(&game, PlayerColor::Blue, place((4, 4)));
    let game = play(&game, PlayerColor::Blue, rotate(Direction::East));
    let game = play(&game, PlayerColor::Blue, place((3, 4)));
    assert_eq!(game.board().at(Position::new(3, 4)).tile, Some(Tile::Gate));

    // A t-passage needs orienting, and must keep facing blue.
    let game = play(&game, PlayerColor::Blue, place((4, 3)));
    assert_eq!(game.phase(), Phase::RotateDiscoveredTile);

    let err = apply_move(&game, &Move::new(PlayerColor::Blue, rotate(Direction::South))).unwrap_err();
    assert_eq!(err, RuleError::Illegal(IllegalMove::NotConnected(Position::new(4, 3))));

    let game = play(&game, PlayerColor::Blue, rotate(Direction::West));

    assert_eq!(game.phase(), Phase::MovePlayer);
    assert_eq!(game.phases().len(), 1);
    assert_eq!(game.turn(), 0);
    assert_eq!(game.tile_holder().draw_index(), 4);
    assert_eq!(game.position_of(0).unwrap(), Position::new(2, 2));
    assert_eq!(game.position_of(1).unwrap(), Position::new(4, 4));
}

/// Test that only the current player may place a start tile.
#[test]
fn test_placement_follows_turn_order() {
    let game = new_game();
    let err = apply_move(&game, &Move::new(PlayerColor::Blue, place((0, 0)))).unwrap_err();

    assert_eq!(
        err,
        RuleError::Illegal(IllegalMove::NotPlayerTurn { player: PlayerColor::Blue })
    );
}

/// Test that a start tile with nothing left to reveal ends the placement.
#[test]
fn test_enclosed_start_skips_discovery() {
    let game = new_game()
        .place_tile(Position::new(2, 3), Tile::Key, Direction::North)
        .place_tile(Position::new(1, 2), Tile::Key, Direction::North);

    let game = play(&game, PlayerColor::Red, place((2, 2)));
    let game = play(&game, PlayerColor::Red, rotate(Direction::North));

    assert_eq!(game.phase(), Phase::PlaceStart);
    assert_eq!(game.turn(), 1);
    assert_eq!(game.tile_holder().draw_index(), 0);
}

/// Test that placing off the board is rejected rather than wrapped.
#[test]
fn test_start_out_of_bounds() {
    let game = new_game();
    let err = apply_move(&game, &Move::new(PlayerColor::Red, place((-1, 3)))).unwrap_err();

    assert_eq!(err, RuleError::Illegal(IllegalMove::OutOfBounds(Position::new(-1, 3))));
    assert!(err.is_illegal());
}

/// Test the dealt state for every supported player count.
#[test]
fn test_setup_for_each_player_count() {
    for count in 1..=5 {
        let colors = &PlayerColor::ALL[..count];
        let game = tng_engine::new_game(colors, 21).unwrap();
        let edge = if count == 5 { 7 } else { 6 };

        assert_eq!(game.edge_length(), edge, "{count} players");
        assert_eq!(game.board().len(), edge * edge);
        assert!(game
            .board()
            .cells()
            .all(|(_, cell)| cell.tile.is_none() && !cell.is_occupied()));

        let expected_deck = if count == 5 { 75 } else { 76 };
        assert_eq!(game.tile_holder().len(), expected_deck);
        assert_eq!(game.tile_holder().draw_index(), 0);

        assert_eq!(game.players().len(), count);
        for (player, &color) in game.players().iter().zip(colors) {
            assert_eq!(player.color, color);
            assert!(!player.has_key);
            assert!(player.has_light);
            assert_eq!(player.nerves, 1);
            assert!(player.is_unplaced());
        }

        assert_eq!(game.phase(), Phase::PlaceStart);
        assert_eq!(game.turn(), 0);
        assert!(game.decisions().is_empty());
    }
}
