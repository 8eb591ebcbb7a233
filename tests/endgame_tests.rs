//! End of game tests: escaping, final flickers and losing.

use tng_engine::{
    apply_move, Direction, FallAxis, Game, GameBuilder, GameResult, IllegalMove, Move, MoveParam,
    Phase, PlayerColor, Position, RuleError, Rules, RulesEngine, Tile,
};

const RED: PlayerColor = PlayerColor::Red;
const BLUE: PlayerColor = PlayerColor::Blue;

fn game_with_deck(deck: Vec<Tile>) -> Game {
    GameBuilder::new()
        .player(RED)
        .player(BLUE)
        .deck(deck)
        .build()
        .unwrap()
        .replace_phase(Phase::MovePlayer)
}

fn play(game: &Game, player: PlayerColor, param: MoveParam) -> Result<Game, RuleError> {
    apply_move(game, &Move::new(player, param))
}

/// Test that the last player to reach the gate with a key wins the game.
#[test]
fn test_escape_through_gate() {
    let game = game_with_deck(vec![Tile::Key; 4])
        .place_tile(Position::new(1, 1), Tile::Key, Direction::North)
        .place_tile(Position::new(2, 1), Tile::Key, Direction::North)
        .move_player(0, Position::new(1, 1))
        .unwrap()
        .move_player(1, Position::new(2, 1))
        .unwrap()
        .place_tile(Position::new(2, 1), Tile::Gate, Direction::North);

    assert!(game.players().iter().all(|p| p.has_key));
    assert_eq!(Rules.result(&game), None);

    let won = play(&game, RED, MoveParam::Crawl { direction: Direction::East }).unwrap();

    assert_eq!(won.phase(), Phase::GameWon);
    assert_eq!(won.phases().len(), 1);
    assert_eq!(Rules.result(&won), Some(GameResult::Escaped));

    assert_eq!(
        play(&won, BLUE, MoveParam::Stay).unwrap_err(),
        RuleError::Illegal(IllegalMove::GameOver { phase: Phase::GameWon })
    );
}

/// Test handing a key to a player on the same cell.
#[test]
fn test_pass_key_between_players() {
    let game = game_with_deck(vec![Tile::Key; 4])
        .place_tile(Position::new(3, 3), Tile::Gate, Direction::North)
        .move_player(0, Position::new(3, 3))
        .unwrap()
        .move_player(1, Position::new(3, 3))
        .unwrap();

    let keyed = game
        .place_tile(Position::new(3, 3), Tile::Key, Direction::North)
        .pick_up_key(0)
        .unwrap()
        .place_tile(Position::new(3, 3), Tile::Gate, Direction::North);
    let passed = play(&keyed, RED, MoveParam::PassKey { target: BLUE }).unwrap();

    assert_eq!(passed.phase(), Phase::MovePlayer);
    assert!(passed.player(1).unwrap().has_key);
    assert_eq!(
        play(&passed, RED, MoveParam::PassKey { target: BLUE }).unwrap_err(),
        RuleError::Illegal(IllegalMove::NoKey(RED))
    );
}

/// Test the final flickers: the deck runs out and players feed the
/// darkness one tile or one nerve at a time.
#[test]
fn test_final_flickers_round() {
    let game = game_with_deck(vec![Tile::Key])
        .place_tile(Position::new(1, 1), Tile::FourWayPassage, Direction::North)
        .place_tile(Position::new(2, 1), Tile::FourWayPassage, Direction::North)
        .place_tile(Position::new(4, 4), Tile::FourWayPassage, Direction::North)
        .move_player(0, Position::new(1, 1))
        .unwrap()
        .move_player(1, Position::new(4, 4))
        .unwrap();

    // Red rests and draws the last tile.
    let game = play(&game, RED, MoveParam::Stay).unwrap();
    assert!(game.is_final_flickers());
    assert_eq!(game.phase(), Phase::FinalFlickers);
    assert_eq!(game.turn(), 0);
    assert_eq!(game.player(0).unwrap().nerves, 2);

    let game = play(&game, RED, MoveParam::DiscardTile { pos: Some(Position::new(2, 1)) }).unwrap();
    assert_eq!(game.board().at(Position::new(2, 1)).tile, Some(Tile::Pit));
    assert_eq!(game.phase(), Phase::MovePlayer);
    assert_eq!(game.turn(), 1);

    // Blue rests without drawing and spends a nerve instead of a tile.
    let game = play(&game, BLUE, MoveParam::Stay).unwrap();
    assert_eq!(game.phase(), Phase::FinalFlickers);
    assert_eq!(game.player(1).unwrap().nerves, 2);

    let game = play(&game, BLUE, MoveParam::DiscardTile { pos: None }).unwrap();
    assert_eq!(game.player(1).unwrap().nerves, 1);
    assert_eq!(game.turn(), 0);
    assert_eq!(game.phase(), Phase::MovePlayer);
}

/// Test that crumbling into a pit and landing in the dark with no tiles
/// left loses the game.
#[test]
fn test_fall_into_nothing() {
    let game = game_with_deck(vec![Tile::Key])
        .place_tile(Position::new(1, 1), Tile::Start, Direction::North)
        .place_tile(Position::new(4, 4), Tile::FourWayPassage, Direction::North)
        .move_player(0, Position::new(1, 1))
        .unwrap()
        .move_player(1, Position::new(4, 4))
        .unwrap();

    let game = play(&game, RED, MoveParam::Stay).unwrap();
    assert_eq!(game.phase(), Phase::Falling);
    assert!(game.player(0).unwrap().falling);

    assert_eq!(
        play(&game, BLUE, MoveParam::Fall { axis: FallAxis::Row }).unwrap_err(),
        RuleError::Illegal(IllegalMove::NotPlayerTurn { player: BLUE })
    );

    let game = play(&game, RED, MoveParam::Fall { axis: FallAxis::Row }).unwrap();
    assert_eq!(game.phase(), Phase::Landing);
    assert_eq!(game.phases().len(), 1);

    let game = play(&game, RED, MoveParam::Land { place: 3 }).unwrap();
    assert_eq!(game.phase(), Phase::GameLost);
    assert_eq!(Rules.result(&game), Some(GameResult::Lost));
}

/// Test a safe landing on a fresh tile followed by discovery.
#[test]
fn test_fall_and_land() {
    let game = game_with_deck(vec![Tile::Key, Tile::FourWayPassage, Tile::Key, Tile::Key])
        .place_tile(Position::new(1, 1), Tile::Start, Direction::North)
        .place_tile(Position::new(4, 4), Tile::FourWayPassage, Direction::North)
        .move_player(0, Position::new(1, 1))
        .unwrap()
        .move_player(1, Position::new(4, 4))
        .unwrap();

    let game = play(&game, RED, MoveParam::Stay).unwrap();
    let game = play(&game, RED, MoveParam::Fall { axis: FallAxis::Column }).unwrap();
    let game = play(&game, RED, MoveParam::Land { place: 4 }).unwrap();

    let red = game.player(0).unwrap();
    assert_eq!(red.board_position(), Some(Position::new(1, 4)));
    assert!(!red.falling);
    assert_eq!(game.board().at(Position::new(1, 4)).tile, Some(Tile::FourWayPassage));

    // Landed lit with unexplored cells around: discovery before the turn ends.
    assert_eq!(game.phase(), Phase::DiscoverTiles);

    let game = play(&game, RED, MoveParam::PlaceTile { pos: Position::new(1, 5) }).unwrap();
    let game = play(&game, RED, MoveParam::PlaceTile { pos: Position::new(2, 4) }).unwrap();

    // The deck ran out mid-discovery: Red now owes the darkness.
    assert_eq!(game.tile_holder().remaining(), 0);
    assert_eq!(game.phase(), Phase::FinalFlickers);
    assert_eq!(game.phases().len(), 1);
    assert_eq!(game.turn(), 0);
}

/// Test that a lit player who lands on a monster in unexplored territory
/// can still make the crawl they owe, drawing the tile they crawl onto.
#[test]
fn test_forced_crawl_after_landing_on_monster() {
    let game = game_with_deck(vec![
        Tile::Key,
        Tile::WaxEater,
        Tile::FourWayPassage,
        Tile::Key,
        Tile::Key,
        Tile::Key,
    ])
    .place_tile(Position::new(1, 1), Tile::Start, Direction::North)
    .place_tile(Position::new(4, 4), Tile::FourWayPassage, Direction::North)
    .move_player(0, Position::new(1, 1))
    .unwrap()
    .move_player(1, Position::new(4, 4))
    .unwrap();

    let game = play(&game, RED, MoveParam::Stay).unwrap();
    let game = play(&game, RED, MoveParam::Fall { axis: FallAxis::Column }).unwrap();
    let game = play(&game, RED, MoveParam::Land { place: 3 }).unwrap();
    assert_eq!(game.board().at(Position::new(1, 3)).tile, Some(Tile::WaxEater));

    let game = play(&game, RED, MoveParam::Block { block: true }).unwrap();
    let head = game.decisions().head().unwrap();
    assert_eq!((head.player, head.action), (RED, tng_engine::MoveKind::Crawl));
    assert!(game.player(0).unwrap().has_light);
    assert!(!game.board().at(Position::new(1, 2)).is_explored());

    let game = play(&game, RED, MoveParam::Crawl { direction: Direction::North }).unwrap();
    assert_eq!(game.position_of(0).unwrap(), Position::new(1, 2));
    assert_eq!(game.board().at(Position::new(1, 2)).tile, Some(Tile::FourWayPassage));
    assert!(game
        .decisions()
        .iter()
        .all(|d| d.action != tng_engine::MoveKind::Crawl));

    // The wax eater left behind still sees Red; blocking it resumes the move.
    let game = play(&game, RED, MoveParam::Block { block: true }).unwrap();
    assert!(game.decisions().is_empty());
    assert_eq!(game.phase(), Phase::DiscoverTiles);
    assert_eq!(game.turn(), 0);
}

/// Test that resting on a start tile crumbles it even once the deck is gone.
#[test]
fn test_stay_crumbles_during_final_flickers() {
    let game = game_with_deck(vec![Tile::Key])
        .draw_tiles(1)
        .place_tile(Position::new(1, 1), Tile::Start, Direction::North)
        .place_tile(Position::new(4, 4), Tile::FourWayPassage, Direction::North)
        .move_player(0, Position::new(1, 1))
        .unwrap()
        .move_player(1, Position::new(4, 4))
        .unwrap();

    let game = play(&game, RED, MoveParam::Stay).unwrap();
    assert_eq!(game.phase(), Phase::Falling);
    assert!(game.player(0).unwrap().falling);

    let game = play(&game, RED, MoveParam::Fall { axis: FallAxis::Row }).unwrap();
    let game = play(&game, RED, MoveParam::Land { place: 2 }).unwrap();
    assert_eq!(Rules.result(&game), Some(GameResult::Lost));
}
