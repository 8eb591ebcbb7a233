//! The movement phase: staying, crawling, passing keys, and placing the
//! monster a rest drew.

use crate::core::{
    Direction, Game, IllegalMove, InternalError, MoveKind, PlayerColor, Position, RuleError, Tile,
};
use crate::lighting::{refresh_lighting, relight_around};
use crate::monsters::{activate_monsters, trigger_monsters};
use crate::stack::Phase;

use super::discovery::discovery_pending;
use super::endgame::{check_win, end_turn, enter_final_flickers};
use super::engine::{Outcome, PhaseHandler};
use super::require_in_bounds;

/// Crawl one step through an exit of the player's cell.
///
/// Shared by the movement phase and forced crawl decisions. The crawl:
///
/// 1. moves the player, crumbling the vacated cell if needed;
/// 2. draws a tile into an unexplored destination (players in the dark, or
///    anyone escaping a monster when `forced`);
/// 3. wakes the monsters in sight of the vacated cell;
/// 4. unless someone now owes a decision, recomputes light and continues
///    with discovery or an optional extra move.
pub(crate) fn crawl(
    game: &Game,
    actor: usize,
    direction: Direction,
    forced: bool,
) -> Result<Outcome, RuleError> {
    let player = game.player(actor)?;
    let color = player.color;

    if player.falling {
        return Err(IllegalMove::PlayerFalling(color).into());
    }

    let origin = game.position_of(actor)?;
    let origin_dirs = game
        .board()
        .open_directions(origin)
        .map_err(|_| InternalError::PlayerOnEmptyCell(origin))?;

    if !origin_dirs.contains(&direction) {
        return Err(IllegalMove::IllegalDirection.into());
    }

    let dest = game.board().neighbor(origin, direction);
    let dest_cell = game.board().at(dest);
    let into_darkness = !dest_cell.is_explored();

    if into_darkness {
        if player.has_light && !forced {
            return Err(IllegalMove::EmptyCell(dest).into());
        }

        if game.is_final_flickers() {
            let way_out = origin_dirs.iter().any(|&d| {
                let cell = game.board().at(game.board().neighbor(origin, d));
                cell.is_explored() && (!cell.is_occupied() || cell.tile == Some(Tile::Gate))
            });

            if way_out {
                return Err(IllegalMove::DeckExhausted.into());
            }

            tracing::debug!(player = %color, "lost in the dark");
            return Ok(Outcome::Next(game.end(Phase::GameLost)));
        }
    } else if dest_cell.is_occupied() && dest_cell.tile != Some(Tile::Gate) {
        return Err(IllegalMove::CellOccupied(dest).into());
    }

    let mut next = game.move_player(actor, dest)?;

    if next.player(actor)?.falling {
        return Ok(Outcome::Next(refresh_lighting(&next).push_phase(Phase::Falling)));
    }

    let mut forced_crawl = false;

    if into_darkness {
        let (drawn, tile) = next.draw_tile()?;
        let orientation = tile
            .orientation_opening(direction.opposite())
            .unwrap_or_default();

        next = drawn.place_tile(dest, tile, orientation).pick_up_key(actor)?;
        forced_crawl = tile.is_monster();
    }

    next = check_win(next);
    if next.is_over() {
        return Ok(Outcome::Next(next));
    }

    let hits = trigger_monsters(next.board(), origin, &origin_dirs);
    next = activate_monsters(&next, &hits)?;

    if forced_crawl {
        next = next.enqueue_decision(color, MoveKind::Crawl);
    }

    if !next.decisions().is_empty() {
        return Ok(Outcome::Next(next));
    }

    finish_move(&next, actor)
}

/// Wrap up a move once no decision is owed: light, discovery, extra move.
pub(crate) fn finish_move(game: &Game, actor: usize) -> Result<Outcome, RuleError> {
    let lit = refresh_lighting(&relight_around(game, actor)?);

    if discovery_pending(&lit, actor)? {
        return Ok(Outcome::Next(lit.push_phase(Phase::DiscoverTiles)));
    }

    offer_move_again(&lit, actor)
}

/// A player with a nerve to spend may move again; otherwise the turn ends.
pub(crate) fn offer_move_again(game: &Game, actor: usize) -> Result<Outcome, RuleError> {
    let player = game.player(actor)?;

    if player.has_spendable_nerve() {
        return Ok(Outcome::Next(
            game.enqueue_decision(player.color, MoveKind::MoveAgain),
        ));
    }

    end_turn(game)
}

/// Drop a resting player through a crumbling floor, leaving a pit behind.
fn crumble(game: &Game, actor: usize, pos: Position) -> Result<Option<Game>, RuleError> {
    let cell = game.board().at(pos);
    let under = cell.tile.ok_or(InternalError::PlayerOnEmptyCell(pos))?;

    if !under.is_crumbling() {
        return Ok(None);
    }

    let fallen = game
        .place_tile(pos, Tile::Pit, cell.orientation)
        .player_falls(actor)?;

    tracing::debug!(player = %game.player(actor)?.color, %pos, "floor crumbled");
    Ok(Some(refresh_lighting(&fallen).push_phase(Phase::Falling)))
}

pub struct MovePlayerHandler;

impl PhaseHandler for MovePlayerHandler {
    fn phase(&self) -> Phase {
        Phase::MovePlayer
    }

    fn stay(&self, game: &Game, actor: usize) -> Result<Outcome, RuleError> {
        let player = game.player(actor)?;

        if player.falling {
            return Err(IllegalMove::PlayerFalling(player.color).into());
        }

        let pos = game.position_of(actor)?;

        if !player.has_light && !player.has_spendable_nerve() {
            return Err(IllegalMove::NoNerves.into());
        }

        let delta = if player.has_light { 1 } else { -1 };
        let rested = game.change_nerves(actor, delta)?;

        if rested.is_final_flickers() {
            if let Some(fallen) = crumble(&rested, actor, pos)? {
                return Ok(Outcome::Next(fallen));
            }
            return enter_final_flickers(&rested);
        }

        let (drawn, tile) = rested.draw_tile()?;

        if tile.is_monster() {
            let board = drawn.board();
            let has_room = board
                .neighbors_visible_from(pos)
                .into_iter()
                .any(|p| !board.at(p).is_occupied());

            if has_room {
                return Ok(Outcome::Next(drawn.push_phase(Phase::PlaceMonster)));
            }

            tracing::trace!(%tile, "no room for the monster, discarded");
            return end_turn(&drawn);
        }

        if let Some(fallen) = crumble(&drawn, actor, pos)? {
            return Ok(Outcome::Next(fallen));
        }

        end_turn(&drawn)
    }

    fn crawl(&self, game: &Game, actor: usize, direction: Direction) -> Result<Outcome, RuleError> {
        crawl(game, actor, direction, false)
    }

    /// Free action: hand the key to a player on the same or a visible cell.
    fn pass_key(&self, game: &Game, actor: usize, target: PlayerColor) -> Result<Outcome, RuleError> {
        let giver = game.player(actor)?;

        if giver.falling {
            return Err(IllegalMove::PlayerFalling(giver.color).into());
        }
        if !giver.has_key {
            return Err(IllegalMove::NoKey(giver.color).into());
        }

        let to = game
            .player_index(target)
            .ok_or(IllegalMove::UnknownPlayer(target))?;
        let receiver = game.player(to)?;

        if receiver.has_key {
            return Err(IllegalMove::AlreadyHasKey(target).into());
        }

        let pos = game.position_of(actor)?;
        let within_reach = receiver.board_position().is_some_and(|p| {
            p == pos || game.board().neighbors_visible_from(pos).contains(&p)
        });

        if !within_reach {
            return Err(IllegalMove::NotConnected(receiver.pos.unwrap_or(pos)).into());
        }

        tracing::debug!(from = %giver.color, to = %target, "key passed");
        Ok(Outcome::Next(check_win(game.give_key(actor, to)?)))
    }

    fn on_subphase_complete(&self, game: &Game, completed: Phase) -> Result<Outcome, RuleError> {
        match completed {
            Phase::Falling => Ok(Outcome::Next(game.replace_phase(Phase::Landing))),
            Phase::PlaceMonster => end_turn(game),
            p if p.is_discovery() => offer_move_again(game, game.turn()),
            p => Err(InternalError::NoCompletionHandler(p).into()),
        }
    }
}

/// Put the monster a rest drew on a cell next to the player.
pub struct PlaceMonsterHandler;

impl PhaseHandler for PlaceMonsterHandler {
    fn phase(&self) -> Phase {
        Phase::PlaceMonster
    }

    fn place_tile(&self, game: &Game, actor: usize, pos: Position) -> Result<Outcome, RuleError> {
        let origin = game.position_of(actor)?;
        let pos = require_in_bounds(game, pos)?;

        if !game.board().neighbors_visible_from(origin).contains(&pos) {
            return Err(IllegalMove::NotConnected(pos).into());
        }
        if game.board().at(pos).is_occupied() {
            return Err(IllegalMove::CellOccupied(pos).into());
        }

        let monster = game
            .tile_holder()
            .last_drawn()
            .ok_or(InternalError::NothingDrawn)?;

        if !monster.is_monster() {
            return Err(InternalError::UnknownMonster(monster).into());
        }

        let placed = game.place_tile(pos, monster, Direction::North);
        Ok(Outcome::SubphaseComplete(refresh_lighting(&placed)))
    }
}
