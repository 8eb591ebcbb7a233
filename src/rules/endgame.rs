//! Turn ends, the final flickers and the terminal phases.

use crate::core::{Game, IllegalMove, Position, RuleError, Tile};
use crate::stack::Phase;

use super::engine::{Outcome, PhaseHandler};
use super::require_in_bounds;

/// Close the current turn.
///
/// With tiles left the next player moves; with an exhausted deck the
/// player first has to feed the darkness.
pub(crate) fn end_turn(game: &Game) -> Result<Outcome, RuleError> {
    if game.is_final_flickers() {
        return enter_final_flickers(game);
    }

    Ok(Outcome::Next(game.advance_turn().replace_phase(Phase::MovePlayer)))
}

/// Cells a tile can be discarded from: tiled, unoccupied, not already a pit.
fn discardable(game: &Game) -> impl Iterator<Item = Position> + '_ {
    game.board()
        .cells()
        .filter(|(_, cell)| {
            cell.tile.is_some_and(|t| t != Tile::Pit) && !cell.is_occupied()
        })
        .map(|(pos, _)| pos)
}

pub(crate) fn enter_final_flickers(game: &Game) -> Result<Outcome, RuleError> {
    let player = game.current_player()?;

    if !player.has_spendable_nerve() && discardable(game).next().is_none() {
        tracing::debug!(player = %player.color, "nothing left to give the darkness");
        return Ok(Outcome::Next(game.end(Phase::GameLost)));
    }

    Ok(Outcome::Next(game.replace_phase(Phase::FinalFlickers)))
}

/// End the game if every player escaped.
#[must_use]
pub(crate) fn check_win(game: Game) -> Game {
    if game.is_escape_complete() {
        return game.end(Phase::GameWon);
    }
    game
}

/// Discard a tile into a pit, or spend a nerve to keep the board intact.
pub struct FinalFlickersHandler;

impl PhaseHandler for FinalFlickersHandler {
    fn phase(&self) -> Phase {
        Phase::FinalFlickers
    }

    fn discard_tile(
        &self,
        game: &Game,
        actor: usize,
        pos: Option<Position>,
    ) -> Result<Outcome, RuleError> {
        let paid = match pos {
            Some(pos) => {
                let pos = require_in_bounds(game, pos)?;
                let cell = game.board().at(pos);

                match cell.tile {
                    None => return Err(IllegalMove::EmptyCell(pos).into()),
                    Some(Tile::Pit) => return Err(IllegalMove::PitCell(pos).into()),
                    Some(_) if cell.is_occupied() => {
                        return Err(IllegalMove::CellOccupied(pos).into())
                    }
                    Some(_) => game.place_tile(pos, Tile::Pit, cell.orientation),
                }
            }
            None => {
                if !game.player(actor)?.has_spendable_nerve() {
                    return Err(IllegalMove::NoNerves.into());
                }
                game.change_nerves(actor, -1)?
            }
        };

        Ok(Outcome::Next(paid.advance_turn().replace_phase(Phase::MovePlayer)))
    }
}

/// Terminal phases. Every move is rejected by the dispatcher before it
/// gets here.
pub struct GameOverHandler(pub Phase);

impl PhaseHandler for GameOverHandler {
    fn phase(&self) -> Phase {
        self.0
    }
}
