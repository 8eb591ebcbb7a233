//! Falling through a pit and landing somewhere along a row or column.

use crate::core::{Direction, FallAxis, Game, IllegalMove, InternalError, MoveKind, RuleError, Tile};
use crate::lighting::{refresh_lighting, relight_around};
use crate::monsters::{activate_monsters, trigger_monsters};
use crate::stack::Phase;

use super::discovery::discovery_pending;
use super::endgame::{check_win, end_turn};
use super::engine::{Outcome, PhaseHandler};

/// The fallen player commits to a row or a column.
pub struct FallingHandler;

impl PhaseHandler for FallingHandler {
    fn phase(&self) -> Phase {
        Phase::Falling
    }

    fn fall(&self, game: &Game, actor: usize, axis: FallAxis) -> Result<Outcome, RuleError> {
        let player = game.player(actor)?;

        if !player.falling {
            return Err(IllegalMove::NotFalling(player.color).into());
        }
        if player.fall_axis.is_some() {
            return Err(IllegalMove::AxisAlreadyChosen.into());
        }

        Ok(Outcome::SubphaseComplete(game.fall_axis_chosen(actor, axis)?))
    }
}

/// The fallen player lands on a cell of the chosen line.
pub struct LandingHandler;

impl PhaseHandler for LandingHandler {
    fn phase(&self) -> Phase {
        Phase::Landing
    }

    fn land(&self, game: &Game, actor: usize, place: i32) -> Result<Outcome, RuleError> {
        let player = game.player(actor)?;
        let color = player.color;

        if !player.falling {
            return Err(IllegalMove::NotFalling(color).into());
        }

        let axis = player.fall_axis.ok_or(InternalError::MissingFallAxis(color))?;
        let origin = player.pos.ok_or(InternalError::PlayerWithoutPosition(color))?;
        let edge = game.edge_length();
        let dest = axis.cell_at(origin, place);

        if !(0..edge as i32).contains(&place) {
            return Err(IllegalMove::OutOfBounds(dest).into());
        }

        let board = game.board();
        let cell = board.at(dest);

        let (landed, fresh) = match cell.tile {
            Some(tile) => {
                if axis.cells(origin, edge).any(|p| !board.at(p).is_explored()) {
                    return Err(IllegalMove::GapInFallLine(dest).into());
                }
                if tile == Tile::Pit {
                    return Err(IllegalMove::PitCell(dest).into());
                }
                if cell.is_occupied() && tile != Tile::Gate {
                    return Err(IllegalMove::CellOccupied(dest).into());
                }

                (game.move_player(actor, dest)?, None)
            }
            None => {
                if game.is_final_flickers() {
                    tracing::debug!(player = %color, "fell into nothing");
                    return Ok(Outcome::Next(game.end(Phase::GameLost)));
                }

                let (drawn, tile) = game.draw_tile()?;
                let landed = drawn
                    .place_tile(dest, tile, Direction::North)
                    .move_player(actor, dest)?;

                (landed, Some(tile))
            }
        };

        tracing::debug!(player = %color, %dest, "landed");

        let landed = check_win(landed);
        if landed.is_over() {
            return Ok(Outcome::Next(landed));
        }

        let under = landed
            .board()
            .at(dest)
            .tile
            .ok_or(InternalError::PlayerOnEmptyCell(dest))?;

        if under.is_monster() {
            let hits = trigger_monsters(landed.board(), dest, &[]);
            let struck = activate_monsters(&landed, &hits)?
                .replace_phase(Phase::MovePlayer)
                .enqueue_decision(color, MoveKind::Crawl);

            return Ok(Outcome::Next(struck));
        }

        let lit = refresh_lighting(&relight_around(&landed, actor)?);

        if fresh.is_some_and(Tile::is_ambiguous) {
            return Ok(Outcome::Next(lit.push_phase(Phase::RotatePlaced)));
        }
        if discovery_pending(&lit, actor)? {
            return Ok(Outcome::Next(lit.push_phase(Phase::DiscoverTiles)));
        }

        end_turn(&lit)
    }

    fn on_subphase_complete(&self, game: &Game, _completed: Phase) -> Result<Outcome, RuleError> {
        end_turn(&game.replace_phase(Phase::MovePlayer))
    }
}
