//! Answering pending decisions.
//!
//! While the queue is non-empty only its head can be answered, by the
//! player who owes it and with the move kind it names.

use crate::core::{Game, IllegalMove, Move, MoveKind, MoveParam, RuleError};
use crate::rules::constants::MONSTER_DRAW_PENALTY;
use crate::stack::{Decision, Phase};

use super::endgame::end_turn;
use super::engine::Outcome;
use super::movement::{crawl, finish_move};

pub(crate) fn answer(
    game: &Game,
    actor: usize,
    mv: &Move,
    head: Decision,
) -> Result<Outcome, RuleError> {
    let pending = IllegalMove::DecisionPending {
        player: head.player,
        kind: head.action,
    };

    if game.player(actor)?.color != head.player {
        return Err(pending.into());
    }

    match (head.action, &mv.param) {
        (MoveKind::Block, MoveParam::Block { block }) => {
            let hit = if *block {
                spend_nerve(game, actor)?
            } else {
                game.draw_tiles(MONSTER_DRAW_PENALTY).light_out(actor)?
            };

            let resolved = hit.resolve_decision();

            // The last block answered lets the interrupted move finish.
            if resolved.decisions().is_empty() && resolved.phase() == Phase::MovePlayer {
                return finish_move(&resolved, resolved.turn());
            }

            Ok(Outcome::Next(resolved))
        }
        (MoveKind::Crawl, MoveParam::Crawl { direction }) => {
            crawl(&game.resolve_decision(), actor, *direction, true)
        }
        (MoveKind::MoveAgain, MoveParam::MoveAgain) => {
            Ok(Outcome::Next(spend_nerve(game, actor)?.resolve_decision()))
        }
        (MoveKind::MoveAgain, MoveParam::Stay) => end_turn(&game.resolve_decision()),
        _ => Err(pending.into()),
    }
}

fn spend_nerve(game: &Game, actor: usize) -> Result<Game, RuleError> {
    if !game.player(actor)?.has_spendable_nerve() {
        return Err(IllegalMove::NoNerves.into());
    }

    Ok(game.change_nerves(actor, -1)?)
}
