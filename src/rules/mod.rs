//! Game rules: the phase machine and the move dispatcher.
//!
//! Every move goes through [`RulesEngine::apply_move`], which either
//! returns the next state or a [`RuleError`](crate::core::RuleError); the
//! input state is never modified. Rules live in one [`PhaseHandler`] per
//! phase:
//!
//! - `start`: placing start tiles and orienting the tile underfoot
//! - `discovery`: revealing tiles around the acting player
//! - `movement`: staying, crawling, passing keys, placing monsters
//! - `falling`: choosing a fall axis and landing
//! - `endgame`: turn ends, final flickers, terminal phases
//! - `decisions`: answering queued block / crawl / move-again decisions

pub mod constants;
mod decisions;
mod discovery;
mod endgame;
mod engine;
mod falling;
mod movement;
mod start;

pub use engine::{apply_move, handler_for, GameResult, Outcome, PhaseHandler, Rules, RulesEngine};

use crate::core::{Game, IllegalMove, Position};

/// Reject positions off the board instead of wrapping them.
pub(crate) fn require_in_bounds(game: &Game, pos: Position) -> Result<Position, IllegalMove> {
    if game.board().in_bounds(pos) {
        Ok(pos)
    } else {
        Err(IllegalMove::OutOfBounds(pos))
    }
}
