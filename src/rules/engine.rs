//! Move dispatcher.
//!
//! Dispatch is a pure function from `(Game, Move)` to a new `Game`:
//!
//! 1. terminal phases reject everything;
//! 2. a pending decision must be answered before anything else;
//! 3. otherwise only the current player may move;
//! 4. the top phase's [`PhaseHandler`] handles the move kind.
//!
//! A handler returns an [`Outcome`]. `SubphaseComplete` pops the stack and
//! hands control to the new top phase's completion handler, repeatedly,
//! until some handler settles on a `Next` state.

use crate::core::{
    Direction, FallAxis, Game, IllegalMove, InternalError, Move, MoveKind, MoveParam,
    PlayerColor, Position, RuleError,
};
use crate::stack::Phase;

use super::decisions;
use super::discovery::{DiscoverTilesHandler, RotateDiscoveredTileHandler};
use super::endgame::{FinalFlickersHandler, GameOverHandler};
use super::falling::{FallingHandler, LandingHandler};
use super::movement::{MovePlayerHandler, PlaceMonsterHandler};
use super::start::{PlaceStartHandler, RotatePlacedHandler};

/// Result of handling one move inside a phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The phase goes on with this state.
    Next(Game),
    /// The phase is done; its parent decides what follows.
    SubphaseComplete(Game),
}

fn wrong_phase(phase: Phase, kind: MoveKind) -> RuleError {
    IllegalMove::WrongPhase { phase, kind }.into()
}

/// Per-phase move handling.
///
/// Each method handles one move kind for the acting player at turn-order
/// index `actor`. Kinds a phase does not accept keep the default
/// implementation, which rejects the move.
pub trait PhaseHandler {
    fn phase(&self) -> Phase;

    fn place_tile(&self, _game: &Game, _actor: usize, _pos: Position) -> Result<Outcome, RuleError> {
        Err(wrong_phase(self.phase(), MoveKind::PlaceTile))
    }

    fn rotate_tile(
        &self,
        _game: &Game,
        _actor: usize,
        _direction: Direction,
    ) -> Result<Outcome, RuleError> {
        Err(wrong_phase(self.phase(), MoveKind::RotateTile))
    }

    fn stay(&self, _game: &Game, _actor: usize) -> Result<Outcome, RuleError> {
        Err(wrong_phase(self.phase(), MoveKind::Stay))
    }

    fn crawl(&self, _game: &Game, _actor: usize, _direction: Direction) -> Result<Outcome, RuleError> {
        Err(wrong_phase(self.phase(), MoveKind::Crawl))
    }

    fn fall(&self, _game: &Game, _actor: usize, _axis: FallAxis) -> Result<Outcome, RuleError> {
        Err(wrong_phase(self.phase(), MoveKind::Fall))
    }

    fn land(&self, _game: &Game, _actor: usize, _place: i32) -> Result<Outcome, RuleError> {
        Err(wrong_phase(self.phase(), MoveKind::Land))
    }

    fn discard_tile(
        &self,
        _game: &Game,
        _actor: usize,
        _pos: Option<Position>,
    ) -> Result<Outcome, RuleError> {
        Err(wrong_phase(self.phase(), MoveKind::DiscardTile))
    }

    fn pass_key(&self, _game: &Game, _actor: usize, _target: PlayerColor) -> Result<Outcome, RuleError> {
        Err(wrong_phase(self.phase(), MoveKind::PassKey))
    }

    /// Called on the new top phase after `completed` was popped.
    fn on_subphase_complete(&self, _game: &Game, completed: Phase) -> Result<Outcome, RuleError> {
        Err(InternalError::NoCompletionHandler(completed).into())
    }
}

/// Handler for a phase.
#[must_use]
pub fn handler_for(phase: Phase) -> &'static dyn PhaseHandler {
    match phase {
        Phase::PlaceStart => &PlaceStartHandler,
        Phase::RotatePlaced => &RotatePlacedHandler,
        Phase::DiscoverTiles => &DiscoverTilesHandler,
        Phase::RotateDiscoveredTile => &RotateDiscoveredTileHandler,
        Phase::Landing => &LandingHandler,
        Phase::MovePlayer => &MovePlayerHandler,
        Phase::PlaceMonster => &PlaceMonsterHandler,
        Phase::Falling => &FallingHandler,
        Phase::FinalFlickers => &FinalFlickersHandler,
        Phase::GameLost => &GameOverHandler(Phase::GameLost),
        Phase::GameWon => &GameOverHandler(Phase::GameWon),
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Every player escaped through a gate.
    Escaped,
    /// The darkness won.
    Lost,
}

/// Rules engine.
///
/// Implementations must be deterministic: the same state and move always
/// yield the same result, and the input state is never modified.
pub trait RulesEngine {
    /// Validate `mv` against `game` and derive the next state.
    fn apply_move(&self, game: &Game, mv: &Move) -> Result<Game, RuleError>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn result(&self, game: &Game) -> Option<GameResult> {
        match game.phase() {
            Phase::GameWon => Some(GameResult::Escaped),
            Phase::GameLost => Some(GameResult::Lost),
            _ => None,
        }
    }
}

/// The standard rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rules;

impl RulesEngine for Rules {
    fn apply_move(&self, game: &Game, mv: &Move) -> Result<Game, RuleError> {
        let result = dispatch(game, mv);

        match &result {
            Ok(next) => tracing::debug!(
                player = %mv.player,
                kind = %mv.kind(),
                phase = %next.phase(),
                turn = next.turn(),
                "move accepted"
            ),
            Err(RuleError::Illegal(err)) => {
                tracing::trace!(player = %mv.player, kind = %mv.kind(), %err, "move rejected");
            }
            Err(RuleError::Internal(err)) => {
                tracing::warn!(player = %mv.player, kind = %mv.kind(), %err, "inconsistent state");
            }
        }

        result
    }
}

/// Apply a move with the standard rules.
pub fn apply_move(game: &Game, mv: &Move) -> Result<Game, RuleError> {
    Rules.apply_move(game, mv)
}

fn dispatch(game: &Game, mv: &Move) -> Result<Game, RuleError> {
    let phase = game.phase();

    if phase.is_terminal() {
        return Err(IllegalMove::GameOver { phase }.into());
    }

    let actor = game
        .player_index(mv.player)
        .ok_or(IllegalMove::UnknownPlayer(mv.player))?;

    if let Some(head) = game.decisions().head() {
        let outcome = decisions::answer(game, actor, mv, *head)?;
        return settle(outcome);
    }

    if actor != game.turn() {
        return Err(IllegalMove::NotPlayerTurn { player: mv.player }.into());
    }

    let handler = handler_for(phase);

    let outcome = match mv.param {
        MoveParam::PlaceTile { pos } => handler.place_tile(game, actor, pos),
        MoveParam::RotateTile { direction } => handler.rotate_tile(game, actor, direction),
        MoveParam::Stay => handler.stay(game, actor),
        MoveParam::Crawl { direction } => handler.crawl(game, actor, direction),
        MoveParam::Fall { axis } => handler.fall(game, actor, axis),
        MoveParam::Land { place } => handler.land(game, actor, place),
        MoveParam::DiscardTile { pos } => handler.discard_tile(game, actor, pos),
        MoveParam::PassKey { target } => handler.pass_key(game, actor, target),
        MoveParam::Block { .. } | MoveParam::MoveAgain => Err(wrong_phase(phase, mv.kind())),
    }?;

    settle(outcome)
}

/// Unwind completed sub-phases until a handler settles.
fn settle(mut outcome: Outcome) -> Result<Game, RuleError> {
    loop {
        match outcome {
            Outcome::Next(game) => return Ok(game),
            Outcome::SubphaseComplete(game) => {
                let (game, completed) = game.pop_phase()?;
                let parent = game.phase();
                tracing::trace!(%completed, %parent, "sub-phase complete");
                outcome = handler_for(parent).on_subphase_complete(&game, completed)?;
            }
        }
    }
}
