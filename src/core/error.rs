//! Error types.
//!
//! Rejections come in two kinds:
//!
//! - [`IllegalMove`]: the move breaks a rule (wrong turn, wrong phase,
//!   unreachable target, missing resource). The input state is untouched and
//!   the caller should ask the player again.
//! - [`InternalError`]: the input state could not have been produced by legal
//!   play, or the engine broke an invariant. Never retry these.
//!
//! Both are wrapped by [`RuleError`], which is what the dispatcher returns.

use super::action::MoveKind;
use super::player::PlayerColor;
use super::position::Position;
use super::tile::Tile;
use crate::stack::Phase;

/// How a rejection should be handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid input; re-prompt the player.
    Validation,
    /// Inconsistent state; a bug in the caller or the engine.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// A move that breaks the rules for the current state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("not {player}'s turn")]
    NotPlayerTurn { player: PlayerColor },

    #[error("move {kind} is not allowed in phase {phase}")]
    WrongPhase { phase: Phase, kind: MoveKind },

    #[error("game is over ({phase})")]
    GameOver { phase: Phase },

    #[error("{player} owes a pending {kind} decision")]
    DecisionPending { player: PlayerColor, kind: MoveKind },

    #[error("position {0} is out of the board")]
    OutOfBounds(Position),

    #[error("position {0} is not connected to the player")]
    NotConnected(Position),

    #[error("cell {0} already holds a tile")]
    TileNotEmpty(Position),

    #[error("cell {0} holds no tile")]
    EmptyCell(Position),

    #[error("cell {0} is occupied")]
    CellOccupied(Position),

    #[error("cell {0} is a pit")]
    PitCell(Position),

    #[error("cannot land on {0} while its line has unexplored cells")]
    GapInFallLine(Position),

    #[error("no passage leads that way")]
    IllegalDirection,

    #[error("tile deck is exhausted")]
    DeckExhausted,

    #[error("no nerves left to spend")]
    NoNerves,

    #[error("player {0} is not falling")]
    NotFalling(PlayerColor),

    #[error("player {0} is falling")]
    PlayerFalling(PlayerColor),

    #[error("fall axis already chosen")]
    AxisAlreadyChosen,

    #[error("player {0} holds no key")]
    NoKey(PlayerColor),

    #[error("player {0} already holds a key")]
    AlreadyHasKey(PlayerColor),

    #[error("player {0} is not in this game")]
    UnknownPlayer(PlayerColor),
}

/// A violated invariant. The input state was not reachable by legal play.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("player {0} has no position")]
    PlayerWithoutPosition(PlayerColor),

    #[error("cell {0} under a player holds no tile")]
    PlayerOnEmptyCell(Position),

    #[error("cell {0} holds no tile")]
    MissingTile(Position),

    #[error("falling player {0} has no fall axis")]
    MissingFallAxis(PlayerColor),

    #[error("cannot pop the last phase")]
    NoPhaseToPop,

    #[error("tile {0} is not a monster")]
    UnknownMonster(Tile),

    #[error("turn index {0} has no player")]
    InvalidTurn(usize),

    #[error("no tile was placed in this phase")]
    NoPlacedTile,

    #[error("phase {0} has no completion handler")]
    NoCompletionHandler(Phase),

    #[error("no tile was drawn before placing a monster")]
    NothingDrawn,
}

/// Error returned by the move dispatcher.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMove),

    #[error("internal inconsistency: {0}")]
    Internal(#[from] InternalError),
}

impl RuleError {
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuleError::Illegal(_) => ErrorSeverity::Validation,
            RuleError::Internal(_) => ErrorSeverity::Internal,
        }
    }

    #[must_use]
    pub fn is_illegal(&self) -> bool {
        matches!(self, RuleError::Illegal(_))
    }

    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, RuleError::Internal(_))
    }
}

/// Rejected game configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("no players")]
    NoPlayers,

    #[error("too many players: {0} (at most 5)")]
    TooManyPlayers(usize),

    #[error("duplicated color {0}")]
    DuplicateColor(PlayerColor),

    #[error("deck holds no tiles")]
    EmptyDeck,
}

/// Failure to decode or encode a move envelope.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("malformed move: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to persist or restore a game snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot codec failed: {0}")]
    Codec(#[from] bincode::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        let illegal: RuleError = IllegalMove::DeckExhausted.into();
        assert!(illegal.is_illegal());
        assert_eq!(illegal.severity(), ErrorSeverity::Validation);

        let internal: RuleError = InternalError::NoPhaseToPop.into();
        assert!(internal.is_internal());
        assert_eq!(internal.severity().as_str(), "internal");
    }

    #[test]
    fn test_messages() {
        let err: RuleError = IllegalMove::NotPlayerTurn {
            player: PlayerColor::Blue,
        }
        .into();
        assert_eq!(err.to_string(), "illegal move: not blue's turn");

        let err = IllegalMove::WrongPhase {
            phase: Phase::MovePlayer,
            kind: MoveKind::PlaceTile,
        };
        assert_eq!(err.to_string(), "move place_tile is not allowed in phase move_player");
    }
}
