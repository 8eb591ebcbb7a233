//! Turn sequencing: the phase stack and the pending-decision queue.
//!
//! ## Phase stack
//!
//! A turn is a nest of sub-procedures (place, rotate, discover, move, fall,
//! land...). The [`PhaseStack`] models them as a call stack of [`Phase`]
//! tags: pushing enters a sub-procedure, popping returns control to the
//! parent, whose completion handler decides what happens next.
//!
//! The stack is never empty. Terminal phases replace the whole stack.
//!
//! ## Decisions
//!
//! A [`Decision`] is a choice owed by a player before the main flow can go
//! on (block a monster, crawl away from one, move again). Decisions queue
//! in arrival order in a [`DecisionQueue`] and only the head is actionable.
//!
//! ```
//! use tng_engine::stack::{Phase, PhaseStack};
//!
//! let stack = PhaseStack::new(Phase::PlaceStart).push(Phase::RotatePlaced);
//! assert_eq!(stack.top(), Phase::RotatePlaced);
//!
//! let (parent, completed) = stack.pop().unwrap();
//! assert_eq!(completed, Phase::RotatePlaced);
//! assert_eq!(parent.top(), Phase::PlaceStart);
//! assert!(parent.pop().is_err());
//! ```

mod queue;

pub use queue::{Decision, DecisionQueue};

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::InternalError;

/// A sub-procedure of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PlaceStart,
    RotatePlaced,
    DiscoverTiles,
    RotateDiscoveredTile,
    Landing,
    MovePlayer,
    PlaceMonster,
    Falling,
    FinalFlickers,
    GameLost,
    GameWon,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::PlaceStart => "place_start",
            Phase::RotatePlaced => "rotate_placed",
            Phase::DiscoverTiles => "discover_tiles",
            Phase::RotateDiscoveredTile => "rotate_discovered_tile",
            Phase::Landing => "landing",
            Phase::MovePlayer => "move_player",
            Phase::PlaceMonster => "place_monster",
            Phase::Falling => "falling",
            Phase::FinalFlickers => "final_flickers",
            Phase::GameLost => "game_lost",
            Phase::GameWon => "game_won",
        }
    }

    /// Won or lost: no move is accepted any more.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameLost | Phase::GameWon)
    }

    /// Phases that reveal tiles around the acting player and share the
    /// "anything left to discover?" exit test.
    #[must_use]
    pub const fn is_discovery(self) -> bool {
        matches!(
            self,
            Phase::RotatePlaced | Phase::DiscoverTiles | Phase::RotateDiscoveredTile
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty call stack of phases (index 0 = bottom, last = top).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseStack {
    phases: Vector<Phase>,
}

impl PhaseStack {
    /// A stack holding a single phase.
    #[must_use]
    pub fn new(initial: Phase) -> Self {
        Self {
            phases: Vector::unit(initial),
        }
    }

    /// Phase currently in control.
    #[must_use]
    pub fn top(&self) -> Phase {
        // Never empty: `pop` refuses to remove the last entry.
        self.phases.back().copied().unwrap_or(Phase::GameLost)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phases from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = Phase> + '_ {
        self.phases.iter().copied()
    }

    /// Enter a nested sub-procedure.
    #[must_use]
    pub fn push(&self, phase: Phase) -> Self {
        let mut phases = self.phases.clone();
        phases.push_back(phase);
        Self { phases }
    }

    /// Swap the top phase for another one at the same depth.
    #[must_use]
    pub fn replace(&self, phase: Phase) -> Self {
        let mut phases = self.phases.clone();
        phases.pop_back();
        phases.push_back(phase);
        Self { phases }
    }

    /// Leave the top phase. Returns the remaining stack and the phase that
    /// was completed.
    pub fn pop(&self) -> Result<(Self, Phase), InternalError> {
        if self.phases.len() < 2 {
            return Err(InternalError::NoPhaseToPop);
        }

        let mut phases = self.phases.clone();
        let completed = phases.pop_back().ok_or(InternalError::NoPhaseToPop)?;
        Ok((Self { phases }, completed))
    }

    /// Discard every phase and keep only `phase`.
    #[must_use]
    pub fn reset(phase: Phase) -> Self {
        Self::new(phase)
    }
}

impl std::fmt::Display for PhaseStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(Phase::as_str).collect();
        write!(f, "[{}]", names.join(" > "))
    }
}
