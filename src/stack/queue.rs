//! Pending-decision queue.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{MoveKind, PlayerColor};

/// A choice owed by `player`, answered by a move of kind `action`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decision {
    pub player: PlayerColor,
    pub action: MoveKind,
    /// Arrival number; lower is older.
    pub order: u32,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} owes {}", self.order, self.player, self.action)
    }
}

/// FIFO of decisions. Only the head may be answered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionQueue {
    entries: Vector<Decision>,
    next_order: u32,
}

impl DecisionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn enqueue(&self, player: PlayerColor, action: MoveKind) -> Self {
        let mut entries = self.entries.clone();
        entries.push_back(Decision {
            player,
            action,
            order: self.next_order,
        });

        Self {
            entries,
            next_order: self.next_order + 1,
        }
    }

    /// Oldest pending decision.
    #[must_use]
    pub fn head(&self) -> Option<&Decision> {
        self.entries.front()
    }

    /// Drop the head decision once it has been answered.
    #[must_use]
    pub fn resolve_head(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.pop_front();

        Self {
            entries,
            next_order: self.next_order,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decision> + '_ {
        self.entries.iter()
    }

    /// Check if `player` owes anything.
    #[must_use]
    pub fn is_owed_by(&self, player: PlayerColor) -> bool {
        self.entries.iter().any(|d| d.player == player)
    }
}
