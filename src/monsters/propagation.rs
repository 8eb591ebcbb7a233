//! Ray casting and chain reaction.
//!
//! Propagation runs in two passes over a fixed board:
//!
//! 1. **Seed**: starting from the trigger cell, find the monsters it wakes
//!    up. A monster on the trigger cell itself wakes up directly; otherwise
//!    a ray is cast through each seed direction.
//! 2. **Chain**: every awake monster casts a ray through each of its own
//!    exits. Players on the monster's cell or on any cell the ray passes are
//!    hit by that monster; further monsters met along the way wake up too.
//!
//! A ray moves straight, wrapping around the board, and continues only
//! while the cell it stands on opens further in the same direction. It
//! stops on an unexplored cell, a pit, a monster, or when it comes back to
//! the trigger cell or to its own start. Rays pass through occupied cells.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{Board, Cell};
use crate::core::{Direction, PlayerColor, Position, Tile};

/// Which monsters hit which player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonsterHits {
    hits: FxHashMap<PlayerColor, Vec<Position>>,
    woken: Vec<Position>,
}

impl MonsterHits {
    /// Monster cells that hit `player`, in the order they woke up.
    #[must_use]
    pub fn for_player(&self, player: PlayerColor) -> &[Position] {
        self.hits.get(&player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every monster that woke up, in wake order.
    #[must_use]
    pub fn woken(&self) -> &[Position] {
        &self.woken
    }

    /// Nobody was hit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Number of players hit.
    #[must_use]
    pub fn victims(&self) -> usize {
        self.hits.len()
    }

    fn record(&mut self, cell: &Cell, monster: Position) {
        for color in &cell.occupants {
            let list = self.hits.entry(*color).or_default();
            if !list.contains(&monster) {
                list.push(monster);
            }
        }
    }
}

/// Monster propagation over one board snapshot.
pub struct MonsterPropagation<'a> {
    board: &'a Board,
    origin: Position,
    queue: VecDeque<Position>,
    visited: FxHashSet<Position>,
    hits: MonsterHits,
}

impl<'a> MonsterPropagation<'a> {
    #[must_use]
    pub fn new(board: &'a Board, origin: Position) -> Self {
        Self {
            board,
            origin: origin.wrapped(board.edge_length()),
            queue: VecDeque::new(),
            visited: FxHashSet::default(),
            hits: MonsterHits::default(),
        }
    }

    /// Run both passes. `seed_directions` are the exits the trigger cell had
    /// when the player stood on it (it may have crumbled since).
    #[must_use]
    pub fn run(mut self, seed_directions: &[Direction]) -> MonsterHits {
        let board = self.board;

        if board.at(self.origin).holds_monster() {
            self.wake(self.origin);
        } else {
            for &d in seed_directions {
                if let Some(monster) = self.cast(self.origin, d, false) {
                    self.wake(monster);
                }
            }
        }

        while let Some(monster) = self.queue.pop_front() {
            let cell = board.at(monster);
            self.hits.record(cell, monster);

            for d in cell.open_directions() {
                if let Some(next) = self.cast(monster, d, true) {
                    self.wake(next);
                }
            }
        }

        tracing::trace!(
            monsters = self.hits.woken.len(),
            victims = self.hits.victims(),
            "monsters propagated"
        );

        self.hits
    }

    fn wake(&mut self, monster: Position) {
        if self.visited.insert(monster) {
            self.hits.woken.push(monster);
            self.queue.push_back(monster);
        }
    }

    /// Walk a ray from `start` towards `d`. Returns the monster it ran into.
    fn cast(&mut self, start: Position, d: Direction, hitting: bool) -> Option<Position> {
        let board = self.board;
        let mut pos = start;

        loop {
            let next = board.neighbor(pos, d);
            if next == start || next == self.origin {
                return None;
            }

            let cell = board.at(next);
            match cell.tile {
                None | Some(Tile::Pit) => return None,
                Some(tile) if tile.is_monster() => return Some(next),
                Some(_) => {}
            }

            if hitting {
                self.hits.record(cell, start);
            }

            if !board.is_connected(next, d) {
                return None;
            }

            pos = next;
        }
    }
}

/// Monsters woken from `origin` and the players they hit.
#[must_use]
pub fn trigger_monsters(
    board: &Board,
    origin: Position,
    seed_directions: &[Direction],
) -> MonsterHits {
    MonsterPropagation::new(board, origin).run(seed_directions)
}
