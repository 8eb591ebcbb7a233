//! Game state: the immutable aggregate every move derives a new copy of.
//!
//! ## Game
//!
//! Complete game state:
//! - Board (tiles, orientations, occupants)
//! - Players, in turn order, and the index of the current one
//! - Tile holder (shuffled deck plus draw cursor)
//! - Phase stack and pending-decision queue
//!
//! Every collection is an `im` persistent structure, so cloning a `Game`
//! is O(1) and a derived state shares untouched data with its parent.
//!
//! ## Primitives
//!
//! The methods below are mechanical transitions. They keep the state
//! consistent (occupancy, key pickup, crumbling, falling) but never judge
//! whether a move is legal: that is the job of [`crate::rules`].

use im::Vector;
use serde::{Deserialize, Serialize};

use super::deck::TileHolder;
use super::direction::{Direction, FallAxis};
use super::error::{IllegalMove, InternalError, SnapshotError};
use super::action::MoveKind;
use super::player::{Player, PlayerColor};
use super::position::Position;
use super::tile::Tile;
use crate::board::Board;
use crate::lighting;
use crate::rules::constants::MAX_NERVES;
use crate::stack::{DecisionQueue, Phase, PhaseStack};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    tile_holder: TileHolder,
    players: Vector<Player>,
    turn: usize,
    phases: PhaseStack,
    last_placed_tile_pos: Option<Position>,
    decisions: DecisionQueue,
}

impl Game {
    /// A fresh game: empty board, every player unplaced, first player to
    /// place their start tile.
    #[must_use]
    pub(crate) fn new(edge_length: usize, colors: &[PlayerColor], tiles: Vector<Tile>) -> Self {
        Self {
            board: Board::new(edge_length),
            tile_holder: TileHolder::new(tiles),
            players: colors.iter().copied().map(Player::new).collect(),
            turn: 0,
            phases: PhaseStack::new(Phase::PlaceStart),
            last_placed_tile_pos: None,
            decisions: DecisionQueue::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn edge_length(&self) -> usize {
        self.board.edge_length()
    }

    #[must_use]
    pub fn tile_holder(&self) -> &TileHolder {
        &self.tile_holder
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Player at a turn-order index.
    pub fn player(&self, idx: usize) -> Result<&Player, InternalError> {
        self.players.get(idx).ok_or(InternalError::InvalidTurn(idx))
    }

    /// Turn-order index of a color.
    #[must_use]
    pub fn player_index(&self, color: PlayerColor) -> Option<usize> {
        self.players.iter().position(|p| p.color == color)
    }

    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> Result<&Player, InternalError> {
        self.player(self.turn)
    }

    /// Phase on top of the stack.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phases.top()
    }

    #[must_use]
    pub fn phases(&self) -> &PhaseStack {
        &self.phases
    }

    #[must_use]
    pub fn last_placed_tile_pos(&self) -> Option<Position> {
        self.last_placed_tile_pos
    }

    #[must_use]
    pub fn decisions(&self) -> &DecisionQueue {
        &self.decisions
    }

    /// Deck exhausted: no draw is possible any more.
    #[must_use]
    pub fn is_final_flickers(&self) -> bool {
        self.tile_holder.is_exhausted()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase().is_terminal()
    }

    /// Board position of an on-board player.
    pub fn position_of(&self, idx: usize) -> Result<Position, InternalError> {
        let player = self.player(idx)?;
        player
            .board_position()
            .ok_or(InternalError::PlayerWithoutPosition(player.color))
    }

    /// Indices of the players standing on `pos`.
    #[must_use]
    pub fn players_at(&self, pos: Position) -> Vec<usize> {
        self.board
            .at(pos)
            .occupants
            .iter()
            .filter_map(|c| self.player_index(*c))
            .collect()
    }

    /// Indices of the players standing on a cell visible from `pos`.
    #[must_use]
    pub fn near_players(&self, pos: Position) -> Vec<usize> {
        self.board
            .neighbors_visible_from(pos)
            .into_iter()
            .flat_map(|p| self.players_at(p))
            .collect()
    }

    /// Every player holds a key and all stand together on a gate.
    #[must_use]
    pub fn is_escape_complete(&self) -> bool {
        if !self.players.iter().all(|p| p.has_key) {
            return false;
        }

        let mut positions = self.players.iter().map(Player::board_position);
        let Some(Some(first)) = positions.next() else {
            return false;
        };

        positions.all(|p| p == Some(first)) && self.board.at(first).tile == Some(Tile::Gate)
    }

    // === Phase stack ===

    #[must_use]
    pub fn push_phase(&self, phase: Phase) -> Self {
        tracing::trace!(%phase, "push phase");
        Self {
            phases: self.phases.push(phase),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn replace_phase(&self, phase: Phase) -> Self {
        tracing::trace!(%phase, "replace phase");
        Self {
            phases: self.phases.replace(phase),
            ..self.clone()
        }
    }

    /// Leave the top phase, returning the phase that was completed.
    pub fn pop_phase(&self) -> Result<(Self, Phase), InternalError> {
        let (phases, completed) = self.phases.pop()?;
        tracing::trace!(phase = %completed, "pop phase");

        Ok((
            Self {
                phases,
                ..self.clone()
            },
            completed,
        ))
    }

    /// Collapse the stack onto a single (terminal) phase.
    #[must_use]
    pub fn end(&self, phase: Phase) -> Self {
        tracing::debug!(%phase, "game ended");
        Self {
            phases: PhaseStack::reset(phase),
            decisions: DecisionQueue::new(),
            ..self.clone()
        }
    }

    // === Turn ===

    #[must_use]
    pub fn set_turn(&self, turn: usize) -> Self {
        Self {
            turn,
            ..self.clone()
        }
    }

    /// Hand the turn to the next player in order.
    #[must_use]
    pub fn advance_turn(&self) -> Self {
        self.set_turn((self.turn + 1) % self.players.len().max(1))
    }

    // === Deck ===

    /// Draw the next tile.
    pub fn draw_tile(&self) -> Result<(Self, Tile), IllegalMove> {
        let (tile_holder, tile) = self.tile_holder.draw().ok_or(IllegalMove::DeckExhausted)?;

        Ok((
            Self {
                tile_holder,
                ..self.clone()
            },
            tile,
        ))
    }

    /// Draw and discard up to `n` tiles.
    #[must_use]
    pub fn draw_tiles(&self, n: usize) -> Self {
        Self {
            tile_holder: self.tile_holder.advanced(n),
            ..self.clone()
        }
    }

    // === Board ===

    /// Place a tile and remember where it went.
    #[must_use]
    pub fn place_tile(&self, pos: Position, tile: Tile, orientation: Direction) -> Self {
        Self {
            board: self.board.place_tile(pos, tile, orientation),
            last_placed_tile_pos: Some(pos.wrapped(self.edge_length())),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn drop_tiles(&self, positions: impl IntoIterator<Item = Position>) -> Self {
        Self {
            board: self.board.drop_tiles(positions),
            ..self.clone()
        }
    }

    // === Players ===

    fn with_player(&self, idx: usize, f: impl FnOnce(&mut Player)) -> Result<Self, InternalError> {
        let mut player = self.player(idx)?.clone();
        f(&mut player);

        Ok(Self {
            players: self.players.update(idx, player),
            ..self.clone()
        })
    }

    /// Move a player onto `pos`.
    ///
    /// Updates:
    /// - position, clearing any falling status
    /// - picks up a key if the destination holds one
    /// - entering a pit makes the player fall (no board occupancy)
    /// - a crumbling vacated cell turns into a pit
    pub fn move_player(&self, idx: usize, pos: Position) -> Result<Self, InternalError> {
        let player = self.player(idx)?;
        let color = player.color;
        let from = player.board_position();
        let pos = pos.wrapped(self.edge_length());
        let into_pit = self.board.at(pos).tile == Some(Tile::Pit);

        let mut board = self.board.clone();

        if let Some(from) = from {
            let vacated = board.at(from);
            let tile = vacated.tile.ok_or(InternalError::PlayerOnEmptyCell(from))?;
            if tile.is_crumbling() && from != pos {
                board = board.place_tile(from, Tile::Pit, vacated.orientation);
            }
        }

        let to = if into_pit { None } else { Some(pos) };
        board = board.move_occupant(color, from, to);

        let moved = Self {
            board,
            ..self.clone()
        }
        .with_player(idx, |p| {
            p.pos = Some(pos);
            p.falling = into_pit;
            p.fall_axis = None;
        })?;

        if into_pit {
            tracing::trace!(player = %color, %pos, "fell into a pit");
            return Ok(moved);
        }

        moved.pick_up_key(idx)
    }

    /// Give the player a key if they stand on a key tile without one.
    pub fn pick_up_key(&self, idx: usize) -> Result<Self, InternalError> {
        let player = self.player(idx)?;

        let on_key = player
            .board_position()
            .is_some_and(|pos| self.board.at(pos).tile == Some(Tile::Key));

        if !on_key || player.has_key {
            return Ok(self.clone());
        }

        tracing::debug!(player = %player.color, "picked up a key");
        self.with_player(idx, |p| p.has_key = true)
    }

    /// Hand a key from one player to another.
    pub fn give_key(&self, from: usize, to: usize) -> Result<Self, InternalError> {
        self.with_player(from, |p| p.has_key = false)?
            .with_player(to, |p| p.has_key = true)
    }

    /// The player falls where they stand: off the board, keeping the
    /// position as the origin of the fall.
    pub fn player_falls(&self, idx: usize) -> Result<Self, InternalError> {
        let player = self.player(idx)?;
        let color = player.color;
        let pos = player
            .board_position()
            .ok_or(InternalError::PlayerWithoutPosition(color))?;

        Self {
            board: self.board.move_occupant(color, Some(pos), None),
            ..self.clone()
        }
        .with_player(idx, |p| {
            p.falling = true;
            p.fall_axis = None;
        })
    }

    /// Add `delta` nerves, clamped to `0..=MAX_NERVES`.
    pub fn change_nerves(&self, idx: usize, delta: i8) -> Result<Self, InternalError> {
        self.with_player(idx, |p| {
            let nerves = i16::from(p.nerves) + i16::from(delta);
            p.nerves = nerves.clamp(0, i16::from(MAX_NERVES)) as u8;
        })
    }

    pub fn fall_axis_chosen(&self, idx: usize, axis: FallAxis) -> Result<Self, InternalError> {
        self.with_player(idx, |p| p.fall_axis = Some(axis))
    }

    // === Light ===

    /// Extinguish a player's light and drop the tiles around them that
    /// nobody lights any more.
    pub fn light_out(&self, idx: usize) -> Result<Self, InternalError> {
        let player = self.player(idx)?;

        if !player.has_light {
            return Ok(self.clone());
        }

        tracing::debug!(player = %player.color, "light out");
        let dark = self.with_player(idx, |p| p.has_light = false)?;

        let Some(pos) = player.board_position() else {
            return Ok(dark);
        };

        let lit = lighting::enlightened_cells(&dark);
        let dropped: Vec<Position> = dark
            .board
            .neighbors_visible_from(pos)
            .into_iter()
            .filter(|p| dark.board.at(*p).is_explored() && !lit.contains(p))
            .collect();

        Ok(dark.drop_tiles(dropped))
    }

    /// Relight every unlit player standing on a cell visible from the
    /// player's own.
    pub fn relight_near(&self, idx: usize) -> Result<Self, InternalError> {
        let pos = self.position_of(idx)?;
        let mut game = self.clone();

        for near in self.near_players(pos) {
            if !game.player(near)?.has_light {
                tracing::trace!(player = %game.player(near)?.color, "relit");
                game = game.with_player(near, |p| p.has_light = true)?;
            }
        }

        Ok(game)
    }

    /// Relight the player if anyone visible from their cell has light.
    pub fn relight_self(&self, idx: usize) -> Result<Self, InternalError> {
        let pos = self.position_of(idx)?;

        for near in self.near_players(pos) {
            if self.player(near)?.has_light {
                return self.with_player(idx, |p| p.has_light = true);
            }
        }

        Ok(self.clone())
    }

    // === Decisions ===

    #[must_use]
    pub fn enqueue_decision(&self, player: PlayerColor, action: MoveKind) -> Self {
        tracing::trace!(%player, %action, "decision queued");
        Self {
            decisions: self.decisions.enqueue(player, action),
            ..self.clone()
        }
    }

    /// Remove the head decision once answered.
    #[must_use]
    pub fn resolve_decision(&self) -> Self {
        Self {
            decisions: self.decisions.resolve_head(),
            ..self.clone()
        }
    }

    // === Snapshots ===

    /// Encode the whole state for caller-owned persistence.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
