//! Dynamic lighting.
//!
//! Explored tiles only stay on the board while someone can see them. A cell
//! is *enlightened* when a player stands on it, or when it is visible
//! (one step through an exit) from a cell whose occupant holds a light.
//! Every other explored cell loses its tile.
//!
//! Falling players light nothing until they land.
//!
//! Light itself changes only through monster attacks (light out) and
//! proximity (relighting), see [`relight_around`].

use rustc_hash::FxHashSet;

use crate::core::{Game, InternalError, Position};

/// Cells currently enlightened by some player.
#[must_use]
pub fn enlightened_cells(game: &Game) -> FxHashSet<Position> {
    let mut lit = FxHashSet::default();

    for player in game.players().iter() {
        let Some(pos) = player.board_position() else {
            continue;
        };

        lit.insert(pos);

        if player.has_light {
            lit.extend(game.board().neighbors_visible_from(pos));
        }
    }

    lit
}

#[must_use]
pub fn is_enlightened(game: &Game, pos: Position) -> bool {
    enlightened_cells(game).contains(&pos.wrapped(game.edge_length()))
}

/// Drop every explored tile outside the enlightened set.
#[must_use]
pub fn refresh_lighting(game: &Game) -> Game {
    let lit = enlightened_cells(game);

    let dropped: Vec<Position> = game
        .board()
        .cells()
        .filter(|(pos, cell)| cell.is_explored() && !lit.contains(pos))
        .map(|(pos, _)| pos)
        .collect();

    if dropped.is_empty() {
        return game.clone();
    }

    tracing::trace!(dropped = dropped.len(), "tiles fell into darkness");
    game.drop_tiles(dropped)
}

/// Proximity relighting after a player arrives somewhere.
///
/// A lit mover relights every unlit player visible from their new cell; an
/// unlit mover is relit when a visible neighbor holds a light.
pub fn relight_around(game: &Game, idx: usize) -> Result<Game, InternalError> {
    if game.player(idx)?.has_light {
        game.relight_near(idx)
    } else {
        game.relight_self(idx)
    }
}
