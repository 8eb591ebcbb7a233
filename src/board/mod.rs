//! Board model: cells and the toroidal grid.
//!
//! The board only knows tiles, orientations and which colors stand where.
//! It never judges rules: whether a player falls into a pit or picks up a
//! key is decided by [`crate::core::Game`].

mod cell;
mod grid;

pub use cell::{Cell, Occupants};
pub use grid::Board;
