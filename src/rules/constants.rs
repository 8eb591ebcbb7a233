//! Rules constants.

/// Nerves a player can hold at most.
pub const MAX_NERVES: u8 = 2;

/// Nerves every player starts with.
pub const STARTING_NERVES: u8 = 1;

/// Tiles burnt when a wax eater strikes a player with no nerve to spend.
pub const MONSTER_DRAW_PENALTY: usize = 3;

pub const MAX_PLAYERS: usize = 5;

/// Board edge for up to four players.
pub const SMALL_EDGE_LENGTH: usize = 6;

/// Board edge for five players.
pub const LARGE_EDGE_LENGTH: usize = 7;

/// Board edge length for a given number of players.
#[must_use]
pub const fn edge_length_for(player_count: usize) -> usize {
    if player_count > 4 {
        LARGE_EDGE_LENGTH
    } else {
        SMALL_EDGE_LENGTH
    }
}
