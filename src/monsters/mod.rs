//! Monster triggering.
//!
//! A player leaving a cell (or landing on one) may wake monsters in sight.
//! [`trigger_monsters`] works out which monsters woke up and whom they hit;
//! [`activate_monsters`] turns those hits into block decisions or penalties.

mod propagation;
mod resolution;

pub use propagation::{trigger_monsters, MonsterHits, MonsterPropagation};
pub use resolution::{activate_monsters, monster_attack};
