use alloc::vec::Vec;

use crate::{Coord2, GameConfig};

pub use random::*;

mod random;

/// Source of mine positions, the engine's only nondeterministic input.
///
/// The engine may sample more than once per game: the layout stays
/// provisional until the first reveal, and a first-reveal target that
/// landed on a mine forces a fresh layout.
pub trait LayoutGenerator {
    /// Returns `config.mines()` distinct in-bounds positions.
    fn place_mines(&mut self, config: GameConfig) -> Vec<Coord2>;
}
