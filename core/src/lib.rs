#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Board shape and mine budget, validated at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    pub fn new((cols, rows): Coord2, mines: CellCount) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(GameError::InvalidSize);
        }
        // At least one cell must stay safe.
        if mines >= mult(cols, rows) {
            return Err(GameError::InvalidMineCount);
        }
        Ok(Self {
            size: (cols, rows),
            mines,
        })
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn cols(&self) -> Coord {
        self.size.0
    }

    pub const fn rows(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Outcome of toggling a mark.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    /// Whether the game may continue after this reveal.
    pub const fn is_safe(self) -> bool {
        !matches!(self, Self::HitMine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_boards() {
        assert_eq!(GameConfig::new((0, 9), 5), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new((9, 0), 5), Err(GameError::InvalidSize));
    }

    #[test]
    fn config_requires_at_least_one_safe_cell() {
        assert_eq!(
            GameConfig::new((3, 3), 9),
            Err(GameError::InvalidMineCount)
        );
        assert!(GameConfig::new((3, 3), 8).is_ok());
        assert!(GameConfig::new((3, 3), 0).is_ok());
    }

    #[test]
    fn config_counts_cells_of_rectangular_boards() {
        let config = GameConfig::new((4, 7), 10).unwrap();
        assert_eq!(config.total_cells(), 28);
        assert_eq!(config.safe_cells(), 18);
    }

    #[test]
    fn hitting_a_mine_is_the_only_unsafe_outcome() {
        assert!(RevealOutcome::NoChange.is_safe());
        assert!(RevealOutcome::Revealed.is_safe());
        assert!(!RevealOutcome::HitMine.is_safe());
    }
}
