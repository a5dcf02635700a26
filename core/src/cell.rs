use serde::{Deserialize, Serialize};

/// What a cell turns out to hold once the layout is frozen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mine,
    /// Safe cell carrying its adjacent-mine count (0..=8).
    Clear(u8),
}

impl CellKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Clear(0)
    }
}

/// Player-visible state of a cell. `Explored` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Default,
    Marked,
    Explored,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub state: CellState,
}

impl Cell {
    /// Single-character rendering of this cell. Explored mines only ever
    /// become visible through the reveal-all pass after a loss.
    pub fn glyph(self) -> char {
        match (self.state, self.kind) {
            (CellState::Default, _) => '.',
            (CellState::Marked, _) => '*',
            (CellState::Explored, CellKind::Mine) => 'X',
            (CellState::Explored, CellKind::Clear(0)) => '/',
            (CellState::Explored, CellKind::Clear(count)) => {
                char::from_digit(count.into(), 10).unwrap_or('?')
            }
        }
    }
}
