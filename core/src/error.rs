use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    InvalidCoords,
    #[error("Mine count must be below the cell count")]
    InvalidMineCount,
    #[error("Board needs at least one row and one column")]
    InvalidSize,
}

pub type Result<T> = core::result::Result<T, GameError>;
