//! Error types for the 8-puzzle core.

use thiserror::Error;

use crate::engine::Move;

/// Contract violations raised by puzzle construction, mutation and search setup.
///
/// All of these are raised synchronously at the offending call. "No solution" is never
/// an error; see [`crate::solver::SearchOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// Tile sequence is not a permutation of `0..=8`.
    #[error("tiles must be the 9 distinct values 0-8, got {0:?}")]
    InvalidTiles(Vec<u8>),

    /// History contains a symbol outside `U`, `D`, `L`, `R`.
    #[error("history may only contain 'U', 'D', 'L' and 'R', found {found:?} in {history:?}")]
    InvalidHistory { history: String, found: char },

    /// Numeric argument out of range (negative depth limit, bad deletion length).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The move is not available for the current blank position.
    #[error("cannot move {mv} with the blank at index {blank}")]
    IllegalMove { mv: Move, blank: usize },
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
