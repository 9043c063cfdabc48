//! Error types for the solver crate

use thiserror::Error;

/// Main error type for the solver crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move ({row}, {col}): {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: MoveRejection,
    },

    #[error("precondition violated in {operation}: {reason}")]
    PreconditionViolation {
        operation: &'static str,
        reason: &'static str,
    },

    #[error("board string has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why `apply_move` refused a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfRange,
    Occupied,
    GameOver,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MoveRejection::OutOfRange => "coordinates are outside the 3x3 board",
            MoveRejection::Occupied => "cell is already occupied",
            MoveRejection::GameOver => "game already over",
        };
        f.write_str(text)
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// True for errors raised by an illegal `apply_move`
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, Error::InvalidMove { .. })
    }

    /// True for errors raised when an operation's board precondition is broken
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Error::PreconditionViolation { .. })
    }
}
