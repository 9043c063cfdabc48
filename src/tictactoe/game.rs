//! Moves and game outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BOARD_SIZE, Player};

/// A move: the (row, column) of an empty cell to fill, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    /// Row-major cell index, or `None` when the coordinates are off the board
    pub fn index(self) -> Option<usize> {
        if self.row < BOARD_SIZE && self.col < BOARD_SIZE {
            Some(self.row * BOARD_SIZE + self.col)
        } else {
            None
        }
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Move {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        }
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Move { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Outcome of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win(Player),
    Draw,
    InProgress,
}

impl Outcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }

    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}
