//! Board representation and the move transition

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    game::{Move, Outcome},
    lines::LineAnalyzer,
};
use crate::error::{Error, MoveRejection, Result};

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player whose mark this is, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

/// A player in the game. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// An immutable 3x3 board, stored row-major.
///
/// Whose turn it is is derived from the piece counts rather than stored, so
/// there is no way for a board to disagree with itself about the side to
/// move. Every move produces a new value; `Board` is `Copy` and 9 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
    empty: usize,
}

impl Board {
    /// The empty starting board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Build a board from raw cells, rejecting impossible piece counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPieceCounts`] unless X has as many marks as O
    /// or exactly one more.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Result<Self> {
        let count = Self::count_pieces(&cells);
        if count.x != count.o && count.x != count.o + 1 {
            return Err(Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }
        Ok(Board { cells })
    }

    /// Parse a board from its 9-character row-major form.
    ///
    /// `/` row separators and whitespace are ignored, so `"XO./.X./..O"` and
    /// `"XO. .X. ..O"` are accepted alongside `"XO..X...O"`. A string of
    /// exactly 9 characters may use spaces as empty cells.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The string does not contain exactly 9 cell characters
    /// - Any character is not a valid cell representation
    /// - The piece counts break the X-moves-first invariant
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| *c != '/' && (*c == ' ' || !c.is_whitespace()))
            .collect();
        let chars: Vec<char> = if chars.len() == CELL_COUNT {
            chars
        } else {
            // Spaces double as separators unless they make up the 9 cells exactly
            chars.into_iter().filter(|c| *c != ' ').collect()
        };

        if chars.len() != CELL_COUNT {
            return Err(Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Self::from_cells(cells)
    }

    /// 9-character row-major encoding, `.` for empty cells
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Cell at the given coordinates, or `None` when they are off the board
    pub fn cell(&self, mv: Move) -> Option<Cell> {
        mv.index().map(|idx| self.cells[idx])
    }

    fn count_pieces(cells: &[Cell; CELL_COUNT]) -> PieceCount {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Whether every cell is occupied
    pub fn is_full(&self) -> bool {
        Self::count_pieces(&self.cells).empty == 0
    }

    /// The player to move: X when the counts are equal, otherwise O.
    ///
    /// Assumes the piece-count invariant holds; it is not rechecked here.
    pub fn whose_turn(&self) -> Player {
        let count = Self::count_pieces(&self.cells);
        if count.x == count.o {
            Player::X
        } else {
            Player::O
        }
    }

    /// All empty cells in row-major order
    pub fn legal_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Move::from_index(i))
            .collect()
    }

    /// Place the mark of the player to move and return the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] if the game is already over, the
    /// coordinates are off the board, or the cell is occupied.
    #[must_use = "apply_move returns a new board; the original is unchanged"]
    pub fn apply_move(&self, mv: Move) -> Result<Board> {
        let reject = |reason: MoveRejection| Error::InvalidMove {
            row: mv.row,
            col: mv.col,
            reason,
        };

        if self.is_terminal() {
            return Err(reject(MoveRejection::GameOver));
        }
        let idx = mv.index().ok_or_else(|| reject(MoveRejection::OutOfRange))?;
        if self.cells[idx] != Cell::Empty {
            return Err(reject(MoveRejection::Occupied));
        }

        let mut next = *self;
        next.cells[idx] = self.whose_turn().to_cell();
        Ok(next)
    }

    /// Check if a player has three in a row
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Check if the game is over (full board or a completed line)
    pub fn is_terminal(&self) -> bool {
        self.is_full() || LineAnalyzer::any_completed_line(&self.cells)
    }

    /// Owner of the first completed line, if any
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::first_completed_line(&self.cells)
    }

    /// Final result of a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreconditionViolation`] if the game is still in
    /// progress. Use [`Board::status`] for a total alternative.
    pub fn outcome(&self) -> Result<Outcome> {
        if !self.is_terminal() {
            return Err(Error::PreconditionViolation {
                operation: "outcome",
                reason: "board is not terminal",
            });
        }
        Ok(self.status())
    }

    /// Result of the position, `InProgress` while the game continues
    pub fn status(&self) -> Outcome {
        match self.winner() {
            Some(player) => Outcome::Win(player),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_string(s)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.encode()
    }
}

impl TryFrom<String> for Board {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Board::from_string(&value)
    }
}
