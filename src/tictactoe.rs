//! Tic-Tac-Toe game model

pub mod board;
pub mod game;
pub mod lines;
pub mod validation;

pub use board::{BOARD_SIZE, Board, CELL_COUNT, Cell, Player};
pub use game::{Move, Outcome};
pub use lines::{LineAnalyzer, WINNING_LINES};
