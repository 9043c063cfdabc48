//! Exhaustive minimax solver for Tic-Tac-Toe
//!
//! This crate provides:
//! - An immutable 3x3 board model with turn, move and outcome queries
//! - Plain minimax search (no pruning, no cache) over the full game tree
//! - Best-move selection with a uniform random tie-break among optimal moves
//! - Terminal-node instrumentation through caller-owned observers
//!
//! # Examples
//!
//! ```
//! use ttt_solver::{search::Minimax, tictactoe::{Board, Move}};
//!
//! // X X .
//! // O O .
//! // . . .   X completes the top row
//! let board = Board::from_string("XX.OO....").unwrap();
//! let mut searcher = Minimax::with_seed(42);
//! assert_eq!(searcher.best_move(&board).unwrap(), Move::new(0, 2));
//! ```

pub mod config;
pub mod error;
pub mod search;
pub mod tictactoe;

pub use config::SearchConfig;
pub use error::{Error, MoveRejection, Result};
pub use search::{Minimax, Score, SearchReport};
pub use tictactoe::{Board, Cell, Move, Outcome, Player};
