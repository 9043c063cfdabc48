//! Observer port for search instrumentation
//!
//! The search itself keeps no state between calls. Anything a caller wants to
//! learn about the traversal (how many leaves were reached, how they ended)
//! is reported through a [`SearchObserver`] that the caller owns and passes
//! in.
//!
//! # Examples
//!
//! ```
//! use ttt_solver::{
//!     search::{TerminalCounter, max_value},
//!     tictactoe::Board,
//! };
//!
//! let board = Board::from_string("XX.OO....").unwrap();
//! let mut counter = TerminalCounter::default();
//! let score = max_value(&board, &mut counter);
//!
//! assert_eq!(score, 1);
//! assert!(counter.terminal_nodes > 0);
//! ```

use super::Score;
use crate::tictactoe::Board;

/// Receives a callback for every terminal node the search reaches.
pub trait SearchObserver {
    /// Called once per terminal board visited, with its leaf score.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_terminal(&mut self, _board: &Board, _score: Score) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Counts terminal nodes, split by result
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCounter {
    pub terminal_nodes: u64,
    pub x_wins: u64,
    pub o_wins: u64,
    pub draws: u64,
}

impl TerminalCounter {
    /// Fold another counter's totals into this one
    pub fn merge(&mut self, other: &TerminalCounter) {
        self.terminal_nodes += other.terminal_nodes;
        self.x_wins += other.x_wins;
        self.o_wins += other.o_wins;
        self.draws += other.draws;
    }
}

impl SearchObserver for TerminalCounter {
    fn on_terminal(&mut self, _board: &Board, score: Score) {
        self.terminal_nodes += 1;
        match score {
            s if s > 0 => self.x_wins += 1,
            s if s < 0 => self.o_wins += 1,
            _ => self.draws += 1,
        }
    }
}

impl<T: SearchObserver + ?Sized> SearchObserver for &mut T {
    fn on_terminal(&mut self, board: &Board, score: Score) {
        (**self).on_terminal(board, score);
    }
}
