//! Minimax search for the best move

pub mod minimax;
pub mod observer;

pub use minimax::{
    Minimax, MoveEvaluation, Score, SearchReport, evaluate, max_value, min_value,
};
pub use observer::{NoopObserver, SearchObserver, TerminalCounter};
