//! Exhaustive minimax over the full game tree
//!
//! Scores are always from X's point of view: +1 when X wins, -1 when O wins
//! and 0 for a draw. X maximizes, O minimizes. There is no pruning and no
//! cache; the complete tree from the empty board has 255,168 leaves, which is
//! small enough to walk every time.

use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use super::observer::{SearchObserver, TerminalCounter};
use crate::{
    Error, Result,
    config::SearchConfig,
    tictactoe::{Board, Move, Outcome, Player},
};

/// Minimax value of a position
pub type Score = i32;

/// Leaf score of a finished game.
///
/// # Errors
///
/// Returns [`Error::PreconditionViolation`] if the game is not over.
pub fn evaluate(board: &Board) -> Result<Score> {
    Ok(outcome_score(board.outcome()?))
}

fn outcome_score(outcome: Outcome) -> Score {
    match outcome {
        Outcome::Win(Player::X) => 1,
        Outcome::Win(Player::O) => -1,
        Outcome::Draw | Outcome::InProgress => 0,
    }
}

fn leaf_score<O: SearchObserver + ?Sized>(board: &Board, observer: &mut O) -> Score {
    let score = outcome_score(board.status());
    observer.on_terminal(board, score);
    score
}

fn successors(board: &Board) -> impl Iterator<Item = (Move, Board)> + '_ {
    board
        .legal_moves()
        .into_iter()
        .filter_map(move |mv| board.apply_move(mv).ok().map(|next| (mv, next)))
}

/// Best score X can force from `board`, assuming O replies optimally.
pub fn max_value<O: SearchObserver + ?Sized>(board: &Board, observer: &mut O) -> Score {
    if board.is_terminal() {
        return leaf_score(board, observer);
    }

    let mut best = Score::MIN;
    for (_, next) in successors(board) {
        best = best.max(min_value(&next, observer));
    }
    best
}

/// Best score O can force from `board`, assuming X replies optimally.
pub fn min_value<O: SearchObserver + ?Sized>(board: &Board, observer: &mut O) -> Score {
    if board.is_terminal() {
        return leaf_score(board, observer);
    }

    let mut best = Score::MAX;
    for (_, next) in successors(board) {
        best = best.min(max_value(&next, observer));
    }
    best
}

/// Value of the position reached after `player` has moved
fn reply_value<O: SearchObserver + ?Sized>(player: Player, next: &Board, observer: &mut O) -> Score {
    match player {
        Player::X => min_value(next, observer),
        Player::O => max_value(next, observer),
    }
}

/// Minimax value of one candidate move at the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveEvaluation {
    #[serde(rename = "move")]
    pub mv: Move,
    pub score: Score,
}

/// Full result of a root search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub board: Board,
    pub player: Player,
    /// Every legal move with its value, in row-major order
    pub evaluations: Vec<MoveEvaluation>,
    pub best_score: Score,
    /// All moves achieving `best_score`
    pub optimal_moves: Vec<Move>,
    /// The move picked uniformly at random from `optimal_moves`
    pub chosen: Move,
    pub terminal_nodes: u64,
}

/// Counts leaves for the report while forwarding them to a caller's observer
struct Forwarding<'a, O: ?Sized> {
    counter: TerminalCounter,
    inner: &'a mut O,
}

impl<O: SearchObserver + ?Sized> SearchObserver for Forwarding<'_, O> {
    fn on_terminal(&mut self, board: &Board, score: Score) {
        self.counter.on_terminal(board, score);
        self.inner.on_terminal(board, score);
    }
}

/// Best-move searcher.
///
/// Owns the random number generator used to break ties between equally good
/// moves, so repeated calls on the same position can return different (but
/// equally optimal) moves. Seed it through [`SearchConfig`] for reproducible
/// play.
#[derive(Debug, Clone)]
pub struct Minimax {
    config: SearchConfig,
    rng: StdRng,
}

impl Minimax {
    /// Searcher with default configuration and an entropy-seeded RNG
    pub fn new() -> Self {
        Self::from_config(SearchConfig::default())
    }

    /// Searcher with a deterministic tie-break seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(SearchConfig::default().with_seed(seed))
    }

    pub fn from_config(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Optimal move for the player to move, ties broken uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreconditionViolation`] if the game is already over.
    pub fn best_move(&mut self, board: &Board) -> Result<Move> {
        Ok(self.analyze(board)?.chosen)
    }

    /// Like [`Minimax::best_move`], reporting every terminal node to
    /// `observer`. Always searches on the calling thread.
    pub fn best_move_observed<O: SearchObserver + ?Sized>(
        &mut self,
        board: &Board,
        observer: &mut O,
    ) -> Result<Move> {
        Ok(self.analyze_sequential(board, observer)?.chosen)
    }

    /// Evaluate every root move and choose among the optimal ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreconditionViolation`] if the game is already over.
    pub fn analyze(&mut self, board: &Board) -> Result<SearchReport> {
        if self.config.parallel {
            self.analyze_parallel(board)
        } else {
            self.analyze_sequential(board, &mut super::NoopObserver)
        }
    }

    fn analyze_sequential<O: SearchObserver + ?Sized>(
        &mut self,
        board: &Board,
        observer: &mut O,
    ) -> Result<SearchReport> {
        ensure_playable(board)?;
        let player = board.whose_turn();

        let mut forwarding = Forwarding {
            counter: TerminalCounter::default(),
            inner: observer,
        };
        let evaluations: Vec<MoveEvaluation> = successors(board)
            .map(|(mv, next)| MoveEvaluation {
                mv,
                score: reply_value(player, &next, &mut forwarding),
            })
            .collect();

        self.select(board, player, evaluations, forwarding.counter.terminal_nodes)
    }

    fn analyze_parallel(&mut self, board: &Board) -> Result<SearchReport> {
        ensure_playable(board)?;
        let player = board.whose_turn();

        let children: Vec<(Move, Board)> = successors(board).collect();
        // Each subtree gets its own counter; nothing is shared until the join.
        let results: Vec<(MoveEvaluation, TerminalCounter)> = children
            .par_iter()
            .map(|&(mv, next)| {
                let mut counter = TerminalCounter::default();
                let score = reply_value(player, &next, &mut counter);
                (MoveEvaluation { mv, score }, counter)
            })
            .collect();

        let mut total = TerminalCounter::default();
        let mut evaluations = Vec::with_capacity(results.len());
        for (evaluation, counter) in results {
            total.merge(&counter);
            evaluations.push(evaluation);
        }

        self.select(board, player, evaluations, total.terminal_nodes)
    }

    fn select(
        &mut self,
        board: &Board,
        player: Player,
        evaluations: Vec<MoveEvaluation>,
        terminal_nodes: u64,
    ) -> Result<SearchReport> {
        for evaluation in &evaluations {
            trace!(mv = %evaluation.mv, score = evaluation.score, "root move evaluated");
        }

        let scores = evaluations.iter().map(|e| e.score);
        let best_score = match player {
            Player::X => scores.max(),
            Player::O => scores.min(),
        }
        .ok_or(Error::PreconditionViolation {
            operation: "best_move",
            reason: "no legal moves available",
        })?;

        let optimal_moves: Vec<Move> = evaluations
            .iter()
            .filter(|e| e.score == best_score)
            .map(|e| e.mv)
            .collect();
        let chosen = *optimal_moves
            .choose(&mut self.rng)
            .ok_or(Error::PreconditionViolation {
                operation: "best_move",
                reason: "no legal moves available",
            })?;

        debug!(
            board = %board.encode(),
            player = %player,
            best_score,
            optimal = optimal_moves.len(),
            chosen = %chosen,
            terminal_nodes,
            "search complete"
        );

        Ok(SearchReport {
            board: *board,
            player,
            evaluations,
            best_score,
            optimal_moves,
            chosen,
            terminal_nodes,
        })
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_playable(board: &Board) -> Result<()> {
    if board.is_terminal() {
        return Err(Error::PreconditionViolation {
            operation: "best_move",
            reason: "game is already over",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::search::NoopObserver;

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn test_evaluate_sign_convention() {
        assert_eq!(evaluate(&board("XXXOO....")).unwrap(), 1);
        assert_eq!(evaluate(&board("XX.OOOX.X")).unwrap(), -1);
        assert_eq!(evaluate(&board("XOXXOXOXO")).unwrap(), 0);
    }

    #[test]
    fn test_evaluate_requires_terminal() {
        let err = evaluate(&Board::new()).unwrap_err();
        assert!(err.is_precondition_violation());
    }

    #[test]
    fn test_values_on_terminal_board_are_leaf_scores() {
        let won = board("XXXOO....");
        let mut counter = TerminalCounter::default();
        assert_eq!(max_value(&won, &mut counter), 1);
        assert_eq!(min_value(&won, &mut counter), 1);
        assert_eq!(counter.terminal_nodes, 2);
    }

    #[test]
    fn test_o_blocks_and_draws() {
        // X X .
        // . O .
        // . . .   O to move must block at (0, 2)
        let position = board("XX..O....");
        let mut searcher = Minimax::with_seed(1);
        let report = searcher.analyze(&position).unwrap();

        assert_eq!(report.player, Player::O);
        assert_eq!(report.best_score, 0);
        assert_eq!(report.optimal_moves, vec![Move::new(0, 2)]);
        assert_eq!(report.chosen, Move::new(0, 2));
    }

    #[test]
    fn test_o_takes_immediate_win() {
        // X X .
        // O O .
        // X . .
        let position = board("XX.OO.X..");
        let report = Minimax::with_seed(5).analyze(&position).unwrap();

        assert_eq!(report.player, Player::O);
        assert_eq!(report.best_score, -1);
        assert!(report.optimal_moves.contains(&Move::new(1, 2)));
        assert!(report.optimal_moves.contains(&report.chosen));
    }

    #[test]
    fn test_best_move_on_terminal_board_fails() {
        let err = Minimax::with_seed(0)
            .best_move(&board("XXXOO...."))
            .unwrap_err();
        assert!(err.is_precondition_violation());
    }

    #[test]
    fn test_evaluations_cover_all_legal_moves_in_order() {
        let position = board("X...O....");
        let report = Minimax::with_seed(2).analyze(&position).unwrap();

        let moves: Vec<Move> = report.evaluations.iter().map(|e| e.mv).collect();
        assert_eq!(moves, position.legal_moves());
    }

    #[test]
    fn test_tie_break_reaches_every_optimal_move() {
        // Every first move draws, so all nine are optimal from the empty board;
        // a later position keeps the test fast.
        // X . .
        // . O .
        // . . X   O must not take a corner; the four edges all hold the draw
        let position = board("X...O...X");
        let report = Minimax::with_seed(9).analyze(&position).unwrap();
        let optimal: HashSet<Move> = report.optimal_moves.iter().copied().collect();
        assert!(optimal.len() > 1);

        let mut seen = HashSet::new();
        for seed in 0..200 {
            let mut searcher = Minimax::with_seed(seed);
            seen.insert(searcher.best_move(&position).unwrap());
        }
        assert_eq!(seen, optimal);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let position = board("X...O...X");
        let a = Minimax::with_seed(77).best_move(&position).unwrap();
        let b = Minimax::with_seed(77).best_move(&position).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_observed_search_forwards_leaves() {
        let position = board("XO.XO....");
        let mut counter = TerminalCounter::default();
        let mut searcher = Minimax::with_seed(3);
        let mv = searcher.best_move_observed(&position, &mut counter).unwrap();

        let report = Minimax::with_seed(3).analyze(&position).unwrap();
        assert_eq!(mv, report.chosen);
        assert_eq!(counter.terminal_nodes, report.terminal_nodes);
        assert!(counter.terminal_nodes > 0);
    }

    #[test]
    fn test_noop_observer_is_accepted() {
        let position = board("XO.XO....");
        assert_eq!(max_value(&position, &mut NoopObserver), 1);
    }
}
