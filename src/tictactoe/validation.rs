//! Board state validation logic

use super::board::{Board, Cell, Player};

impl Board {
    /// Check that the board could arise from legal play.
    ///
    /// X must have as many marks as O or exactly one more, and at most one
    /// player may hold a completed line.
    pub fn is_valid(&self) -> bool {
        let x_count = self.cells().iter().filter(|&&c| c == Cell::X).count();
        let o_count = self.cells().iter().filter(|&&c| c == Cell::O).count();

        if !(x_count == o_count || x_count == o_count + 1) {
            return false;
        }

        !(self.has_won(Player::X) && self.has_won(Player::O))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Move;

    #[test]
    fn test_reachable_boards_are_valid() {
        let board = Board::new()
            .apply_move(Move::new(0, 0))
            .and_then(|b| b.apply_move(Move::new(1, 1)))
            .unwrap();
        assert!(board.is_valid());
        assert!(Board::new().is_valid());
    }

    #[test]
    fn test_double_winner_is_invalid() {
        // X X X
        // O O O
        // X . .   counts are fine, but both players have a line
        let board = Board::from_string("XXXOOOX..").unwrap();
        assert!(!board.is_valid());
    }
}
