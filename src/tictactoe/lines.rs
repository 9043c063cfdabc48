//! Winning line detection

use super::{Cell, Player};

/// Winning line indices on the 3x3 board, in the order they are checked
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player occupies any full line
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Owner of the first completed line, scanning rows, columns, then diagonals
    pub fn first_completed_line(cells: &[Cell; 9]) -> Option<Player> {
        WINNING_LINES.iter().find_map(|line| Self::line_owner(cells, line))
    }

    /// Whether any line is fully occupied by a single mark
    pub fn any_completed_line(cells: &[Cell; 9]) -> bool {
        Self::first_completed_line(cells).is_some()
    }

    fn line_owner(cells: &[Cell; 9], line: &[usize; 3]) -> Option<Player> {
        let [a, b, c] = *line;
        if cells[a] != cells[b] || cells[b] != cells[c] {
            return None;
        }
        cells[a].owner()
    }
}
