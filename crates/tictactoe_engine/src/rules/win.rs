//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three positions whose uniform marks win the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([Position; 3]);

impl WinLine {
    /// The three positions of this line.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// The three board indices of this line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// Returns true if the line passes through `pos`.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }
}

/// All winning lines: rows, then columns, then diagonals.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    WinLine([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    WinLine([
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ]),
    // Columns
    WinLine([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    WinLine([Position::TopCenter, Position::Center, Position::BottomCenter]),
    WinLine([
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ]),
    // Diagonals
    WinLine([Position::TopLeft, Position::Center, Position::BottomRight]),
    WinLine([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// Checks if there is a winner on the board.
///
/// Returns the player and the first completed line in [`WIN_LINES`] order.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Player, WinLine)> {
    WIN_LINES.iter().find_map(|line| {
        let [a, b, c] = line.positions();
        match board.get(a) {
            Cell::Occupied(player)
                if board.get(b) == board.get(a) && board.get(c) == board.get(a) =>
            {
                Some((player, *line))
            }
            _ => None,
        }
    })
}
