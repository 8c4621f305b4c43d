//! Status consistency invariant: the status agrees with the board.

use super::super::rules::{check_winner, is_full};
use super::super::{GameState, GameStatus};
use super::Invariant;

/// Invariant: the recorded status is the one the rules derive from the board.
pub struct StatusConsistentInvariant;

impl Invariant<GameState> for StatusConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let expected = match check_winner(board) {
            Some((player, line)) => GameStatus::Won { player, line },
            None if is_full(board) => GameStatus::Tied,
            None => GameStatus::InProgress,
        };
        *state.status() == expected
    }

    fn description() -> &'static str {
        "Status matches the board (won, tied, or in progress)"
    }
}
