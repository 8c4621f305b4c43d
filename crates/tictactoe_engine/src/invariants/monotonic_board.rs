//! Monotonic board invariant: cells never change once set.

use super::super::{Board, Cell, GameState};
use super::Invariant;

/// Invariant: Board cells are monotonic (never overwritten).
///
/// Replaying the move history onto an empty board must place every mark on
/// an empty cell and reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(state: &GameState) -> bool {
        let mut reconstructed = Board::new();

        for mov in state.history() {
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Cell::Occupied(mov.player));
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
