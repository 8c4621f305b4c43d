//! The state transition function.

use super::action::{Move, MoveError};
#[cfg(debug_assertions)]
use super::invariants::{GameInvariants, InvariantSet};
use super::rules::{check_winner, is_full};
use super::types::{Cell, GameState, GameStatus};
use super::Position;
use tracing::{debug, instrument};

impl GameState {
    /// Places the current player's mark at `pos`, returning the next state.
    ///
    /// `self` is never modified; on error the caller keeps the state it had.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game is already won or tied.
    /// - [`MoveError::CellOccupied`] if the cell holds a mark.
    /// - [`MoveError::InvariantViolation`] if a postcondition fails (debug builds).
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&self, pos: Position) -> Result<GameState, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::CellOccupied(pos));
        }

        let mut next = self.clone();
        let player = next.current_player;
        next.board.set(pos, Cell::Occupied(player));
        next.history.push(Move::new(player, pos));

        if let Some((winner, line)) = check_winner(&next.board) {
            debug!(winner = %winner, line = ?line.indices(), "Game won");
            next.status = GameStatus::Won {
                player: winner,
                line,
            };
        } else if is_full(&next.board) {
            debug!("Game tied");
            next.status = GameStatus::Tied;
        } else {
            next.current_player = player.opponent();
        }

        #[cfg(debug_assertions)]
        GameInvariants::check_all(&next).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        Ok(next)
    }

    /// Same as [`GameState::apply_move`], addressing the cell by index (0-8).
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfBounds`] if `index > 8`, otherwise as `apply_move`.
    pub fn apply_index(&self, index: usize) -> Result<GameState, MoveError> {
        let pos = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        self.apply_move(pos)
    }

    /// Empty positions while the game is in progress, nothing once it is over.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.status.is_over() {
            Vec::new()
        } else {
            Position::valid_moves(&self.board)
        }
    }

    /// Replays indices from the initial state, stopping at the first rejection.
    ///
    /// # Errors
    ///
    /// The first [`MoveError`] encountered.
    #[instrument]
    pub fn replay(indices: &[usize]) -> Result<GameState, MoveError> {
        indices
            .iter()
            .try_fold(GameState::new(), |state, &index| state.apply_index(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_first_move_flips_player() {
        let state = GameState::new().apply_move(Position::Center).unwrap();
        assert_eq!(state.board().get(Position::Center), Cell::Occupied(Player::X));
        assert_eq!(state.current_player(), Player::O);
        assert_eq!(state.history(), &[Move::new(Player::X, Position::Center)]);
    }

    #[test]
    fn test_occupied_cell_rejected_without_change() {
        let state = GameState::new().apply_move(Position::Center).unwrap();
        let before = state.clone();
        assert_eq!(
            state.apply_move(Position::Center),
            Err(MoveError::CellOccupied(Position::Center))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_out_of_bounds_index() {
        assert_eq!(
            GameState::new().apply_index(9),
            Err(MoveError::OutOfBounds(9))
        );
    }

    #[test]
    fn test_winner_keeps_current_player() {
        let state = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(state.current_player(), Player::X);
        assert!(state.valid_moves().is_empty());
    }

    #[test]
    fn test_game_over_checked_before_occupancy() {
        let state = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(state.apply_index(0), Err(MoveError::GameOver));
        assert_eq!(state.apply_index(8), Err(MoveError::GameOver));
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_tie() {
        // X O X / O X O / O X X : the ninth mark completes the main diagonal.
        let state = GameState::replay(&[0, 1, 2, 3, 4, 5, 7, 6, 8]).unwrap();
        assert!(crate::is_full(state.board()));
        match state.status() {
            GameStatus::Won { player, line } => {
                assert_eq!(*player, Player::X);
                assert_eq!(line.indices(), [0, 4, 8]);
            }
            other => panic!("Expected a win, got {:?}", other),
        }
    }
}
