//! Stateful handle over a single game.

use super::action::MoveError;
use super::types::GameState;
use tracing::{debug, info, instrument};

/// Tic-tac-toe game engine.
///
/// Holds exactly one [`GameState`]. The state is replaced only when a move
/// is accepted or the game is reset.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    state: GameState,
}

impl GameEngine {
    /// Creates an engine holding a fresh game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Plays the current player's mark at cell `index` (0-8).
    ///
    /// # Errors
    ///
    /// Any [`MoveError`]; the held state is unchanged in that case.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, index: usize) -> Result<&GameState, MoveError> {
        match self.state.apply_index(index) {
            Ok(next) => {
                self.state = next;
                debug!(status = ?self.state.status(), "Move accepted");
                Ok(&self.state)
            }
            Err(e) => {
                debug!(error = %e, "Move rejected");
                Err(e)
            }
        }
    }

    /// Discards the current game and starts a new one.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> &GameState {
        info!(moves = self.state.history().len(), "Resetting game");
        self.state = GameState::reset();
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameStatus, Player};

    #[test]
    fn test_rejected_move_keeps_state() {
        let mut engine = GameEngine::new();
        engine.apply_move(4).unwrap();
        let before = engine.state().clone();
        assert!(engine.apply_move(4).is_err());
        assert!(engine.apply_move(42).is_err());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_reset_after_win() {
        let mut engine = GameEngine::new();
        for index in [0, 3, 1, 4, 2] {
            engine.apply_move(index).unwrap();
        }
        assert_eq!(engine.state().status().winner(), Some(Player::X));

        let state = engine.reset();
        assert_eq!(state, &crate::GameState::new());
        assert_eq!(state.status(), &GameStatus::InProgress);
    }
}
