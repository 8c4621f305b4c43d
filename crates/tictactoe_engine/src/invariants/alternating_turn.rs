//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{GameState, Player};
use super::Invariant;

/// Invariant: Players alternate turns, X first.
///
/// While the game is in progress the player to move is the one after the
/// last mover. Once it is over, the last mover stays current.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let history = state.history();

        let alternates = history
            .iter()
            .enumerate()
            .all(|(i, mov)| mov.player == if i % 2 == 0 { Player::X } else { Player::O });
        if !alternates {
            return false;
        }

        let expected = match history.last() {
            None => Player::X,
            Some(last) if state.status().is_over() => last.player,
            Some(last) => last.player.opponent(),
        };
        state.current_player() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Position};

    #[test]
    fn test_new_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let state = GameState::replay(&[0, 4, 2, 6, 8]).unwrap();
        assert!(AlternatingTurnInvariant::holds(&state));
        assert_eq!(state.current_player(), Player::O);
    }

    #[test]
    fn test_finished_game_holds() {
        let state = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert!(AlternatingTurnInvariant::holds(&state));
    }

    #[test]
    fn test_same_player_twice_violates() {
        let mut state = GameState::replay(&[0]).unwrap();
        state.history.push(Move::new(Player::X, Position::Center));
        assert!(!AlternatingTurnInvariant::holds(&state));
    }
}
