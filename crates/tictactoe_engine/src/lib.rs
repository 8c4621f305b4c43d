//! Tic-tac-toe game engine.
//!
//! Pure value-in/value-out game logic. A [`GameState`] is transformed by
//! [`GameState::apply_move`] into a new state, or the move is rejected with a
//! [`MoveError`] and the original state is left untouched. [`GameEngine`]
//! wraps a single state for callers that want a stateful handle.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameEngine, GameStatus, Player};
//!
//! let mut engine = GameEngine::new();
//! for index in [0, 3, 1, 4, 2] {
//!     engine.apply_move(index).unwrap();
//! }
//! assert!(matches!(engine.state().status(), GameStatus::Won { player: Player::X, .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod game;
mod invariants;
mod position;
mod rules;
mod types;

pub use action::{Move, MoveError};
pub use engine::GameEngine;
pub use invariants::{
    AlternatingTurnInvariant, GameInvariants, Invariant, InvariantSet, InvariantViolation,
    MonotonicBoardInvariant, StatusConsistentInvariant,
};
pub use position::Position;
pub use rules::{WIN_LINES, WinLine, check_winner, is_full, is_tie};
pub use types::{Board, Cell, GameState, GameStatus, Player};
