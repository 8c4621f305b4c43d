//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are kept apart from board
//! storage so the transition function and the invariant checks share them.

pub mod draw;
pub mod win;

pub use draw::{is_full, is_tie};
pub use win::{WIN_LINES, WinLine, check_winner};
