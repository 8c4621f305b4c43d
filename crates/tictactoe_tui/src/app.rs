//! Application state and logic.
//!
//! The app owns the engine and everything the screen needs that the engine
//! does not track: cursor, status line, live animations. It calls the engine
//! once per input and turns the result into cues and display state.

use crate::config::Timings;
use crate::feedback::{Cue, Feedback};
use crate::input::{Action, move_cursor};
use std::time::Instant;
use tictactoe_engine::{GameEngine, GameState, GameStatus, Player, Position, WinLine};
use tracing::{debug, info, instrument};

/// Whole-board animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardFlash {
    /// The game just ended.
    GameOver,
    /// The board was just cleared.
    ResetFade,
}

/// An animation that ends at `until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flash<T> {
    target: T,
    until: Instant,
}

impl<T: Copy> Flash<T> {
    fn live(&self, now: Instant) -> Option<T> {
        (now < self.until).then_some(self.target)
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App<F> {
    engine: GameEngine,
    cursor: Position,
    status_message: String,
    cell_flash: Option<Flash<Position>>,
    board_flash: Option<Flash<BoardFlash>>,
    timings: Timings,
    feedback: F,
    should_quit: bool,
}

impl<F: Feedback> App<F> {
    /// Creates a new application with a fresh game.
    pub fn new(timings: Timings, feedback: F) -> Self {
        let engine = GameEngine::new();
        let status_message = status_text(engine.state());
        Self {
            engine,
            cursor: Position::Center,
            status_message,
            cell_flash: None,
            board_flash: None,
            timings,
            feedback,
            should_quit: false,
        }
    }

    /// Gets the current game.
    pub fn game(&self) -> &GameState {
        self.engine.state()
    }

    /// Cell under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// The winner, for the banner.
    pub fn winner(&self) -> Option<Player> {
        self.game().status().winner()
    }

    /// The completed line to highlight.
    pub fn winning_line(&self) -> Option<WinLine> {
        match self.game().status() {
            GameStatus::Won { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Cell whose placement animation is still running.
    pub fn flashed_cell(&self, now: Instant) -> Option<Position> {
        self.cell_flash.and_then(|f| f.live(now))
    }

    /// Board animation still running.
    pub fn board_flash(&self, now: Instant) -> Option<BoardFlash> {
        self.board_flash.and_then(|f| f.live(now))
    }

    /// Returns true once the player asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The feedback sink.
    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    /// Dispatches one input action.
    #[instrument(skip(self, now))]
    pub fn handle(&mut self, action: Action, now: Instant) {
        match action {
            Action::Cursor(step) => self.cursor = move_cursor(self.cursor, step),
            Action::SelectCursor => {
                self.select(self.cursor, now);
            }
            Action::Select(pos) => {
                self.cursor = pos;
                self.select(pos, now);
            }
            Action::Reset => self.reset(now),
            Action::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
        }
    }

    /// Plays the current player's mark at `pos`.
    ///
    /// Returns false when the engine rejects the move; nothing visible
    /// changes in that case.
    #[instrument(skip(self, now))]
    pub fn select(&mut self, pos: Position, now: Instant) -> bool {
        let status = match self.engine.apply_move(pos.to_index()) {
            Ok(state) => *state.status(),
            Err(e) => {
                debug!(error = %e, "Ignoring rejected selection");
                return false;
            }
        };

        self.feedback.cue(Cue::Move, now);
        self.cell_flash = Some(Flash {
            target: pos,
            until: now + self.timings.move_flash,
        });

        match status {
            GameStatus::InProgress => {}
            GameStatus::Won { player, .. } => {
                info!(winner = %player, "Game won");
                self.feedback.cue(Cue::Win, now);
                self.game_over(now);
            }
            GameStatus::Tied => {
                info!("Game tied");
                self.feedback.cue(Cue::Tie, now);
                self.game_over(now);
            }
        }

        self.status_message = status_text(self.engine.state());
        true
    }

    /// Restarts the game.
    #[instrument(skip(self, now))]
    pub fn reset(&mut self, now: Instant) {
        debug!("Restarting game");
        let state = self.engine.reset();
        self.status_message = status_text(state);
        self.cell_flash = None;
        self.board_flash = Some(Flash {
            target: BoardFlash::ResetFade,
            until: now + self.timings.reset_fade,
        });
        self.feedback.cue(Cue::Reset, now);
    }

    /// Expires finished animations and lets feedback catch up.
    pub fn tick(&mut self, now: Instant) {
        if self.cell_flash.is_some_and(|f| f.live(now).is_none()) {
            self.cell_flash = None;
        }
        if self.board_flash.is_some_and(|f| f.live(now).is_none()) {
            self.board_flash = None;
        }
        self.feedback.tick(now);
    }

    fn game_over(&mut self, now: Instant) {
        self.board_flash = Some(Flash {
            target: BoardFlash::GameOver,
            until: now + self.timings.game_over_flash,
        });
    }
}

/// Status line for a game state.
pub fn status_text(state: &GameState) -> String {
    match state.status() {
        GameStatus::InProgress => format!("Player {}'s turn", state.current_player()),
        GameStatus::Won { player, .. } => format!("Player {} wins! 🎉", player),
        GameStatus::Tied => "It's a tie! 🤝".to_string(),
    }
}
