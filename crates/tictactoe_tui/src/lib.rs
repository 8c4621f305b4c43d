//! Terminal shell for the tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **Input**: key and mouse events become [`Action`]s
//! - **App**: calls the engine once per action, tracks cursor, status and animations
//! - **UI**: stateless ratatui rendering of the app
//! - **Feedback**: terminal bell pulses standing in for vibration and beeps

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod feedback;
mod input;
mod ui;

pub use app::{App, BoardFlash, status_text};
pub use cli::Cli;
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, Overrides, ShellConfig, Timings};
pub use feedback::{Cue, Feedback, Silent, TerminalBell, Tone};
pub use input::{Action, Step, action_for_key, action_for_mouse, move_cursor};
pub use ui::{BoardLayout, draw};
