//! Command-line interface for the tic-tac-toe shell.

use crate::config::Overrides;
use clap::Parser;
use std::path::PathBuf;

/// Two-player tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Beep on moves, wins, and ties
    #[arg(long)]
    pub sound: bool,

    /// Disable bell pulses for vibration patterns
    #[arg(long)]
    pub no_haptics: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Settings given on the command line, as config overrides.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            sound: self.sound.then_some(true),
            haptics: self.no_haptics.then_some(false),
            log_file: self.log_file.clone(),
        }
    }
}
