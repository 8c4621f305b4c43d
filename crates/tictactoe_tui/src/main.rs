//! Tic-tac-toe in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tictactoe_tui::{
    App, BoardLayout, Cli, ShellConfig, TerminalBell, action_for_key, action_for_mouse, draw,
};
use tracing::{error, info, instrument};

/// How often the loop wakes to advance animations.
const TICK: Duration = Duration::from_millis(25);

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ShellConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.overrides());

    init_tracing(config.log_file())?;
    info!(?config, "Starting tic-tac-toe");

    let mut terminal = setup_terminal().context("Failed to set up terminal")?;
    let result = run(&mut terminal, &config);
    if let Err(e) = &result {
        error!(error = %e, "Game loop failed");
    }
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    info!("Goodbye");
    result
}

/// Sends logs to a file so they don't draw over the board.
fn init_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .and_then(|_| Terminal::new(CrosstermBackend::new(stdout)));
    match terminal {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            // Half-entered setup still has to hand the terminal back.
            if let Err(undo) = leave_screen(&mut io::stdout()).and_then(|_| disable_raw_mode()) {
                error!(error = %undo, "Failed to undo terminal setup");
            }
            Err(e).context("Failed to enter alternate screen")
        }
    }
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    leave_screen(terminal.backend_mut())?;
    terminal.show_cursor()?;
    Ok(())
}

/// Draw, wait for input or the next tick, dispatch, repeat.
#[instrument(skip_all)]
fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: &ShellConfig) -> Result<()> {
    let bell = TerminalBell::new(io::stdout(), *config.sound(), *config.haptics());
    let mut app = App::new(config.timings(), bell);
    let mut layout = BoardLayout::default();

    while !app.should_quit() {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| layout = draw(frame, &app, now))?;

        if !event::poll(TICK)? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => action_for_key(key),
            Event::Mouse(mouse) => action_for_mouse(mouse, &layout),
            _ => None,
        };
        if let Some(action) = action {
            app.handle(action, Instant::now());
        }
    }

    Ok(())
}
