//! Stateless UI rendering for tic-tac-toe.

use crate::app::{App, BoardFlash};
use crate::feedback::Feedback;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;
use tictactoe_engine::{Cell, Player, Position};

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// Screen regions, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardLayout {
    title: Rect,
    board: Rect,
    banner: Rect,
    status: Rect,
    help: Rect,
    cells: [Rect; 9],
}

impl BoardLayout {
    /// Splits the frame area into regions.
    pub fn compute(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),         // Title
                Constraint::Min(BOARD_HEIGHT), // Board
                Constraint::Length(1),         // Winner banner
                Constraint::Length(3),         // Status
                Constraint::Length(1),         // Help
            ])
            .split(area);

        let board = center_rect(chunks[1], BOARD_WIDTH, BOARD_HEIGHT);
        let cells = Position::ALL.map(|pos| {
            Rect::new(
                board.x + pos.col() as u16 * (CELL_WIDTH + 1),
                board.y + pos.row() as u16 * (CELL_HEIGHT + 1),
                CELL_WIDTH,
                CELL_HEIGHT,
            )
            .intersection(board)
        });

        Self {
            title: chunks[0],
            board,
            banner: chunks[2],
            status: chunks[3],
            help: chunks[4],
            cells,
        }
    }

    /// Screen rectangle of a cell.
    pub fn cell(&self, pos: Position) -> Rect {
        self.cells[pos.to_index()]
    }

    /// Cell containing the terminal coordinate, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<Position> {
        Position::ALL.into_iter().find(|pos| {
            let r = self.cell(*pos);
            column >= r.x && column < r.right() && row >= r.y && row < r.bottom()
        })
    }
}

/// Renders the whole screen and returns the layout used.
pub fn draw<F: Feedback>(frame: &mut Frame, app: &App<F>, now: Instant) -> BoardLayout {
    let layout = BoardLayout::compute(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, layout.title);

    draw_board(frame, &layout, app, now);

    if let Some(winner) = app.winner() {
        let banner = Paragraph::new(Line::from(vec![
            Span::raw("Winner: "),
            Span::styled(winner.to_string(), player_style(winner)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(banner, layout.banner);
    }

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout.status);

    let help = Paragraph::new("arrows/hjkl move · enter/space or 1-9 play · r reset · q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, layout.help);

    layout
}

fn draw_board<F: Feedback>(frame: &mut Frame, layout: &BoardLayout, app: &App<F>, now: Instant) {
    let grid_style = match app.board_flash(now) {
        Some(BoardFlash::GameOver) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Some(BoardFlash::ResetFade) => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        None => Style::default().fg(Color::DarkGray),
    };

    for row in 1..3u16 {
        let y = layout.board.y + row * (CELL_HEIGHT + 1) - 1;
        let sep = Rect::new(layout.board.x, y, layout.board.width, 1).intersection(layout.board);
        frame.render_widget(
            Paragraph::new("─".repeat(sep.width as usize)).style(grid_style),
            sep,
        );
    }
    for col in 1..3u16 {
        let x = layout.board.x + col * (CELL_WIDTH + 1) - 1;
        for row in 0..3u16 {
            let y = layout.board.y + row * (CELL_HEIGHT + 1);
            let sep = Rect::new(x, y, 1, CELL_HEIGHT).intersection(layout.board);
            frame.render_widget(Paragraph::new("│\n│\n│").style(grid_style), sep);
        }
    }

    let winning = app.winning_line();
    let dimmed = app.board_flash(now) == Some(BoardFlash::ResetFade);
    for pos in Position::ALL {
        let highlight = if winning.is_some_and(|line| line.contains(pos)) {
            CellHighlight::Winner
        } else if app.flashed_cell(now) == Some(pos) {
            CellHighlight::Pressed
        } else if pos == app.cursor() && !app.game().status().is_over() {
            CellHighlight::Cursor
        } else {
            CellHighlight::None
        };
        draw_cell(
            frame,
            layout.cell(pos),
            app.game().board().get(pos),
            pos,
            highlight,
            dimmed,
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellHighlight {
    None,
    Cursor,
    Pressed,
    Winner,
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    cell: Cell,
    pos: Position,
    highlight: CellHighlight,
    dimmed: bool,
) {
    let (symbol, mut style) = match cell {
        Cell::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::Occupied(player) => (player.to_string(), player_style(player)),
    };

    let background = match highlight {
        CellHighlight::None => Style::default(),
        CellHighlight::Cursor => Style::default().bg(Color::White).fg(Color::Black),
        CellHighlight::Pressed => Style::default().bg(Color::DarkGray),
        CellHighlight::Winner => Style::default().bg(Color::Green).fg(Color::Black),
    };
    style = style.patch(background);
    if dimmed {
        style = style.add_modifier(Modifier::DIM);
    }

    let text = Text::from(vec![Line::raw(""), Line::styled(symbol, style)]);
    let paragraph = Paragraph::new(text)
        .style(background)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn player_style(player: Player) -> Style {
    let color = match player {
        Player::X => Color::Blue,
        Player::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(horizontal[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timings;
    use crate::feedback::Silent;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_cells_do_not_overlap() {
        let layout = BoardLayout::compute(Rect::new(0, 0, 80, 24));
        for a in Position::ALL {
            for b in Position::ALL {
                if a != b {
                    assert!(!layout.cell(a).intersects(layout.cell(b)));
                }
            }
        }
        assert_eq!(layout.hit(0, 0), None);
    }

    #[test]
    fn test_every_cell_hits_itself() {
        let layout = BoardLayout::compute(Rect::new(0, 0, 80, 24));
        for pos in Position::ALL {
            let r = layout.cell(pos);
            assert_eq!(layout.hit(r.x, r.y), Some(pos));
            assert_eq!(layout.hit(r.right() - 1, r.bottom() - 1), Some(pos));
        }
    }

    #[test]
    fn test_renders_marks_and_status() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::new(Timings::default(), Silent);
        let now = Instant::now();
        for index in [0, 3, 1, 4, 2] {
            app.select(Position::from_index(index).unwrap(), now);
        }

        terminal
            .draw(|frame| {
                draw(frame, &app, now);
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Player X wins!"));
        assert!(text.contains("Winner: X"));
        assert!(text.contains('O'));
    }

    #[test]
    fn test_empty_cells_show_numbers() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let app = App::new(Timings::default(), Silent);
        let now = Instant::now();

        terminal
            .draw(|frame| {
                draw(frame, &app, now);
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Player X's turn"));
        for digit in '1'..='9' {
            assert!(text.contains(digit));
        }
        assert!(!text.contains("Winner"));
    }
}
