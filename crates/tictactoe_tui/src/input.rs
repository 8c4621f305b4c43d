//! Translates terminal input into shell actions.

use crate::ui::BoardLayout;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tictactoe_engine::Position;

/// Cursor step on the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

/// Something the player asked the shell to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor.
    Cursor(Step),
    /// Play the cell under the cursor.
    SelectCursor,
    /// Play a specific cell.
    Select(Position),
    /// Start a new game.
    Reset,
    /// Leave the program.
    Quit,
}

/// Moves cursor one step, stopping at the board edge.
pub fn move_cursor(cursor: Position, step: Step) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match step {
        Step::Up => (row.saturating_sub(1), col),
        Step::Down => ((row + 1).min(2), col),
        Step::Left => (row, col.saturating_sub(1)),
        Step::Right => (row, (col + 1).min(2)),
    };
    Position::from_row_col(row, col).unwrap_or(cursor)
}

/// Maps a key press to an action.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Cursor(Step::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Cursor(Step::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Cursor(Step::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Cursor(Step::Right)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SelectCursor),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10).map(|d| d as usize - 1)?;
            Position::from_index(index).map(Action::Select)
        }
        _ => None,
    }
}

/// Maps a left click on a board cell to a selection.
pub fn action_for_mouse(mouse: MouseEvent, layout: &BoardLayout) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            layout.hit(mouse.column, mouse.row).map(Action::Select)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cursor_moves_within_grid() {
        assert_eq!(move_cursor(Position::Center, Step::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, Step::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::TopLeft, Step::Down), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::BottomCenter, Step::Right), Position::BottomRight);
    }

    #[test]
    fn test_cursor_clamps_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, Step::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, Step::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, Step::Down), Position::BottomRight);
        assert_eq!(move_cursor(Position::BottomRight, Step::Right), Position::BottomRight);
    }

    #[test]
    fn test_digits_select_cells() {
        assert_eq!(
            action_for_key(press(KeyCode::Char('1'))),
            Some(Action::Select(Position::TopLeft))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('9'))),
            Some(Action::Select(Position::BottomRight))
        );
        assert_eq!(action_for_key(press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(action_for_key(press(KeyCode::Enter)), Some(Action::SelectCursor));
        assert_eq!(action_for_key(press(KeyCode::Char(' '))), Some(Action::SelectCursor));
        assert_eq!(action_for_key(press(KeyCode::Char('R'))), Some(Action::Reset));
        assert_eq!(action_for_key(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_click_selects_cell_under_pointer() {
        let layout = BoardLayout::compute(Rect::new(0, 0, 80, 24));
        let center = layout.cell(Position::Center);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: center.x + 1,
            row: center.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            action_for_mouse(click, &layout),
            Some(Action::Select(Position::Center))
        );

        let outside = MouseEvent {
            column: 0,
            row: 0,
            ..click
        };
        assert_eq!(action_for_mouse(outside, &layout), None);

        let right_click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..click
        };
        assert_eq!(action_for_mouse(right_click, &layout), None);
    }
}
