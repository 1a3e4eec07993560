use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::square::Direction;

/// Maps a key to the direction it requests, if any.
///
/// Space drops, Down rotates, Left and Right move sideways.
pub fn key_to_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char(' ') => Some(Direction::Drop),
        KeyCode::Down => Some(Direction::Rotate),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

pub fn should_quit(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
}
