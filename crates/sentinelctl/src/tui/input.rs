//! Input - key and mouse decoding into console intents

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use sentinel_shared::selection::CloseCause;

use super::layout::{contains, modal_area};
use crate::app::{Intent, Section};

/// Decode a key press. With the overlay open, digits pick its actions
/// and most navigation keys are ignored.
pub fn decode_key(key: KeyEvent, modal_open: bool) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Intent::Quit),
        (KeyCode::Char('q'), _) => return Some(Intent::Quit),
        _ => {}
    }

    if modal_open {
        return match key.code {
            KeyCode::Esc => Some(Intent::Close(CloseCause::Cancel)),
            KeyCode::Char('x') | KeyCode::Enter => Some(Intent::Close(CloseCause::Explicit)),
            KeyCode::Char(c) => c
                .to_digit(10)
                .filter(|d| *d >= 1)
                .map(|d| Intent::ModalAction(d as usize - 1)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::Right => Some(Intent::NextSection),
        KeyCode::BackTab | KeyCode::Left => Some(Intent::PrevSection),
        KeyCode::Up | KeyCode::Char('k') => Some(Intent::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Intent::CursorDown),
        KeyCode::Enter => Some(Intent::Activate),
        KeyCode::Char('v') => Some(Intent::Verify),
        KeyCode::Char(']') => Some(Intent::NextTab),
        KeyCode::Char('[') => Some(Intent::PrevTab),
        KeyCode::Char('f') => Some(Intent::CycleFilter),
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(Section::from_index)
            .map(Intent::GoTo),
        _ => None,
    }
}

/// A left click outside the overlay dismisses it
pub fn decode_mouse(mouse: MouseEvent, frame: Rect, modal_open: bool) -> Option<Intent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left)
            if modal_open && !contains(modal_area(frame), mouse.column, mouse.row) =>
        {
            Some(Intent::Close(CloseCause::OutsideClick))
        }
        MouseEventKind::ScrollUp if !modal_open => Some(Intent::CursorUp),
        MouseEventKind::ScrollDown if !modal_open => Some(Intent::CursorDown),
        _ => None,
    }
}
