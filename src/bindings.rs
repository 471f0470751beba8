use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::hit::{PointerInput, PointerPhase};
use crate::selection::Command;

/// One physical key, one command. Modifier chords stay unbound; anything
/// unrecognized is the caller's to log and drop.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Up => Some(Command::MoveUp),
        KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Char(' ') => Some(Command::Confirm),
        KeyCode::Enter => Some(Command::FinishWord),
        KeyCode::Backspace => Some(Command::Backspace),
        _ => None,
    }
}

/// Reduces a raw mouse event to a pointer sample for the hit-tester.
/// Left-button presses, drags, and releases carry the gesture; plain
/// movement previews like a drag. Scrolls and other buttons are dropped.
pub fn pointer_for_mouse(event: MouseEvent) -> Option<PointerInput> {
    let phase = match event.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerPhase::Press,
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerPhase::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerPhase::Release,
        _ => return None,
    };
    Some(PointerInput {
        x: event.column,
        y: event.row,
        phase,
    })
}
