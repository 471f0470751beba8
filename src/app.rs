use crossterm::event::{KeyEvent, MouseEvent};

use crate::bindings;
use crate::grid::Grid;
use crate::hit::{BoardLayout, HitTester};
use crate::selection::{self, Command, Selection};

pub struct App {
    pub should_quit: bool,

    /// The symbol table; fixed for the lifetime of the app.
    pub grid: Grid,
    /// Current selection snapshot, replaced wholesale by `apply`.
    pub selection: Selection,
    /// Rendered board geometry, refreshed by the UI layer on every draw
    /// and read here when pointer events arrive.
    pub layout: BoardLayout,
    pub hit: HitTester,

    pub status: String,
}

impl App {
    pub fn new(grid: Grid, hit: HitTester) -> Self {
        Self {
            should_quit: false,
            grid,
            selection: Selection::default(),
            layout: BoardLayout::default(),
            hit,
            status: String::new(),
        }
    }

    /// Runs one command through the reducer and swaps in the new snapshot.
    pub fn apply(&mut self, command: Command) {
        self.selection = selection::apply(&self.grid, &self.selection, command);
    }

    /// Returns true when the event changed state and a redraw is due.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match bindings::command_for_key(key) {
            Some(command) => {
                self.apply(command);
                true
            }
            None => {
                tracing::debug!(code = ?key.code, "ignoring unbound key");
                false
            }
        }
    }

    /// Routes a mouse event through the hit-tester against the geometry
    /// of the last draw. Returns true when a command was applied.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        let Some(input) = bindings::pointer_for_mouse(event) else {
            return false;
        };
        match self.hit.command_for(&self.layout, input) {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }

    /// Symbol under the current selection, for the status readout.
    pub fn current_symbol(&self) -> Option<char> {
        self.grid
            .symbol_at(self.selection.row, self.selection.col)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::layout::Rect;

    use super::*;
    use crate::selection::Mode;

    fn app() -> App {
        let grid = Grid::new(vec![vec!['A', 'B'], vec!['C', 'D']]).unwrap();
        let mut app = App::new(grid, HitTester::default());
        app.layout = BoardLayout {
            rows: vec![Rect::new(0, 1, 12, 1), Rect::new(0, 2, 12, 1)],
            cols: vec![Rect::new(4, 0, 4, 1), Rect::new(8, 0, 4, 1)],
        };
        app
    }

    #[test]
    fn bound_key_applies_and_reports_dirty() {
        let mut app = app();
        let dirty = app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert!(dirty);
        assert_eq!(app.selection.row, 1);
    }

    #[test]
    fn unbound_key_is_ignored() {
        let mut app = app();
        let dirty = app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!dirty);
        assert_eq!(app.selection, Selection::default());
    }

    #[test]
    fn drag_then_release_types_the_symbol_under_the_pointer() {
        let mut app = app();
        let drag = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 9,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert!(app.handle_mouse(drag));
        assert_eq!(app.selection.mode, Mode::SelectingCol);
        assert_eq!((app.selection.row, app.selection.col), (1, 1));
        assert_eq!(app.selection.text, "");

        let release = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 9,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert!(app.handle_mouse(release));
        assert_eq!(app.selection.text, "D");
        assert_eq!(app.selection.mode, Mode::SelectingRow);
    }

    #[test]
    fn pointer_outside_the_board_changes_nothing() {
        let mut app = app();
        let hover = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 40,
            row: 20,
            modifiers: KeyModifiers::NONE,
        };
        assert!(!app.handle_mouse(hover));
        assert_eq!(app.selection, Selection::default());
    }
}
