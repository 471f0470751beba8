use std::cmp::min;

use crate::grid::Grid;

/// Which half of the two-stage pick is live: vertical movement locks in a
/// row, then horizontal movement locks in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SelectingRow,
    SelectingCol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Confirm,
    Backspace,
    FinishWord,
    /// Pointer jump to a cell; `confirm` commits the symbol (pointer
    /// release), otherwise the cell is previewed in column phase.
    JumpTo {
        row: usize,
        col: usize,
        confirm: bool,
    },
    /// Pointer jump that picks a row without entering column phase.
    JumpToRow { row: usize },
}

/// Snapshot of the widget's selection. Replaced wholesale on every command;
/// a reader never observes a half-applied transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub mode: Mode,
    pub row: usize,
    pub col: usize,
    pub text: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            mode: Mode::SelectingRow,
            row: 0,
            col: 0,
            text: String::new(),
        }
    }
}

/// Applies one command and returns the next snapshot. Total over the whole
/// command vocabulary: out-of-range movement clamps, everything else that
/// does not fit the current mode is ignored.
pub fn apply(grid: &Grid, state: &Selection, command: Command) -> Selection {
    let mut next = state.clone();
    match command {
        Command::Backspace => {
            next.text.pop();
        }
        Command::FinishWord => {
            // Separator only after at least one symbol, so words never
            // start with a space.
            if !next.text.is_empty() {
                next.text.push(' ');
            }
            next.row = 0;
            next.col = 0;
            next.mode = Mode::SelectingRow;
        }
        Command::JumpTo { row, col, confirm } => {
            let row = clamp_row(grid, row);
            let col = clamp_col(grid, col);
            if confirm {
                enter_symbol(grid, &mut next, row, col);
            } else {
                next.mode = Mode::SelectingCol;
                next.row = row;
                next.col = col;
            }
        }
        Command::JumpToRow { row } => {
            next.mode = Mode::SelectingRow;
            next.row = clamp_row(grid, row);
            next.col = 0;
        }
        command => match state.mode {
            Mode::SelectingRow => step_row_phase(grid, &mut next, command),
            Mode::SelectingCol => step_col_phase(grid, &mut next, command),
        },
    }
    next
}

fn step_row_phase(grid: &Grid, next: &mut Selection, command: Command) {
    match command {
        Command::MoveUp => next.row = next.row.saturating_sub(1),
        Command::MoveDown => next.row = clamp_row(grid, next.row + 1),
        // Column stays at its last value until the row is locked in.
        Command::Confirm => next.mode = Mode::SelectingCol,
        _ => {}
    }
}

fn step_col_phase(grid: &Grid, next: &mut Selection, command: Command) {
    match command {
        Command::MoveLeft => next.col = next.col.saturating_sub(1),
        Command::MoveRight => next.col = clamp_col(grid, next.col + 1),
        Command::MoveUp | Command::MoveDown => {
            // A direction change abandons the column pick; the vertical
            // step itself is swallowed.
            next.mode = Mode::SelectingRow;
            next.col = 0;
        }
        Command::Confirm => {
            let (row, col) = (next.row, next.col);
            enter_symbol(grid, next, row, col);
        }
        _ => {}
    }
}

fn enter_symbol(grid: &Grid, next: &mut Selection, row: usize, col: usize) {
    let symbol = match grid.symbol_at(row, col) {
        Ok(symbol) => symbol,
        // Indices are clamped before every lookup.
        Err(err) => unreachable!("confirmed cell out of bounds: {err}"),
    };
    next.text.push(symbol);
    next.row = 0;
    next.col = 0;
    next.mode = Mode::SelectingRow;
}

fn clamp_row(grid: &Grid, row: usize) -> usize {
    min(row, grid.row_count() - 1)
}

fn clamp_col(grid: &Grid, col: usize) -> usize {
    min(col, grid.col_count() - 1)
}
