use ratatui::layout::Rect;

use crate::selection::Command;

/// Where the board landed on screen, as of the last draw. The UI is the
/// collaborator behind this trait; it must answer with current geometry,
/// not a stale frame's.
pub trait BoardGeometry {
    fn row_count(&self) -> usize;
    fn col_count(&self) -> usize;
    /// Vertical extent of rendered row `row`, full board width.
    fn row_rect(&self, row: usize) -> Option<Rect>;
    /// Horizontal extent of column `col`, taken from the header cells;
    /// columns share extents across all rows.
    fn col_rect(&self, col: usize) -> Option<Rect>;
}

/// Geometry snapshot refreshed by `ui::draw` on every frame.
#[derive(Debug, Clone, Default)]
pub struct BoardLayout {
    pub rows: Vec<Rect>,
    pub cols: Vec<Rect>,
}

impl BoardGeometry for BoardLayout {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_count(&self) -> usize {
        self.cols.len()
    }

    fn row_rect(&self, row: usize) -> Option<Rect> {
        self.rows.get(row).copied()
    }

    fn col_rect(&self, col: usize) -> Option<Rect> {
        self.cols.get(col).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
}

/// A pointer/touch sample in terminal cells.
#[derive(Debug, Clone, Copy)]
pub struct PointerInput {
    pub x: u16,
    pub y: u16,
    pub phase: PointerPhase,
}

/// Vertical slack granted below each row's nominal band, for coarse
/// pointing. A UX tunable, not a correctness knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSlack {
    /// One row height, the reference magnitude.
    OneRowHeight,
    Cells(u16),
}

impl Default for RowSlack {
    fn default() -> Self {
        Self::OneRowHeight
    }
}

/// Maps pointer samples to selection commands against the rendered board.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitTester {
    slack: RowSlack,
}

impl HitTester {
    pub fn new(slack: RowSlack) -> Self {
        Self { slack }
    }

    /// Resolves one pointer sample. Both a row and a column band hit:
    /// jump to the cell, committing only on release so a drag previews.
    /// Row band only (the row-selection strip): pick the row and stay in
    /// row phase. Neither: nothing.
    pub fn command_for(
        &self,
        geometry: &impl BoardGeometry,
        input: PointerInput,
    ) -> Option<Command> {
        let row = self.row_at(geometry, input.y)?;
        match col_at(geometry, input.x) {
            Some(col) => Some(Command::JumpTo {
                row,
                col,
                confirm: input.phase == PointerPhase::Release,
            }),
            None => Some(Command::JumpToRow { row }),
        }
    }

    /// Rows are scanned in display order and the last match wins, so a
    /// row's nominal band always beats the slack of the row above it;
    /// slack decides only coordinates past the last matching band.
    fn row_at(&self, geometry: &impl BoardGeometry, y: u16) -> Option<usize> {
        let mut found = None;
        for row in 0..geometry.row_count() {
            let Some(rect) = geometry.row_rect(row) else {
                continue;
            };
            let slack = match self.slack {
                RowSlack::OneRowHeight => rect.height,
                RowSlack::Cells(cells) => cells,
            };
            let bottom = rect
                .y
                .saturating_add(rect.height)
                .saturating_add(slack);
            if y >= rect.y && y < bottom {
                found = Some(row);
            }
        }
        found
    }
}

fn col_at(geometry: &impl BoardGeometry, x: u16) -> Option<usize> {
    (0..geometry.col_count()).find(|&col| {
        geometry
            .col_rect(col)
            .is_some_and(|rect| x >= rect.x && x < rect.x.saturating_add(rect.width))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two rows of height 1 at y=5 and y=6, spanning x=[0, 20); two columns
    // of width 4 at x=4 and x=8, leaving x=[0, 4) as the row strip.
    fn layout() -> BoardLayout {
        BoardLayout {
            rows: vec![Rect::new(0, 5, 20, 1), Rect::new(0, 6, 20, 1)],
            cols: vec![Rect::new(4, 4, 4, 1), Rect::new(8, 4, 4, 1)],
        }
    }

    fn moved(x: u16, y: u16) -> PointerInput {
        PointerInput {
            x,
            y,
            phase: PointerPhase::Move,
        }
    }

    #[test]
    fn cell_hit_previews_on_move() {
        let tester = HitTester::default();
        assert_eq!(
            tester.command_for(&layout(), moved(9, 6)),
            Some(Command::JumpTo {
                row: 1,
                col: 1,
                confirm: false,
            })
        );
    }

    #[test]
    fn cell_hit_commits_on_release() {
        let tester = HitTester::default();
        let input = PointerInput {
            x: 5,
            y: 5,
            phase: PointerPhase::Release,
        };
        assert_eq!(
            tester.command_for(&layout(), input),
            Some(Command::JumpTo {
                row: 0,
                col: 0,
                confirm: true,
            })
        );
    }

    #[test]
    fn press_previews_like_a_move() {
        let tester = HitTester::default();
        let input = PointerInput {
            x: 5,
            y: 5,
            phase: PointerPhase::Press,
        };
        assert_eq!(
            tester.command_for(&layout(), input),
            Some(Command::JumpTo {
                row: 0,
                col: 0,
                confirm: false,
            })
        );
    }

    #[test]
    fn row_strip_hit_picks_the_row_only() {
        let tester = HitTester::default();
        assert_eq!(
            tester.command_for(&layout(), moved(1, 6)),
            Some(Command::JumpToRow { row: 1 })
        );
    }

    #[test]
    fn nominal_band_beats_the_slack_of_the_row_above() {
        // y=6 sits in row 0's slack window and row 1's nominal band.
        let tester = HitTester::default();
        assert_eq!(
            tester.command_for(&layout(), moved(5, 6)),
            Some(Command::JumpTo {
                row: 1,
                col: 0,
                confirm: false,
            })
        );
    }

    #[test]
    fn overshoot_below_the_last_row_still_registers() {
        let tester = HitTester::default();
        // One row height past the bottom row.
        assert_eq!(
            tester.command_for(&layout(), moved(5, 7)),
            Some(Command::JumpTo {
                row: 1,
                col: 0,
                confirm: false,
            })
        );
        // Past the slack: nothing.
        assert_eq!(tester.command_for(&layout(), moved(5, 8)), None);
    }

    #[test]
    fn slack_override_widens_the_overshoot_window() {
        let tester = HitTester::new(RowSlack::Cells(3));
        assert_eq!(
            tester.command_for(&layout(), moved(5, 9)),
            Some(Command::JumpTo {
                row: 1,
                col: 0,
                confirm: false,
            })
        );
        assert_eq!(tester.command_for(&layout(), moved(5, 10)), None);
    }

    #[test]
    fn zero_slack_keeps_only_nominal_bands() {
        let tester = HitTester::new(RowSlack::Cells(0));
        assert_eq!(tester.command_for(&layout(), moved(5, 7)), None);
        assert!(tester.command_for(&layout(), moved(5, 6)).is_some());
    }

    #[test]
    fn miss_above_the_board_yields_nothing() {
        let tester = HitTester::default();
        assert_eq!(tester.command_for(&layout(), moved(5, 4)), None);
    }

    #[test]
    fn empty_layout_yields_nothing() {
        let tester = HitTester::default();
        assert_eq!(
            tester.command_for(&BoardLayout::default(), moved(5, 5)),
            None
        );
    }

    #[test]
    fn gap_between_columns_counts_as_row_only() {
        let mut layout = layout();
        // Separate the columns by a one-cell gap.
        layout.cols = vec![Rect::new(4, 4, 3, 1), Rect::new(8, 4, 3, 1)];
        let tester = HitTester::default();
        assert_eq!(
            tester.command_for(&layout, moved(7, 5)),
            Some(Command::JumpToRow { row: 0 })
        );
    }
}
