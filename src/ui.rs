use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::hit::BoardLayout;
use crate::selection::Mode;

/// Width of the row-selection strip on the left edge of the board. It sits
/// inside every row's band but outside every column's, so a coarse pointer
/// can pick rows without touching a cell.
const ROW_STRIP_WIDTH: u16 = 3;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_board(f, chunks[0], app);
    draw_text(f, chunks[1], app);
    draw_status(f, chunks[2], app);
}

fn draw_board(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default().borders(Borders::ALL).title("Board");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = app.grid.row_count() as u16;
    let cols = app.grid.col_count() as u16;

    // Header line + one line per row, strip + at least one cell per column.
    if inner.height < rows + 1 || inner.width < ROW_STRIP_WIDTH + cols {
        // Stale geometry must not outlive the board it described.
        app.layout = BoardLayout::default();
        let p = Paragraph::new("Window too small for the board");
        f.render_widget(p, inner);
        return;
    }

    let cell_width = ((inner.width - ROW_STRIP_WIDTH) / cols).max(1);
    let sel = &app.selection;

    let mut layout = BoardLayout::default();

    // Header cells define the column extents shared by every row.
    for col in 0..app.grid.col_count() {
        let rect = Rect::new(
            inner.x + ROW_STRIP_WIDTH + col as u16 * cell_width,
            inner.y,
            cell_width,
            1,
        );
        let mut style = Style::default().fg(Color::DarkGray);
        if sel.mode == Mode::SelectingCol && col == sel.col {
            style = Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
        }
        let marker = ((col + 1) % 10).to_string();
        f.render_widget(
            Paragraph::new(marker)
                .style(style)
                .alignment(Alignment::Center),
            rect,
        );
        layout.cols.push(rect);
    }

    for row in 0..app.grid.row_count() {
        let y = inner.y + 1 + row as u16;
        let row_selected = row == sel.row;

        // The full-width band is what the hit-tester sees for this row.
        layout.rows.push(Rect::new(inner.x, y, inner.width, 1));

        let strip = Rect::new(inner.x, y, ROW_STRIP_WIDTH, 1);
        let strip_marker = if row_selected { "▶" } else { " " };
        f.render_widget(
            Paragraph::new(strip_marker).style(Style::default().fg(Color::Yellow)),
            strip,
        );

        for (col, &symbol) in app.grid.row_symbols(row).iter().enumerate() {
            let rect = Rect::new(
                inner.x + ROW_STRIP_WIDTH + col as u16 * cell_width,
                y,
                cell_width,
                1,
            );
            let style = match sel.mode {
                Mode::SelectingRow if row_selected => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                Mode::SelectingCol if row_selected && col == sel.col => {
                    Style::default().bg(Color::Blue).fg(Color::Black)
                }
                Mode::SelectingCol if row_selected => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                _ => Style::default(),
            };
            f.render_widget(
                Paragraph::new(symbol.to_string())
                    .style(style)
                    .alignment(Alignment::Center),
                rect,
            );
        }
    }

    app.layout = layout;
}

fn draw_text(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Text");
    let p = Paragraph::new(format!("{}_", app.selection.text))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let mode = match app.selection.mode {
        Mode::SelectingRow => "ROW",
        Mode::SelectingCol => "COL",
    };
    let cursor = app
        .current_symbol()
        .map(|symbol| {
            format!(
                " row={} col={} '{}'",
                app.selection.row, app.selection.col, symbol
            )
        })
        .unwrap_or_default();
    let text = Line::from(vec![
        Span::styled(
            format!("[{mode}]"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(cursor),
        Span::raw(" | "),
        Span::raw(&app.status),
    ]);
    f.render_widget(Paragraph::new(text), area);
}
