use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{Receiver, Sender};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{backend::CrosstermBackend, prelude::*};
use tracing_subscriber::EnvFilter;

mod app;
mod bindings;
mod grid;
mod hit;
mod selection;
mod ui;

use app::App;
use grid::Grid;
use hit::{HitTester, RowSlack};

#[derive(Parser, Debug)]
#[command(author, version, about = "Row-then-column grid typing board")]
struct Args {
    /// Path to a custom symbol layout (one row of symbols per line)
    #[arg(long, value_name = "PATH")]
    layout: Option<PathBuf>,

    /// Vertical touch slack below each row, in terminal cells
    /// (defaults to one row height)
    #[arg(long, value_name = "CELLS")]
    touch_slack: Option<u16>,

    /// Append diagnostics to this file (level via RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn init_logging(path: &PathBuf) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_grid(args: &Args) -> Result<Grid> {
    match &args.layout {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read layout {}", path.display()))?;
            Grid::from_lines(&text)
                .with_context(|| format!("invalid layout {}", path.display()))
        }
        None => Ok(Grid::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let grid = load_grid(&args)?;
    let slack = match args.touch_slack {
        Some(cells) => RowSlack::Cells(cells),
        None => RowSlack::OneRowHeight,
    };

    let mut terminal = setup_terminal()?;

    // Input worker: blocks on the terminal so the main loop never has to.
    let (event_tx, event_rx) = crossbeam_channel::unbounded::<Event>();
    std::thread::spawn(move || forward_input(event_tx));

    let mut app = App::new(grid, HitTester::new(slack));
    app.status =
        "Arrows move | Space pick | Enter finish word | Backspace delete | Esc quit".into();

    let tick_rate = Duration::from_millis(100);
    let res = run_app(&mut terminal, &mut app, &event_rx, tick_rate);

    restore_terminal(terminal)?;
    if let Err(e) = res {
        eprintln!("Error: {e:?}");
    }
    Ok(())
}

fn forward_input(tx: Sender<Event>) {
    loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(err) => {
                tracing::error!(%err, "input read failed");
                break;
            }
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &Receiver<Event>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    // Redraw only when state changes or on tick
    let mut dirty = true;
    loop {
        let tick_due = last_tick.elapsed() >= tick_rate;
        if dirty || tick_due {
            terminal.draw(|f| ui::draw(f, app))?;
            dirty = false;
            if tick_due {
                last_tick = Instant::now();
            }
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));

        match event_rx.recv_timeout(timeout) {
            Ok(Event::Key(key)) => {
                let quit = key.code == KeyCode::Esc
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    app.should_quit = true;
                } else {
                    dirty = app.handle_key(key);
                }
            }
            Ok(Event::Mouse(mouse)) => {
                dirty = app.handle_mouse(mouse);
            }
            Ok(Event::Resize(..)) => {
                dirty = true;
            }
            Ok(_) => {}
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                // Input thread died; nothing more will arrive.
                return Ok(());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
