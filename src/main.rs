use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

mod app;
mod error;
mod model;
mod storage;
mod ui;

use app::App;

const TICK_RATE: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let mut app = App::load()?;

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let (_, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    app.handle_resize(rows);

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, app))?;

        let now = Instant::now();
        let timeout = app
            .next_timer_due()
            .map(|due| due.saturating_duration_since(now).min(TICK_RATE))
            .unwrap_or(TICK_RATE);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Resize(_, rows) => app.handle_resize(rows),
                _ => {}
            }
        }

        app.fire_due_timers(Instant::now());
    }
}
