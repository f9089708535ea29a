mod config;
mod engine;
mod error;
mod fetcher;
mod latency;
mod refresh;
mod types;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::TableState, Terminal};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::refresh::RefreshLoop;
use crate::ui::app::DashboardApp;
use crate::ui::render::render;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> io::Result<()> {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    // Logs go to stderr — the alternate screen owns stdout. Redirect 2> to capture.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_writer(io::stderr)
        .init();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.fetch_timeout_secs))
        .build()
        .expect("failed to build HTTP client");

    let mut app = DashboardApp::new(cfg.refresh_interval_secs);
    let mut refresher = RefreshLoop::new(client, cfg);

    // Initial fetch before rendering
    let (outcome, took) = refresher.run_cycle().await;
    app.apply(outcome, took);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut card_state = TableState::default();
    card_state.select(None);

    let result = run_loop(&mut terminal, &mut app, &mut refresher, &mut card_state).await;

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DashboardApp,
    refresher: &mut RefreshLoop,
    card_state: &mut TableState,
) -> io::Result<()> {
    let refresh_interval = refresher.interval();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| render(f, app, card_state))?;

        let timeout = refresh_interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            let (outcome, took) = refresher.run_cycle().await;
                            app.apply(outcome, took);
                            last_tick = Instant::now();
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            let max = app.snapshot.cards.len().saturating_sub(1);
                            let next = card_state.selected().map_or(0, |i| (i + 1).min(max));
                            card_state.select(Some(next));
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            let prev = card_state.selected().map_or(0, |i| i.saturating_sub(1));
                            card_state.select(Some(prev));
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= refresh_interval {
            let (outcome, took) = refresher.run_cycle().await;
            app.apply(outcome, took);
            last_tick = Instant::now();
        }
    }
}
