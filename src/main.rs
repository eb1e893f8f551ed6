//! A terminal home page: a hero with a search prompt above a feed of threads,
//! with scroll snapping between the two.
//!
//! Run with a feed file (`RFC3339 | author | title` per line) or without one
//! for the built-in demo feed.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    home::HomeFocus,
    state::{AppState, Route},
};
use crate::config::AppConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::feed::{self, Thread};
use crate::core::store::{MemoryScrollStore, SessionStore};
use crate::ui::{
    home::HomeView, layout::AppLayout, search::SearchView, spinner::SnapIndicator, theme::Theme,
    thread::ThreadView,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal home page with hero/feed scroll snapping")]
struct Cli {
    /// Feed file, one `timestamp | author | title` per line.
    feed: Option<PathBuf>,

    /// Frame interval in milliseconds (overrides the config file).
    #[arg(long = "frame-ms")]
    frame_ms: Option<u64>,

    /// Scroll freely without snapping between hero and feed.
    #[arg(long = "no-snap")]
    no_snap: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,

    /// Save the effective configuration to the config path and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

fn load_threads(path: Option<&PathBuf>) -> Result<Vec<Thread>> {
    match path {
        Some(path) => {
            let threads = feed::load_feed(path)
                .with_context(|| format!("loading feed {}", path.display()))?;
            info!(path = %path.display(), threads = threads.len(), "feed loaded");
            Ok(threads)
        }
        None => Ok(feed::demo_feed(Utc::now())),
    }
}

fn draw(frame: &mut ratatui::Frame<'_>, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    let today = state.today();

    match &state.route {
        Route::Home => {
            if let Some(home) = &state.home {
                frame.render_widget(
                    HomeView {
                        layout: &home.layout,
                        scroll_top: home.scroll_top(),
                        animator: home.coordinator.animator(),
                        now: home.coordinator.now(),
                        threads: &state.threads,
                        selected: home.selected,
                        input: &home.input,
                        input_focused: home.focus == HomeFocus::Prompt,
                        today,
                    },
                    layout.body_area,
                );
            }
        }
        Route::Search {
            handoff,
            results,
            selected,
        } => {
            let matches: Vec<&Thread> = results
                .iter()
                .filter_map(|&i| state.threads.get(i))
                .collect();
            frame.render_widget(
                SearchView {
                    handoff,
                    results: &matches,
                    selected: *selected,
                    now: today,
                },
                layout.body_area,
            );
        }
        Route::Thread(index) => {
            if let Some(thread) = state.threads.get(*index) {
                frame.render_widget(ThreadView { thread, now: today }, layout.body_area);
            }
        }
    }

    let hint = match state.route {
        Route::Home => state.config.status_bar_hint(),
        Route::Search { .. } => "↑/↓: select | Enter: open | Esc: home".to_string(),
        Route::Thread(_) => "Esc: back to home | q: quit".to_string(),
    };
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    frame.render_widget(
        SnapIndicator {
            visible: state.is_snapping(),
            tick: state.frame,
        },
        layout.body_area,
    );
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = AppConfig::load();
    if let Some(frame_ms) = cli.frame_ms {
        config.frame_ms = frame_ms.clamp(10, 100);
    }
    if cli.no_snap {
        config.snap = false;
    }

    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }
    if cli.write_config {
        let path = config.save().context("saving config")?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let threads = load_threads(cli.feed.as_ref())?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let mut state = AppState::new(
        threads,
        config,
        clock,
        Arc::new(MemoryScrollStore::new()),
        Arc::new(SessionStore::new()),
        Rect::new(0, 0, size.width, size.height),
    );
    info!(threads = state.threads.len(), frame_ms = state.config.frame_ms, "home page started");

    let mut events = spawn_event_reader(Duration::from_millis(state.config.frame_ms));

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &state))?;

        tokio::select! {
            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => state.resize(w, h),
                    AppEvent::Tick => state.tick(),
                }
            }
            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    if let Some(mut home) = state.home.take() {
        home.leave(false);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}
