//! Apidex explorer - terminal UI for browsing and trying gateway endpoints.
//!
//! This is the entry point for the `apidex` binary.

mod app;
mod client;
mod runner;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use app::{App, PendingRequest};
use client::GatewayClient;
use runner::RunnerEvent;

/// Apidex explorer - terminal UI for browsing and trying gateway endpoints.
#[derive(Parser, Debug)]
#[command(name = "apidex")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Gateway URL.
    #[arg(long, env = "APIDEX_GATEWAY", default_value = "http://localhost:8080")]
    gateway: String,

    /// How long the splash stays up after the catalog loads, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    splash_ms: u64,

    /// Enable debug logging.
    #[arg(long, default_value = "false")]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.debug {
        tracing_subscriber::fmt()
            .with_env_filter("apidex_cli=debug,warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let client = GatewayClient::new(&args.gateway);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client, Duration::from_millis(args.splash_ms));

    let result = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let (result_tx, mut result_rx) = mpsc::channel::<RunnerEvent>(32);

    // Draw the splash before the catalog request goes out
    terminal.draw(|f| ui::render(f, app))?;
    app.load_catalog().await;

    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::render(f, app))?;

        tokio::select! {
            () = tokio::time::sleep(Duration::from_millis(100)) => {
                while event::poll(Duration::from_millis(0)).unwrap_or(false) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if let Some(request) = handle_key(app, key) {
                            start_request(app, request, &result_tx);
                        }
                    }
                }
            }

            Some(event) = result_rx.recv() => {
                app.handle_result(event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn start_request(app: &App, request: PendingRequest, tx: &mpsc::Sender<RunnerEvent>) {
    tracing::debug!(url = %request.url, generation = request.generation, "Starting request");
    runner::spawn(
        app.client().clone(),
        request.url,
        request.alt,
        request.generation,
        tx.clone(),
    );
}

/// Handle a key press. Returns a request to start, if any.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<PendingRequest> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }

    // Keys are ignored until the splash is gone
    if app.splash {
        return None;
    }

    if app.modal.is_some() {
        handle_modal_key(app, key.code)
    } else {
        handle_directory_key(app, key.code)
    }
}

fn handle_directory_key(app: &mut App, code: KeyCode) -> Option<PendingRequest> {
    match code {
        KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Up => {
            app.select_prev();
            None
        }
        KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Enter => {
            app.clear_error();
            app.open_selected()
        }
        KeyCode::Backspace => {
            app.search_pop();
            None
        }
        KeyCode::Char(c) => {
            app.search_push(c);
            None
        }
        _ => None,
    }
}

fn handle_modal_key(app: &mut App, code: KeyCode) -> Option<PendingRequest> {
    match code {
        KeyCode::Esc => {
            app.close_modal();
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next_field();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_prev_field();
            None
        }
        KeyCode::Enter => app.submit_form(),
        KeyCode::Backspace => {
            app.field_pop();
            None
        }
        KeyCode::Char(c) => {
            app.field_push(c);
            None
        }
        _ => None,
    }
}
