//! PharmaChain TUI entry point.
//!
//! Owns the terminal, the event loop, and the async runtime glue: key
//! presses go to the domain state machine, the commands it emits come back
//! here and turn into spawned API calls whose results are applied under the
//! app lock.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use pharmachain_tui::domain::{App, ApiRequest, Command, SessionStore};
use pharmachain_tui::export::ExportError;
use pharmachain_tui::ui;
use pharmachain_tui::{export, ApiClient};

/// PharmaChain: medicine authenticity verification from the terminal
#[derive(Parser, Debug)]
#[command(name = "pharmachain")]
#[command(about = "TUI client for registering and verifying medicine batches")]
struct Args {
    /// Base URL of the PharmaChain API
    #[arg(
        short,
        long,
        default_value = "https://blockchain-drug-counterfit.vercel.app"
    )]
    endpoint: String,

    /// Path of the persisted session file
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Log file used while the terminal is in TUI mode
    #[arg(long, default_value = "pharmachain.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // When stdout is an interactive terminal the alternate screen owns it,
    // so logs go to a file through a non-blocking writer.
    let _log_guard = if io::stdout().is_terminal() {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&args.log_file)
            .with_context(|| format!("opening log file {}", args.log_file.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
            .init();
        None
    };

    let store = Arc::new(SessionStore::new(session_path(args.session_file)));
    let session = store.load().unwrap_or_else(|e| {
        tracing::warn!("ignoring unreadable session file: {e}");
        None
    });

    let client = Arc::new(ApiClient::new(&args.endpoint).context("creating API client")?);
    let app = Arc::new(Mutex::new(App::new(session)));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app, client, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Default session path under the user's home directory, falling back to
/// the working directory when HOME is unset.
fn session_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".pharmachain").join("session.json"),
        None => PathBuf::from("pharmachain-session.json"),
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    client: Arc<ApiClient>,
    store: Arc<SessionStore>,
) -> anyhow::Result<()> {
    loop {
        {
            let app_guard = app.lock().await;
            terminal.draw(|frame| {
                ui::render(frame, &app_guard);
            })?;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    let command = app.lock().await.handle_key(key.code, key.modifiers);
                    if let Some(command) = command {
                        dispatch(command, &app, &client, &store).await;
                    }
                }
            }
        }

        if app.lock().await.should_quit() {
            return Ok(());
        }
    }
}

/// Execute a command emitted by the state machine.
///
/// API requests are spawned so the draw loop never blocks on the network;
/// their results are applied under the app lock when they complete.
async fn dispatch(
    command: Command,
    app: &Arc<Mutex<App>>,
    client: &Arc<ApiClient>,
    store: &Arc<SessionStore>,
) {
    match command {
        Command::Logout => {
            app.lock().await.logout(store);
        }
        Command::ExportPdf => {
            let mut app_guard = app.lock().await;
            let result = std::env::current_dir()
                .map_err(ExportError::Io)
                .and_then(|dir| export::export_pdf(&app_guard.logs.rows, &dir));
            app_guard.apply_export(result);
        }
        Command::Request(request) => {
            let app = Arc::clone(app);
            let client = Arc::clone(client);
            let store = Arc::clone(store);
            tokio::spawn(async move {
                match request {
                    ApiRequest::RegisterAccount { role, body } => {
                        let result = client.register_account(role, &body).await;
                        app.lock().await.apply_register_account(result);
                    }
                    ApiRequest::Login { role, body } => {
                        let result = client.login(role, &body).await;
                        app.lock().await.apply_login(role, result, &store);
                    }
                    ApiRequest::RegisterMedicine { token, body } => {
                        let result = client.register_medicine(&token, &body).await;
                        app.lock().await.apply_register_medicine(result);
                    }
                    ApiRequest::VerifyMedicine { token, body } => {
                        let result = client.verify_medicine(&token, &body).await;
                        app.lock().await.apply_verify(result);
                    }
                    ApiRequest::FetchLogs { tag_id } => {
                        let result = client.fetch_logs(&tag_id).await;
                        app.lock().await.apply_fetch_logs(result);
                    }
                }
            });
        }
    }
}
