use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

mod action;
mod app;
mod backend;
mod config_file;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use quizforge_core::gateway::{GeminiBackend, MockBackend};
use quizforge_core::{AiBackend, Document};

use app::App;
use model::run::today_stamp;

/// QuizForge TUI — turn study documents into quizzes with a terminal interface.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Documents to load into the library on startup
    documents: Vec<PathBuf>,

    /// Gemini API key (overrides GEMINI_API_KEY and the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// Explicit config file path (skips the default cascade)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model used for question generation
    #[arg(long)]
    question_model: Option<String>,

    /// Model used for cover illustrations
    #[arg(long)]
    image_model: Option<String>,

    /// Run against a scripted sample backend, no API calls
    #[arg(long)]
    offline: bool,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,
}

/// Route log output to a daily file under the platform cache dir; the
/// terminal belongs to the TUI. Returns the guard that flushes on drop.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::cache_dir()?.join("quizforge");
    std::fs::create_dir_all(&log_dir).ok()?;
    let appender = tracing_appender::rolling::daily(log_dir, "quizforge.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_logging();

    // Validate any document paths provided on the command line
    for path in &args.documents {
        if !path.exists() {
            anyhow::bail!("document not found: {}", path.display());
        }
        if !quizforge_ingest::is_supported_path(path) {
            anyhow::bail!("unsupported document type: {}", path.display());
        }
    }

    // Resolve settings: config file, then env vars, then CLI flags on top
    let file_cfg = config_file::load_config_from(args.config.as_deref());
    let mut settings = model::settings::SettingsState::default();
    config_file::apply_to_settings(&file_cfg, &mut settings);

    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            settings.api_key = key;
        }
    }
    if let Some(key) = args.api_key {
        settings.api_key = key;
    }
    if let Some(model) = args.question_model {
        settings.question_model = model;
    }
    if let Some(model) = args.image_model {
        settings.image_model = model;
    }
    if let Some(name) = args.theme {
        settings.theme_name = name;
    }

    let theme = theme::Theme::from_name(&settings.theme_name);

    // Build library entries for startup documents; ingest runs once the
    // backend channel is up
    let mut initial_docs = Vec::new();
    let mut startup_files = Vec::new();
    for path in args.documents {
        let kind = match quizforge_ingest::detect_kind(&path) {
            Ok(kind) => kind,
            Err(_) => continue,
        };
        let name = quizforge_ingest::display_name(&path);
        let doc = Document::pending(name, kind, today_stamp());
        startup_files.push((doc.id.clone(), path));
        initial_docs.push(doc);
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(initial_docs, theme);
    let max_mb = settings.max_document_mb;
    app.settings = settings;

    // Set up backend command channel
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    let cancel = CancellationToken::new();

    app.backend_cmd_tx = Some(cmd_tx);

    if !startup_files.is_empty() {
        if let Some(tx) = &app.backend_cmd_tx {
            let _ = tx.send(tui_event::BackendCommand::IngestFiles {
                files: startup_files,
                max_mb,
            });
        }
    }

    // Spawn backend command listener
    let event_tx_for_backend = event_tx.clone();
    let cancel_for_backend = cancel.clone();
    let offline = args.offline;
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                tui_event::BackendCommand::IngestFiles { files, max_mb } => {
                    let tx = event_tx_for_backend.clone();
                    tokio::spawn(async move {
                        backend::run_ingest(files, max_mb, tx).await;
                    });
                }
                tui_event::BackendCommand::GenerateSession {
                    document,
                    params,
                    config,
                } => {
                    let provider: Arc<dyn AiBackend> = if offline {
                        Arc::new(MockBackend::offline())
                    } else {
                        Arc::new(GeminiBackend::from_config(&config))
                    };
                    let tx = event_tx_for_backend.clone();
                    let cancel = cancel_for_backend.clone();
                    // Spawn generation as a separate task so we keep receiving commands
                    tokio::spawn(async move {
                        backend::run_generation(provider, document, params, config, tx, cancel)
                            .await;
                    });
                }
            }
        }
    });

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            // Backend events (non-blocking drain)
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let action = input::map_event(&evt, &app.input_mode);
                        app.update(action);
                    }
                }
            } => {}
        }

        // Process tick
        app.update(action::Action::Tick);

        if app.should_quit {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    Ok(())
}
