// ============================================================================
// Chartboard - Dashboard financier en terminal
// ============================================================================
// Charge quatre jeux de données (camembert, barres, ligne, chandeliers)
// depuis le backend et les affiche dans une grille 2×2.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : render → input → update, sans jamais bloquer sur le réseau
// 3. Async dans sync : le runtime tokio fait tourner le chargement à côté
// 4. Drop : le loader annule la requête si on quitte avant la fin
// ============================================================================

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use chartboard::api::{Client, DashboardLoader};
use chartboard::app::App;
use chartboard::config::Config;
use chartboard::ui::events::EventHandler;
use chartboard::ui::render;
use chartboard::ui::tooltip::TooltipOptions;

// ============================================================================
// Logging
// ============================================================================

/// Répertoire des logs : <data_local_dir>/chartboard/logs, sinon ./logs
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("chartboard").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// Le TUI occupe stdout : tout passe par un fichier à rotation quotidienne.
///
/// ```bash
/// tail -f ~/.local/share/chartboard/logs/chartboard.log.*
/// RUST_LOG=chartboard=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "chartboard.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true) // utile pour suivre la tâche de chargement
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chartboard=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialized");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("Chartboard starting up");

    let config = Config::from_env().context("Configuration invalide")?;
    info!(
        api_url = %config.api_base_url,
        timeout = ?config.request_timeout,
        date_offset = config.candle_date_offset_days,
        "Configuration loaded"
    );

    let client = Client::new(&config)?;
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;

    // Le chargement démarre avant le premier rendu : l'écran "Loading" s'affiche aussitôt
    let mut loader = DashboardLoader::spawn(runtime.handle(), client);

    let mut app = App::with_tooltip_options(TooltipOptions {
        candle_date_offset_days: config.candle_date_offset_days,
    });

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &mut loader);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Annule la requête si elle est encore en vol
    drop(loader);

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event loop
// ============================================================================

/// Boucle principale : résultat du loader → rendu → clavier
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    loader: &mut DashboardLoader,
) -> Result<()> {
    while app.is_running() {
        // 0. RÉSULTAT : non bloquant, une seule transition possible
        if app.load_state.is_loading() {
            if let Some(state) = loader.poll() {
                if app.apply_load_result(state) {
                    info!(ready = app.load_state.data().is_some(), "Dashboard load finished");
                }
            }
        }

        // 1. RENDER
        terminal.draw(|frame| render(frame, app))?;

        // 2. INPUT (timeout = cadence de la boucle)
        let event = events.next().context("Échec de la lecture du clavier")?;
        app.handle_event(&event);
    }

    Ok(())
}

// ============================================================================
// Terminal
// ============================================================================

/// Configure le terminal en mode TUI (raw mode + alternate screen)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Échec de la création du terminal")
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
