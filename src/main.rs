use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miette::IntoDiagnostic;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use autoblitz::config::AppConfig;
use autoblitz::core::logging;
use autoblitz::tui::app::AppState;
use autoblitz::tui::services::Services;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let config = AppConfig::load();

    // Initialize logging (file only; stdout belongs to the terminal UI)
    let _log_guard = logging::init_tui(&config.log_dir());
    log::info!("AutoBlitz v{} starting", autoblitz::VERSION);

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config, event_tx)?;

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture).into_diagnostic()?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    // Run the app
    let mut app = AppState::new(event_rx, services);
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture).into_diagnostic()?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    if let Err(e) = &result {
        log::error!("Event loop failed: {e}");
    }
    log::info!("AutoBlitz shutting down");
    result.into_diagnostic()
}
