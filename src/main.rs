// Token Manager
// TUI application for inspecting design tokens and driving plugin settings

// IMPORTS ------------------>>

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use token_manager::core::{App, AppConfig, WorkspaceConfig};
use token_manager::host::{log_outbound, HostNotifier};
use token_manager::ui::run_app;

//--------------------------------------------------------<<

// ┌──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                                 MAIN ENTRY POINT                                                 │
// └──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┘

fn main() -> Result<()> {
    let config = AppConfig::default();
    let workspace_root = App::detect_workspace_root(&config.workspace_config_name)?;

    // Logs go to a file so they do not corrupt the terminal
    let log_path = WorkspaceConfig::load_from_workspace(&workspace_root, &config.workspace_config_name)
        .map(|workspace| workspace.log_path(&workspace_root, &config.default_log_file))
        .unwrap_or_else(|_| workspace_root.join(&config.default_log_file));
    init_logging(&log_path)?;

    // Host messages are drained on a background task
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let (host, rx) = HostNotifier::channel();
    let outbound = runtime.spawn(log_outbound(rx));

    let mut app = App::new(host)?;
    info!(
        workspace = %app.workspace_root.display(),
        sets = app.store.sets().len(),
        active = app.store.active_set(),
        "workspace loaded"
    );

    // Announce the initial settings to the host
    app.settings.trigger_window_change();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Dropping the app closes the host channel
    drop(app);
    let delivered = runtime.block_on(outbound).context("Host message task failed")?;
    info!(delivered, "host channel closed");

    result
}

/// Install the tracing subscriber writing to `path`
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("token_manager=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
