//! usrform-manager binary entry point.
//!
//! Parses options, opens the storage file, initializes the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use usrform_manager::app::{self, AppState, AppStore, Keymap, Theme};
use usrform_manager::cli::{Cli, init_tracing};
use usrform_manager::error::Result;
use usrform_manager::storage::FileStore;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: load state, run the TUI, and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), &cli.log_level)?;

    let paths = cli.paths();
    tracing::info!(storage = %paths.storage.display(), config = %paths.config_dir.display(), "starting");
    let storage = FileStore::open(&paths.storage)?;
    let store = AppStore::initialize(Box::new(storage))?;
    let theme = Theme::load_or_init(&paths.theme);
    let keymap = Keymap::load_or_init(&paths.keybinds);
    let state = AppState::new(store, theme, keymap);

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %format!("{err:#}"), "application error");
        eprintln!("application error: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}
