//! Command-line options and logging setup.
//!
//! The TUI owns the terminal, so tracing output only goes to a file and is
//! disabled when no `--log-file` is given.
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::app::config;
use crate::error::{Context, Result};

#[derive(Parser, Debug, Clone)]
#[command(name = "usrform-manager", version, about = "TUI form to manage locally stored user accounts")]
pub struct Cli {
    /// Storage file holding the persisted user list
    #[arg(long, env = "USRFORM_STORAGE")]
    pub storage: Option<PathBuf>,

    /// Directory with theme.conf and keybinds.conf
    #[arg(long, env = "USRFORM_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Append tracing output to this file
    #[arg(long, env = "USRFORM_LOG")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `usrform_manager=debug`
    #[arg(long, default_value = "info", env = "USRFORM_LOG_LEVEL")]
    pub log_level: String,
}

/// Paths the application reads and writes, resolved from [`Cli`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paths {
    pub config_dir: PathBuf,
    pub storage: PathBuf,
    pub theme: PathBuf,
    pub keybinds: PathBuf,
}

impl Cli {
    pub fn paths(&self) -> Paths {
        let config_dir = config::config_dir(self.config_dir.as_deref());
        let storage = self
            .storage
            .clone()
            .unwrap_or_else(|| config::default_storage_path(&config_dir));
        Paths {
            theme: config::config_file_path(&config_dir, "theme.conf"),
            keybinds: config::config_file_path(&config_dir, "keybinds.conf"),
            storage,
            config_dir,
        }
    }
}

/// Install a file-backed tracing subscriber. Does nothing without a log file.
pub fn init_tracing(log_file: Option<&Path>, level: &str) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()?;
    Ok(())
}
