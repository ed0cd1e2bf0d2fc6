//! Config file locations and the shared `key = value` line format.
//!
//! `theme.conf` and `keybinds.conf` both use one assignment per line, `#`
//! comments and blank lines ignored.
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "usrform-manager";
pub const STORAGE_FILE_NAME: &str = "local_storage.json";

/// Resolve the directory holding config files.
///
/// Order: explicit override, `$XDG_CONFIG_HOME/usrform-manager`,
/// `$HOME/.config/usrform-manager`, then the current directory.
pub fn config_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR_NAME);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config").join(APP_DIR_NAME);
    }
    PathBuf::from(".")
}

pub fn config_file_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

pub fn default_storage_path(dir: &Path) -> PathBuf {
    dir.join(STORAGE_FILE_NAME)
}

/// Write `contents` to `path`, creating the parent directory first.
pub fn write_config(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, contents)
}

/// Iterate the non-empty `key = value` pairs of a config file.
pub fn parse_kv(contents: &str) -> impl Iterator<Item = (&str, &str)> {
    contents.lines().filter_map(|raw| {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (lhs, rhs) = line.split_once('=')?;
        let (lhs, rhs) = (lhs.trim(), rhs.trim());
        if lhs.is_empty() || rhs.is_empty() { None } else { Some((lhs, rhs)) }
    })
}
