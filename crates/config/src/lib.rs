pub mod schema;
pub mod watcher;

pub use schema::{
    BarConfig, BarSection, GlobalConfig, Position, ProgressbarConfig, ThemeConfig, WidgetConfig,
};
pub use watcher::ConfigWatcher;

use pbar_core::{BarError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `BarConfig::default()` if
/// the file doesn't exist so the bar always has something to draw.
pub fn load(path: impl AsRef<Path>) -> Result<BarConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(BarConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| BarError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<BarConfig> {
    toml::from_str(raw).map_err(|e| BarError::Config(format!("TOML parse error: {e}")))
}

/// Return the config path: `$PBAR_CONFIG` if set, otherwise
/// `$XDG_CONFIG_HOME/pbar/pbar.toml`.
pub fn default_path() -> PathBuf {
    if let Ok(path) = std::env::var("PBAR_CONFIG") {
        return PathBuf::from(path);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("pbar").join("pbar.toml")
}
