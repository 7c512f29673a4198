use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ACTION_TRAIL_CONFIG";

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$ACTION_TRAIL_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/action-trail/config.toml`
/// 4. `~/.config/action-trail/config.toml`
///
/// Falls back to the built-in defaults when no file is found. An explicit
/// path that does not exist is an error; discovered paths are only used when
/// they point at a file.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit_path {
        return load_file(path);
    }

    match find_global_config() {
        Some(path) => load_file(&path),
        None => {
            tracing::debug!("config: no file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Parse a TOML config from a string.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).context("parsing TOML config")
}

fn load_file(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML from {}", path.display()))?;
    tracing::debug!("config: loaded {}", path.display());
    Ok(config)
}

fn find_global_config() -> Option<PathBuf> {
    // $ACTION_TRAIL_CONFIG
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/action-trail/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("action-trail/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/action-trail/config.toml
    if let Some(home) = home_dir() {
        let p = home.join(".config/action-trail/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
