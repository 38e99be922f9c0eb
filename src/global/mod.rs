//! Per-user locations for HireFlow's config file and database.

use anyhow::{anyhow, Result};
use std::path::PathBuf;

const APP_DIR: &str = "hireflow";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "hireflow.db";

/// `<config_dir>/hireflow`, e.g. `~/.config/hireflow` on Linux.
pub fn config_dir() -> Result<PathBuf> {
    under(dirs::config_dir(), "config")
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// `<data_dir>/hireflow`, falling back to `~/.local/share/hireflow`.
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().or_else(|| {
        dirs::home_dir().map(|home| home.join(".local").join("share"))
    });
    under(base, "data")
}

/// Default database location when `[database] path` is unset.
pub fn db_file() -> Result<PathBuf> {
    Ok(data_dir()?.join(DB_FILE))
}

fn under(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    base.map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| anyhow!("Unable to determine {} directory", kind))
}
