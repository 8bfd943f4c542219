//! recite configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Top-level recite configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReciteConfig {
    /// Roster file (`name,score` per line).
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Append-only audit log.
    #[serde(default = "default_audit_log")]
    pub audit_log: PathBuf,
    /// Directory score sheets are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Names flashed before a pick is revealed.
    #[serde(default = "default_roll_count")]
    pub roll_count: u32,
    /// Delay between flashed names in milliseconds.
    #[serde(default = "default_roll_delay")]
    pub roll_delay_ms: u64,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("class_data.txt")
}
fn default_audit_log() -> PathBuf {
    PathBuf::from("audit_log.txt")
}
fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_roll_count() -> u32 {
    10
}
fn default_roll_delay() -> u64 {
    100
}

impl Default for ReciteConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            audit_log: default_audit_log(),
            export_dir: default_export_dir(),
            roll_count: default_roll_count(),
            roll_delay_ms: default_roll_delay(),
        }
    }
}

/// Name of the config file looked up in the current directory.
pub const LOCAL_CONFIG: &str = "recite.toml";

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `recite.toml` in the current directory
/// 2. `~/.config/recite/config.toml`
///
/// Environment variable overrides: `RECITE_DATA_FILE`, `RECITE_AUDIT_LOG`,
/// `RECITE_EXPORT_DIR`.
pub fn load_config() -> Result<ReciteConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ReciteConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            return Err(RosterError::Config(format!(
                "config file not found: {}",
                p.display()
            )));
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("using config {}", path.display());
            let content =
                std::fs::read_to_string(&path).map_err(|e| RosterError::storage(&path, e))?;
            parse_config(&content).map_err(|e| {
                RosterError::Config(format!("failed to parse {}: {e}", path.display()))
            })?
        }
        None => ReciteConfig::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> std::result::Result<ReciteConfig, toml::de::Error> {
    toml::from_str(content)
}

fn apply_env_overrides(config: &mut ReciteConfig) {
    if let Ok(path) = std::env::var("RECITE_DATA_FILE") {
        config.data_file = PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("RECITE_AUDIT_LOG") {
        config.audit_log = PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("RECITE_EXPORT_DIR") {
        config.export_dir = PathBuf::from(path);
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("recite"))
}
