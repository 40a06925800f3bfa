//! Configuration loading from and saving to the file system.
//!
//! The engine itself never touches disk; these helpers are what a host uses
//! to persist `EngineConfig` snapshots between runs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use super::types::EngineConfig;
use crate::error::{Result, ShortcutError};

/// Get the default config path (~/.shortcut-engine/config.json)
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

pub(crate) fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(CONFIG_DIR_NAME))
}

/// Load configuration from a JSON file.
///
/// Returns `EngineConfig::default()` if the file is missing or unreadable.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> EngineConfig {
    if !path.exists() {
        info!("Config file not found, using defaults");
        return EngineConfig::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Failed to read config file, using defaults");
            return EngineConfig::default();
        }
    };

    match serde_json::from_str::<EngineConfig>(&content) {
        Ok(config) => {
            info!(
                customizations = config.customizations.len(),
                disabled = config.disabled.len(),
                scheme = %config.current_scheme,
                "Loaded shortcut config"
            );
            config
        }
        Err(e) => {
            warn!(error = %e, "Failed to parse config JSON, using defaults");
            EngineConfig::default()
        }
    }
}

/// Save configuration as pretty JSON, creating parent directories.
pub fn save_config(path: &Path, config: &EngineConfig) -> Result<()> {
    let io_err = |source| ShortcutError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content).map_err(io_err)?;
    Ok(())
}
