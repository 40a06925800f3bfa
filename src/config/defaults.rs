//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Master switches
pub const DEFAULT_ENABLED: bool = true;
pub const DEFAULT_GLOBAL_SHORTCUTS_ENABLED: bool = true;
pub const DEFAULT_CONFLICT_DETECTION: bool = true;

/// Scheme considered loaded before any other is chosen
pub const DEFAULT_SCHEME_ID: &str = "default";

/// Directory (under the home directory) holding config and logs
pub const CONFIG_DIR_NAME: &str = ".shortcut-engine";
pub const CONFIG_FILE_NAME: &str = "config.json";
