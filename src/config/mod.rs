//! Configuration module - engine tunables and their persistence helpers
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - `EngineConfig` definition
//! - `loader` - File system loading and saving

mod defaults;
mod loader;
mod types;

pub use defaults::DEFAULT_SCHEME_ID;
pub use types::EngineConfig;

pub use loader::{default_config_path, load_config, save_config};
pub(crate) use loader::config_dir;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
