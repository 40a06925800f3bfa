//! Shortcut Engine - keyboard-shortcut registry and dispatch
//!
//! Registers, matches, customizes and invokes keyboard shortcuts with
//! context-scoped activation, conflict detection, swappable schemes and an
//! interactive combination recorder.

pub mod config;
pub mod error;
pub mod logging;
pub mod shortcuts;

pub use config::EngineConfig;
pub use error::{Result, ShortcutError};
pub use shortcuts::{
    KeyCombination, KeyEvent, Modifier, Shortcut, ShortcutAction, ShortcutContext, ShortcutEngine,
    ShortcutEvent,
};
