//! Keyboard shortcut registry and dispatch engine.
//!
//! This module provides:
//! - A canonical key-combination codec
//! - A registry of shortcuts, categories and schemes
//! - Conflict detection between enabled shortcuts
//! - Binding lifecycle (local table vs. external global layer)
//! - Context-aware dispatch with at-most-one action per event
//! - An interactive key-combination recorder
//! - Usage statistics
//!
//! # Example
//!
//! ```ignore
//! use shortcut_engine::shortcuts::{KeyCombination, KeyEvent, Modifier, Shortcut, ShortcutAction, ShortcutEngine};
//!
//! let mut engine = ShortcutEngine::default();
//! engine.register(
//!     Shortcut::new("save", "Save", KeyCombination::parse("ctrl+s")?)
//!         .with_context("editor")
//!         .with_action(ShortcutAction::infallible(|| println!("saved"))),
//! )?;
//! engine.set_context("editor");
//! let outcome = engine.dispatch(&KeyEvent::down("s").with_modifier(Modifier::Ctrl));
//! assert!(outcome.should_prevent_default());
//! ```

mod action;
mod binding;
mod conflict;
mod context;
mod engine;
mod events;
mod provider;
mod recorder;
mod registry;
mod scheme;
mod stats;
mod types;



pub use action::{ActionExecutor, ShortcutAction};
pub use binding::BindingState;
pub use conflict::{context_overlap, ConflictSeverity, ShortcutConflict};
pub use context::ShortcutContext;
pub use engine::{DispatchOutcome, ShortcutEngine};
pub use events::ShortcutEvent;
pub use provider::{ShortcutProvider, StaticProvider};
pub use recorder::{RecorderState, RecorderStep, RecordingReceiver};
pub use registry::{Category, Shortcut};
pub use scheme::ShortcutScheme;
pub use stats::ShortcutStats;
pub use types::{
    extract_modifiers, is_modifier_key, normalize_key, KeyCombination, KeyEvent, KeyEventKind,
    Modifier, Platform, ShortcutParseError,
};
