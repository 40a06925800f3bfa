//! Configuration type definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::shortcuts::{KeyCombination, ShortcutContext};

/// Process-wide engine tunables.
///
/// The engine never writes this to disk itself; hosts persist the snapshot
/// from `ShortcutEngine::config()` and hand it back via `apply_config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Master switch for dispatch (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Whether global-flagged shortcuts are handed to the OS layer (default: true)
    #[serde(default = "default_global_shortcuts_enabled")]
    pub global_shortcuts_enabled: bool,
    /// Refuse customizations that collide with enabled shortcuts (default: true)
    #[serde(default = "default_conflict_detection")]
    pub conflict_detection: bool,
    /// Id of the loaded scheme (default: "default")
    #[serde(default = "default_current_scheme")]
    pub current_scheme: String,
    /// Per-shortcut combinations that survive scheme switches
    #[serde(default)]
    pub customizations: BTreeMap<String, KeyCombination>,
    /// Shortcut ids kept disabled across registrations
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Presentation ranking of contexts, most specific first. Not consulted
    /// by dispatch.
    #[serde(default = "default_context_priority")]
    pub context_priority: Vec<ShortcutContext>,
}

fn default_enabled() -> bool {
    DEFAULT_ENABLED
}
fn default_global_shortcuts_enabled() -> bool {
    DEFAULT_GLOBAL_SHORTCUTS_ENABLED
}
fn default_conflict_detection() -> bool {
    DEFAULT_CONFLICT_DETECTION
}
fn default_current_scheme() -> String {
    DEFAULT_SCHEME_ID.to_string()
}
fn default_context_priority() -> Vec<ShortcutContext> {
    ShortcutContext::default_priority()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            enabled: DEFAULT_ENABLED,
            global_shortcuts_enabled: DEFAULT_GLOBAL_SHORTCUTS_ENABLED,
            conflict_detection: DEFAULT_CONFLICT_DETECTION,
            current_scheme: default_current_scheme(),
            customizations: BTreeMap::new(),
            disabled: Vec::new(),
            context_priority: default_context_priority(),
        }
    }
}

impl EngineConfig {
    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled.iter().any(|d| d == id)
    }

    /// Add or remove `id` from the disabled list, keeping it duplicate-free.
    pub fn set_disabled(&mut self, id: &str, disabled: bool) {
        if disabled {
            if !self.is_disabled(id) {
                self.disabled.push(id.to_string());
            }
        } else {
            self.disabled.retain(|d| d != id);
        }
    }

    pub fn customization(&self, id: &str) -> Option<&KeyCombination> {
        self.customizations.get(id)
    }

    /// Rank of a context in `context_priority`; unknown contexts sort last.
    pub fn context_rank(&self, context: &ShortcutContext) -> usize {
        self.context_priority
            .iter()
            .position(|c| c == context)
            .unwrap_or(self.context_priority.len())
    }
}
