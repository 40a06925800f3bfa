//! Activation contexts.
//!
//! A context is the named scope that is current at dispatch time. Exactly one
//! context is current; switching is a flat replace, there is no stack.
//!
//! `ShortcutContext::Global` matches in every context. It is unrelated to a
//! shortcut's `global` flag, which concerns OS-level delivery.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Open string enumeration of activation contexts.
///
/// Equality, hashing and ordering go by name, so `Custom("editor")` is the
/// same context as `Editor`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShortcutContext {
    Global,
    #[default]
    Main,
    Editor,
    Modal,
    Search,
    Settings,
    Custom(String),
}

impl ShortcutContext {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Global => "global",
            Self::Main => "main",
            Self::Editor => "editor",
            Self::Modal => "modal",
            Self::Search => "search",
            Self::Settings => "settings",
            Self::Custom(name) => name,
        }
    }

    pub fn is_global(&self) -> bool {
        self.as_str() == Self::Global.as_str()
    }

    /// Whether a shortcut scoped to `self` is live while `current` is active.
    pub fn is_active_in(&self, current: &ShortcutContext) -> bool {
        self.is_global() || self == current
    }

    /// Default presentation order, most specific first.
    pub fn default_priority() -> Vec<ShortcutContext> {
        vec![
            Self::Modal,
            Self::Search,
            Self::Settings,
            Self::Editor,
            Self::Main,
            Self::Global,
        ]
    }
}

impl PartialEq for ShortcutContext {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ShortcutContext {}

impl Hash for ShortcutContext {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for ShortcutContext {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ShortcutContext {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl From<&str> for ShortcutContext {
    fn from(name: &str) -> Self {
        match name {
            "global" => Self::Global,
            "main" => Self::Main,
            "editor" => Self::Editor,
            "modal" => Self::Modal,
            "search" => Self::Search,
            "settings" => Self::Settings,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for ShortcutContext {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ShortcutContext> for String {
    fn from(context: ShortcutContext) -> Self {
        context.as_str().to_string()
    }
}

impl fmt::Display for ShortcutContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
