//! Invocation bookkeeping. Read-only from the outside; only the dispatch
//! success path records usage.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, Default)]
pub struct UsageTracker {
    counts: HashMap<String, u64>,
    last_used: HashMap<String, DateTime<Utc>>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, shortcut_id: &str, at: DateTime<Utc>) {
        *self.counts.entry(shortcut_id.to_string()).or_insert(0) += 1;
        self.last_used.insert(shortcut_id.to_string(), at);
    }

    pub fn count(&self, shortcut_id: &str) -> u64 {
        self.counts.get(shortcut_id).copied().unwrap_or(0)
    }

    pub fn last_used(&self, shortcut_id: &str) -> Option<DateTime<Utc>> {
        self.last_used.get(shortcut_id).copied()
    }

    pub fn counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    pub fn last_used_map(&self) -> &HashMap<String, DateTime<Utc>> {
        &self.last_used
    }
}

/// Snapshot returned by `ShortcutEngine::stats`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutStats {
    pub total: usize,
    pub enabled: usize,
    pub global: usize,
    pub customized: usize,
    /// Conflicting pairs among the enabled shortcuts right now.
    pub conflicts: usize,
    pub usage: HashMap<String, u64>,
    pub last_used: HashMap<String, DateTime<Utc>>,
}
