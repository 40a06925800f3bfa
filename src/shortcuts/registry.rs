//! Deterministic shortcut registry with Vec storage.
//!
//! Uses Vec for registration-order iteration and HashMap for O(1) lookup.
//! The registry owns the authoritative copy of every shortcut, category and
//! scheme; callers only ever get shared references or clones.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::action::ShortcutAction;
use super::conflict::{self, ShortcutConflict};
use super::context::ShortcutContext;
use super::scheme::ShortcutScheme;
use super::types::KeyCombination;
use crate::error::{Result, ShortcutError};

/// The unit of registration.
#[derive(Clone, Debug)]
pub struct Shortcut {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub combination: KeyCombination,
    pub action: ShortcutAction,
    pub context: ShortcutContext,
    pub enabled: bool,
    /// Intended to fire while the application is not focused.
    pub global: bool,
    /// Tie-break hint for presentation; never enforced during dispatch.
    pub priority: Option<i32>,
    pub tags: Vec<String>,
}

impl Shortcut {
    pub fn new(id: impl Into<String>, name: impl Into<String>, combination: KeyCombination) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: None,
            combination,
            action: ShortcutAction::noop(),
            context: ShortcutContext::Main,
            enabled: true,
            global: false,
            priority: None,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_action(mut self, action: ShortcutAction) -> Self {
        self.action = action;
        self
    }

    pub fn with_context(mut self, context: impl Into<ShortcutContext>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Mark for OS-level delivery while the app is unfocused.
    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    fn matches_query(&self, query: &str) -> bool {
        self.id.to_lowercase().contains(query)
            || self.name.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(query))
    }
}

/// Presentation grouping for shortcuts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            order: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

/// Central table of shortcuts, categories and schemes.
#[derive(Default)]
pub struct ShortcutRegistry {
    shortcuts: Vec<Shortcut>,
    id_to_index: HashMap<String, usize>,
    categories: Vec<Category>,
    schemes: BTreeMap<String, ShortcutScheme>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shortcut: Shortcut) -> Result<()> {
        if self.id_to_index.contains_key(&shortcut.id) {
            warn!(shortcut_id = %shortcut.id, "Shortcut id already registered");
            return Err(ShortcutError::DuplicateId(shortcut.id));
        }
        self.id_to_index
            .insert(shortcut.id.clone(), self.shortcuts.len());
        self.shortcuts.push(shortcut);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<Shortcut> {
        let index = self.id_to_index.remove(id)?;
        let removed = self.shortcuts.remove(index);
        for later in &self.shortcuts[index..] {
            if let Some(i) = self.id_to_index.get_mut(&later.id) {
                *i -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&Shortcut> {
        self.id_to_index.get(id).and_then(|&i| self.shortcuts.get(i))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Position in registration order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// Replace the live combination, returning the previous one.
    pub fn set_combination(&mut self, id: &str, combination: KeyCombination) -> Option<KeyCombination> {
        let index = *self.id_to_index.get(id)?;
        let shortcut = &mut self.shortcuts[index];
        Some(std::mem::replace(&mut shortcut.combination, combination))
    }

    /// Set the enabled flag, returning the previous value.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Option<bool> {
        let index = *self.id_to_index.get(id)?;
        let shortcut = &mut self.shortcuts[index];
        Some(std::mem::replace(&mut shortcut.enabled, enabled))
    }

    /// All shortcuts in registration order.
    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn by_category(&self, category: &str) -> Vec<&Shortcut> {
        self.shortcuts
            .iter()
            .filter(|s| s.category.as_deref() == Some(category))
            .collect()
    }

    pub fn by_context(&self, context: &ShortcutContext) -> Vec<&Shortcut> {
        self.shortcuts
            .iter()
            .filter(|s| s.context == *context)
            .collect()
    }

    /// Case-insensitive substring search over id, name, description and tags.
    pub fn search(&self, query: &str) -> Vec<&Shortcut> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.shortcuts.iter().collect();
        }
        self.shortcuts
            .iter()
            .filter(|s| s.matches_query(&query))
            .collect()
    }

    pub fn find_conflicts(
        &self,
        combination: &KeyCombination,
        context: &ShortcutContext,
        exclude_id: Option<&str>,
    ) -> Vec<ShortcutConflict> {
        conflict::find_conflicts(&self.shortcuts, combination, context, exclude_id)
    }

    pub fn all_conflicts(&self) -> Vec<ShortcutConflict> {
        conflict::pairwise_conflicts(&self.shortcuts)
    }

    /// Insert or replace a category.
    pub fn add_category(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    /// Categories ordered by `order` (unordered ones last, by insertion).
    pub fn categories(&self) -> Vec<&Category> {
        let mut sorted: Vec<&Category> = self.categories.iter().collect();
        sorted.sort_by_key(|c| c.order.unwrap_or(i32::MAX));
        sorted
    }

    pub fn insert_scheme(&mut self, scheme: ShortcutScheme) -> Option<ShortcutScheme> {
        self.schemes.insert(scheme.id.clone(), scheme)
    }

    pub fn scheme(&self, id: &str) -> Option<&ShortcutScheme> {
        self.schemes.get(id)
    }

    pub fn remove_scheme(&mut self, id: &str) -> Option<ShortcutScheme> {
        self.schemes.remove(id)
    }

    pub fn schemes(&self) -> impl Iterator<Item = &ShortcutScheme> {
        self.schemes.values()
    }
}
