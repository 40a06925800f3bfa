//! Binding lifecycle: attaches shortcuts to the local matching table or
//! announces them to the external global-shortcut layer.
//!
//! Rebinding is always unbind-then-bind. Removal uses the key recorded when
//! the shortcut was bound, never the shortcut's current combination, so no
//! entry is left dangling after a customization.

use std::collections::HashMap;

use tracing::debug;

use super::events::{EventBus, ShortcutEvent};
use super::registry::Shortcut;

/// Where a shortcut's combination is currently attached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BindingState {
    #[default]
    Unbound,
    /// Present in the local table under this binding key.
    Local { binding_key: String },
    /// A `bind-global` intent was emitted with this label.
    Global { label: String },
}

#[derive(Default)]
pub struct BindingManager {
    states: HashMap<String, BindingState>,
    /// binding key -> shortcut ids bound under it, in bind order
    local: HashMap<String, Vec<String>>,
}

impl BindingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `shortcut`, replacing any binding it already has.
    pub fn bind(&mut self, shortcut: &Shortcut, global_enabled: bool, events: &mut EventBus) -> BindingState {
        self.unbind(&shortcut.id, events);

        let binding_key = shortcut.combination.binding_key();
        let state = if shortcut.global && global_enabled {
            events.emit(ShortcutEvent::BindGlobal {
                shortcut: shortcut.clone(),
                label: binding_key.clone(),
            });
            BindingState::Global { label: binding_key }
        } else {
            self.local
                .entry(binding_key.clone())
                .or_default()
                .push(shortcut.id.clone());
            BindingState::Local { binding_key }
        };

        debug!(
            event_type = "shortcut_bound",
            shortcut_id = %shortcut.id,
            state = ?state,
            "Shortcut bound"
        );
        self.states.insert(shortcut.id.clone(), state.clone());
        state
    }

    /// Detach `shortcut_id` from wherever it is bound. No-op when unbound.
    pub fn unbind(&mut self, shortcut_id: &str, events: &mut EventBus) {
        match self.states.remove(shortcut_id) {
            Some(BindingState::Local { binding_key }) => {
                if let Some(ids) = self.local.get_mut(&binding_key) {
                    ids.retain(|id| id != shortcut_id);
                    if ids.is_empty() {
                        self.local.remove(&binding_key);
                    }
                }
                debug!(shortcut_id, binding_key = %binding_key, "Local binding removed");
            }
            Some(BindingState::Global { label }) => {
                events.emit(ShortcutEvent::UnbindGlobal {
                    id: shortcut_id.to_string(),
                    label: label.clone(),
                });
                debug!(shortcut_id, label = %label, "Global binding released");
            }
            Some(BindingState::Unbound) | None => {}
        }
    }

    pub fn state(&self, shortcut_id: &str) -> BindingState {
        self.states.get(shortcut_id).cloned().unwrap_or_default()
    }

    pub fn is_bound(&self, shortcut_id: &str) -> bool {
        self.states.contains_key(shortcut_id)
    }

    /// Ids bound locally under `binding_key`.
    pub fn local_candidates(&self, binding_key: &str) -> &[String] {
        self.local
            .get(binding_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[cfg(test)]
    pub fn local_count(&self) -> usize {
        self.local.values().map(Vec::len).sum()
    }

    /// Unbind everything, emitting `unbind-global` for global intents.
    pub fn unbind_all(&mut self, events: &mut EventBus) {
        let ids: Vec<String> = self.states.keys().cloned().collect();
        for id in ids {
            self.unbind(&id, events);
        }
    }
}
