//! The shortcut engine: registry operations, binding lifecycle, dispatch,
//! recording and usage tracking behind one owned object.
//!
//! Single-threaded and event-driven. Every mutation goes through a method on
//! [`ShortcutEngine`]; the registry, binding table and config are never
//! handed out mutably. Changes apply to the next dispatched event.

use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::action::ActionExecutor;
use super::binding::{BindingManager, BindingState};
use super::conflict::ShortcutConflict;
use super::context::ShortcutContext;
use super::events::{EventBus, ShortcutEvent};
use super::provider::ShortcutProvider;
use super::recorder::{Recorder, RecorderState, RecorderStep, RecordingReceiver};
use super::registry::{Category, Shortcut, ShortcutRegistry};
use super::scheme::ShortcutScheme;
use super::stats::{ShortcutStats, UsageTracker};
use super::types::{KeyCombination, KeyEvent};
use crate::config::{EngineConfig, DEFAULT_SCHEME_ID};
use crate::error::{Result, ShortcutError};

/// Result of offering one input event to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Filtered before matching (master switch off, text entry focus, key-up,
    /// bare modifier).
    Ignored,
    /// No enabled shortcut in the current context holds this combination.
    Unmatched,
    /// A shortcut fired. The host should suppress the event's default effect.
    Triggered { shortcut_id: String },
    /// The recorder consumed the event.
    Recorded(RecorderStep),
}

impl DispatchOutcome {
    pub fn should_prevent_default(&self) -> bool {
        matches!(self, Self::Triggered { .. } | Self::Recorded(_))
    }
}

struct ProviderEntry {
    provider: Box<dyn ShortcutProvider>,
    shortcut_ids: Vec<String>,
}

pub struct ShortcutEngine {
    registry: ShortcutRegistry,
    bindings: BindingManager,
    recorder: Recorder,
    usage: UsageTracker,
    events: EventBus,
    executor: ActionExecutor,
    providers: Vec<ProviderEntry>,
    config: EngineConfig,
    context: ShortcutContext,
}

impl Default for ShortcutEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ShortcutEngine {
    pub fn new(config: EngineConfig) -> Self {
        let mut registry = ShortcutRegistry::new();
        registry.insert_scheme(ShortcutScheme::new(DEFAULT_SCHEME_ID, "Default"));

        info!(
            event_type = "engine_lifecycle",
            action = "created",
            scheme = %config.current_scheme,
            "Shortcut engine created"
        );

        Self {
            registry,
            bindings: BindingManager::new(),
            recorder: Recorder::new(),
            usage: UsageTracker::new(),
            events: EventBus::new(),
            executor: ActionExecutor::new(),
            providers: Vec::new(),
            config,
            context: ShortcutContext::default(),
        }
    }

    /// Tear down: cancel recording, release every binding (global intents
    /// get an `unbind-global`), close subscriber channels.
    pub fn destroy(mut self) {
        self.recorder.stop();
        self.bindings.unbind_all(&mut self.events);
        self.events.close();
        info!(event_type = "engine_lifecycle", action = "destroyed", "Shortcut engine destroyed");
    }

    pub fn subscribe(&mut self) -> async_channel::Receiver<ShortcutEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a shortcut.
    ///
    /// The combination it arrives with becomes its entry in the built-in
    /// default scheme. The current scheme and then any stored customization
    /// are applied on top; ids on the disabled list register disabled.
    pub fn register(&mut self, shortcut: Shortcut) -> Result<()> {
        if self.registry.contains(&shortcut.id) {
            warn!(shortcut_id = %shortcut.id, "Refusing duplicate shortcut registration");
            return Err(ShortcutError::DuplicateId(shortcut.id));
        }

        let mut shortcut = shortcut;
        shortcut.combination = shortcut.combination.normalized();
        self.remember_default(&shortcut);

        if let Some(combination) = self
            .registry
            .scheme(&self.config.current_scheme)
            .and_then(|s| s.combination_for(&shortcut.id))
        {
            shortcut.combination = combination.clone();
        }
        if let Some(customized) = self.config.customization(&shortcut.id) {
            shortcut.combination = customized.clone();
        }
        if self.config.is_disabled(&shortcut.id) {
            shortcut.enabled = false;
        }

        let id = shortcut.id.clone();
        self.registry.insert(shortcut)?;
        self.bind_if_enabled(&id);

        info!(
            event_type = "shortcut_registered",
            shortcut_id = %id,
            binding = ?self.bindings.state(&id),
            "Shortcut registered"
        );
        self.events.emit(ShortcutEvent::Registered { id });
        Ok(())
    }

    pub fn unregister(&mut self, id: &str) -> Result<()> {
        if !self.registry.contains(id) {
            warn!(shortcut_id = id, "Cannot unregister unknown shortcut");
            return Err(ShortcutError::UnknownShortcut(id.to_string()));
        }

        self.bindings.unbind(id, &mut self.events);
        self.registry.remove(id);

        info!(event_type = "shortcut_unregistered", shortcut_id = id, "Shortcut unregistered");
        self.events.emit(ShortcutEvent::Unregistered { id: id.to_string() });
        Ok(())
    }

    pub fn enable(&mut self, id: &str) -> Result<()> {
        self.set_shortcut_enabled(id, true)
    }

    pub fn disable(&mut self, id: &str) -> Result<()> {
        self.set_shortcut_enabled(id, false)
    }

    fn set_shortcut_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        let previous = self.registry.set_enabled(id, enabled).ok_or_else(|| {
            warn!(shortcut_id = id, enabled, "Cannot toggle unknown shortcut");
            ShortcutError::UnknownShortcut(id.to_string())
        })?;

        if enabled {
            if !previous || !self.bindings.is_bound(id) {
                self.bind_if_enabled(id);
            }
        } else {
            self.bindings.unbind(id, &mut self.events);
        }

        let was_listed = self.config.is_disabled(id);
        self.config.set_disabled(id, !enabled);

        if previous != enabled || was_listed == enabled {
            info!(
                event_type = "shortcut_toggled",
                shortcut_id = id,
                enabled,
                "Shortcut enablement changed"
            );
            self.emit_config_updated();
        }
        Ok(())
    }

    /// Rebind `id` to `combination` and record it as a customization.
    ///
    /// With conflict detection on, any collision with another enabled
    /// shortcut refuses the change and emits `conflict-detected`.
    pub fn customize(&mut self, id: &str, combination: KeyCombination) -> Result<()> {
        let combination = combination.normalized();
        let conflicts = self.conflicts_for_candidate(id, &combination)?;

        if self.config.conflict_detection && !conflicts.is_empty() {
            warn!(
                shortcut_id = id,
                label = %combination.label(),
                conflicts = conflicts.len(),
                "Customization refused: combination already in use"
            );
            self.events.emit(ShortcutEvent::ConflictDetected {
                id: id.to_string(),
                combination,
                conflicts: conflicts.clone(),
            });
            return Err(ShortcutError::Conflict {
                id: id.to_string(),
                conflicts,
            });
        }

        self.apply_customization(id, combination);
        Ok(())
    }

    /// Customize even when the combination collides. Conflicts are still
    /// announced through `conflict-detected`.
    pub fn customize_forced(&mut self, id: &str, combination: KeyCombination) -> Result<Vec<ShortcutConflict>> {
        let combination = combination.normalized();
        let conflicts = self.conflicts_for_candidate(id, &combination)?;

        if !conflicts.is_empty() {
            warn!(
                shortcut_id = id,
                label = %combination.label(),
                conflicts = conflicts.len(),
                "Forcing customization over existing bindings"
            );
            self.events.emit(ShortcutEvent::ConflictDetected {
                id: id.to_string(),
                combination: combination.clone(),
                conflicts: conflicts.clone(),
            });
        }

        self.apply_customization(id, combination);
        Ok(conflicts)
    }

    fn conflicts_for_candidate(&self, id: &str, combination: &KeyCombination) -> Result<Vec<ShortcutConflict>> {
        let shortcut = self.registry.get(id).ok_or_else(|| {
            warn!(shortcut_id = id, "Cannot customize unknown shortcut");
            ShortcutError::UnknownShortcut(id.to_string())
        })?;
        Ok(self
            .registry
            .find_conflicts(combination, &shortcut.context, Some(id)))
    }

    fn apply_customization(&mut self, id: &str, combination: KeyCombination) {
        self.config
            .customizations
            .insert(id.to_string(), combination.clone());
        info!(
            event_type = "shortcut_customized",
            shortcut_id = id,
            label = %combination.label(),
            "Shortcut customized"
        );
        self.rebind_with(id, combination);
        self.emit_config_updated();
    }

    /// Drop the customization for `id` and restore the current scheme's
    /// combination. Leaves the combination alone when the scheme has none.
    pub fn reset(&mut self, id: &str) -> Result<()> {
        if !self.registry.contains(id) {
            warn!(shortcut_id = id, "Cannot reset unknown shortcut");
            return Err(ShortcutError::UnknownShortcut(id.to_string()));
        }

        self.config.customizations.remove(id);
        let restored = self
            .registry
            .scheme(&self.config.current_scheme)
            .and_then(|s| s.combination_for(id))
            .cloned();

        match restored {
            Some(combination) => self.rebind_with(id, combination),
            None => {
                debug!(shortcut_id = id, scheme = %self.config.current_scheme, "Scheme has no combination to restore");
                self.bind_if_enabled(id);
            }
        }

        info!(event_type = "shortcut_reset", shortcut_id = id, "Shortcut reset");
        self.emit_config_updated();
        Ok(())
    }

    pub fn add_category(&mut self, category: Category) {
        debug!(category_id = %category.id, "Category added");
        self.registry.add_category(category);
    }

    /// Register all of a provider's shortcuts, or none of them.
    pub fn register_provider(&mut self, mut provider: Box<dyn ShortcutProvider>) -> Result<()> {
        let provider_id = provider.id().to_string();
        if self.providers.iter().any(|p| p.provider.id() == provider_id) {
            warn!(provider_id = %provider_id, "Provider already registered");
            return Err(ShortcutError::DuplicateProvider(provider_id));
        }

        let shortcuts = provider.shortcuts();
        let mut seen = HashSet::new();
        for shortcut in &shortcuts {
            if self.registry.contains(&shortcut.id) || !seen.insert(shortcut.id.as_str()) {
                warn!(
                    provider_id = %provider_id,
                    shortcut_id = %shortcut.id,
                    "Provider refused: shortcut id already taken"
                );
                return Err(ShortcutError::DuplicateId(shortcut.id.clone()));
            }
        }

        provider.initialize();
        let mut shortcut_ids = Vec::with_capacity(shortcuts.len());
        for shortcut in shortcuts {
            shortcut_ids.push(shortcut.id.clone());
            self.register(shortcut)?;
        }

        info!(
            event_type = "provider_registered",
            provider_id = %provider_id,
            provider_name = provider.name(),
            shortcuts = shortcut_ids.len(),
            "Shortcut provider registered"
        );
        self.providers.push(ProviderEntry {
            provider,
            shortcut_ids,
        });
        Ok(())
    }

    pub fn unregister_provider(&mut self, provider_id: &str) -> Result<()> {
        let index = self
            .providers
            .iter()
            .position(|p| p.provider.id() == provider_id)
            .ok_or_else(|| {
                warn!(provider_id, "Cannot unregister unknown provider");
                ShortcutError::UnknownProvider(provider_id.to_string())
            })?;

        let mut entry = self.providers.remove(index);
        for id in &entry.shortcut_ids {
            if self.registry.contains(id) {
                self.unregister(id)?;
            }
        }
        entry.provider.cleanup();

        info!(event_type = "provider_unregistered", provider_id, "Shortcut provider unregistered");
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn shortcut(&self, id: &str) -> Option<&Shortcut> {
        self.registry.get(id)
    }

    /// All shortcuts in registration order.
    pub fn shortcuts(&self) -> &[Shortcut] {
        self.registry.shortcuts()
    }

    pub fn shortcuts_by_category(&self, category: &str) -> Vec<&Shortcut> {
        self.registry.by_category(category)
    }

    pub fn shortcuts_by_context(&self, context: &ShortcutContext) -> Vec<&Shortcut> {
        self.registry.by_context(context)
    }

    pub fn search(&self, query: &str) -> Vec<&Shortcut> {
        self.registry.search(query)
    }

    pub fn categories(&self) -> Vec<&Category> {
        self.registry.categories()
    }

    /// Shortcuts ordered for display: context priority, then shortcut
    /// priority (higher first), then name.
    pub fn ranked_shortcuts(&self) -> Vec<&Shortcut> {
        let mut ranked: Vec<&Shortcut> = self.registry.shortcuts().iter().collect();
        ranked.sort_by(|a, b| {
            let key_a = (self.config.context_rank(&a.context), Reverse(a.priority.unwrap_or(0)));
            let key_b = (self.config.context_rank(&b.context), Reverse(b.priority.unwrap_or(0)));
            key_a.cmp(&key_b).then_with(|| a.name.cmp(&b.name))
        });
        ranked
    }

    pub fn binding_state(&self, id: &str) -> BindingState {
        self.bindings.state(id)
    }

    pub fn find_conflicts(
        &self,
        combination: &KeyCombination,
        context: &ShortcutContext,
        exclude_id: Option<&str>,
    ) -> Vec<ShortcutConflict> {
        self.registry
            .find_conflicts(&combination.normalized(), context, exclude_id)
    }

    /// Conflicts of a registered shortcut's live binding.
    pub fn conflicts_for(&self, id: &str) -> Vec<ShortcutConflict> {
        match self.registry.get(id) {
            Some(shortcut) if shortcut.enabled => {
                self.registry
                    .find_conflicts(&shortcut.combination, &shortcut.context, Some(id))
            }
            _ => Vec::new(),
        }
    }

    pub fn usage_count(&self, id: &str) -> u64 {
        self.usage.count(id)
    }

    pub fn last_used(&self, id: &str) -> Option<DateTime<Utc>> {
        self.usage.last_used(id)
    }

    pub fn stats(&self) -> ShortcutStats {
        let shortcuts = self.registry.shortcuts();
        ShortcutStats {
            total: self.registry.len(),
            enabled: shortcuts.iter().filter(|s| s.enabled).count(),
            global: shortcuts.iter().filter(|s| s.global).count(),
            customized: self.config.customizations.len(),
            conflicts: self.registry.all_conflicts().len(),
            usage: self.usage.counts().clone(),
            last_used: self.usage.last_used_map().clone(),
        }
    }

    // =========================================================================
    // Context & config
    // =========================================================================

    pub fn context(&self) -> &ShortcutContext {
        &self.context
    }

    /// Replace the current context. Called by the host on focus changes.
    pub fn set_context(&mut self, context: impl Into<ShortcutContext>) {
        let context = context.into();
        if context == self.context {
            return;
        }
        let previous = std::mem::replace(&mut self.context, context.clone());
        debug!(event_type = "context_changed", from = %previous, to = %context, "Context changed");
        self.events.emit(ShortcutEvent::ContextChanged {
            previous,
            current: context,
        });
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the whole config (e.g. one loaded from disk) and rebind every
    /// shortcut to match its customizations and disabled list. Does not load
    /// `current_scheme`; call [`ShortcutEngine::load_scheme`] for that.
    pub fn apply_config(&mut self, config: EngineConfig) {
        let previous = std::mem::replace(&mut self.config, config);
        let ids: Vec<String> = self.registry.shortcuts().iter().map(|s| s.id.clone()).collect();

        for id in &ids {
            self.bindings.unbind(id, &mut self.events);

            let current_enabled = self.registry.get(id).is_some_and(|s| s.enabled);
            let enabled = if self.config.is_disabled(id) {
                false
            } else if previous.is_disabled(id) {
                true
            } else {
                current_enabled
            };
            self.registry.set_enabled(id, enabled);

            if let Some(customized) = self.config.customization(id).cloned() {
                self.registry.set_combination(id, customized);
            } else if previous.customization(id).is_some() {
                if let Some(restored) = self
                    .registry
                    .scheme(&self.config.current_scheme)
                    .and_then(|s| s.combination_for(id))
                    .cloned()
                {
                    self.registry.set_combination(id, restored);
                }
            }

            self.bind_if_enabled(id);
        }

        info!(
            event_type = "config_applied",
            shortcuts = ids.len(),
            customizations = self.config.customizations.len(),
            "Engine config applied"
        );
        self.emit_config_updated();
    }

    /// Master switch for dispatch.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        self.emit_config_updated();
    }

    /// Toggling moves every enabled global-flagged shortcut between the
    /// external global layer and the local table.
    pub fn set_global_shortcuts_enabled(&mut self, enabled: bool) {
        if self.config.global_shortcuts_enabled == enabled {
            return;
        }
        self.config.global_shortcuts_enabled = enabled;

        let global_ids: Vec<String> = self
            .registry
            .shortcuts()
            .iter()
            .filter(|s| s.global && s.enabled)
            .map(|s| s.id.clone())
            .collect();
        for id in &global_ids {
            self.bind_if_enabled(id);
        }

        info!(
            event_type = "global_shortcuts_toggled",
            enabled,
            rebound = global_ids.len(),
            "Global shortcut switch changed"
        );
        self.emit_config_updated();
    }

    pub fn set_conflict_detection(&mut self, enabled: bool) {
        self.config.conflict_detection = enabled;
        self.emit_config_updated();
    }

    pub fn set_context_priority(&mut self, priority: Vec<ShortcutContext>) {
        self.config.context_priority = priority;
        self.emit_config_updated();
    }

    // =========================================================================
    // Schemes
    // =========================================================================

    /// Store (or overwrite) a scheme. Does not load it. The built-in
    /// `default` scheme is owned by registration and cannot be replaced.
    pub fn save_scheme(&mut self, mut scheme: ShortcutScheme) -> Result<()> {
        Self::check_writable_scheme(&scheme.id)?;
        if self.registry.scheme(&scheme.id).is_some() {
            scheme.updated_at = Some(Utc::now());
        }
        debug!(scheme_id = %scheme.id, shortcuts = scheme.shortcuts.len(), "Scheme saved");
        self.registry.insert_scheme(scheme);
        Ok(())
    }

    fn check_writable_scheme(id: &str) -> Result<()> {
        if id == DEFAULT_SCHEME_ID {
            warn!(scheme_id = id, "The default scheme is built in");
            return Err(ShortcutError::InvalidScheme(format!("'{}' is built in", id)));
        }
        Ok(())
    }

    pub fn scheme(&self, id: &str) -> Option<&ShortcutScheme> {
        self.registry.scheme(id)
    }

    pub fn schemes(&self) -> Vec<&ShortcutScheme> {
        self.registry.schemes().collect()
    }

    pub fn delete_scheme(&mut self, id: &str) -> Result<()> {
        Self::check_writable_scheme(id)?;
        self.registry
            .remove_scheme(id)
            .map(|_| ())
            .ok_or_else(|| ShortcutError::UnknownScheme(id.to_string()))
    }

    /// Rebind every shortcut the scheme names to the scheme's combination.
    /// Shortcuts it doesn't mention keep their binding; stored
    /// customizations are kept in config but not applied.
    pub fn load_scheme(&mut self, id: &str) -> Result<()> {
        self.load_scheme_inner(id, false)
    }

    /// Like [`ShortcutEngine::load_scheme`], then re-apply every stored
    /// customization on top.
    pub fn load_scheme_preserving_customizations(&mut self, id: &str) -> Result<()> {
        self.load_scheme_inner(id, true)
    }

    fn load_scheme_inner(&mut self, id: &str, keep_customizations: bool) -> Result<()> {
        let scheme = self.registry.scheme(id).cloned().ok_or_else(|| {
            warn!(scheme_id = id, "Cannot load unknown scheme");
            ShortcutError::UnknownScheme(id.to_string())
        })?;

        let mut applied = 0usize;
        for (shortcut_id, combination) in &scheme.shortcuts {
            if self.registry.contains(shortcut_id) {
                self.rebind_with(shortcut_id, combination.clone());
                applied += 1;
            } else {
                debug!(scheme_id = id, shortcut_id = %shortcut_id, "Scheme names an unregistered shortcut");
            }
        }

        if keep_customizations {
            let customizations: Vec<(String, KeyCombination)> = self
                .config
                .customizations
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            for (shortcut_id, combination) in customizations {
                if self.registry.contains(&shortcut_id) {
                    self.rebind_with(&shortcut_id, combination);
                }
            }
        }

        self.config.current_scheme = id.to_string();
        info!(
            event_type = "scheme_loaded",
            scheme_id = id,
            applied,
            keep_customizations,
            "Shortcut scheme loaded"
        );
        self.events.emit(ShortcutEvent::SchemeChanged {
            scheme_id: id.to_string(),
        });
        self.emit_config_updated();
        Ok(())
    }

    /// Serialize a stored scheme merged with the current customizations.
    pub fn export_scheme(&self, id: &str) -> Result<String> {
        let mut scheme = self
            .registry
            .scheme(id)
            .cloned()
            .ok_or_else(|| ShortcutError::UnknownScheme(id.to_string()))?;

        for (shortcut_id, combination) in &self.config.customizations {
            scheme
                .shortcuts
                .insert(shortcut_id.clone(), combination.clone());
        }
        scheme.to_json()
    }

    /// Parse, validate and store a serialized scheme, returning its id.
    /// Malformed input, or input claiming the `default` id, leaves every
    /// stored scheme untouched.
    pub fn import_scheme(&mut self, input: &str) -> Result<String> {
        let scheme = ShortcutScheme::from_json(input).inspect_err(|e| {
            warn!(error = %e, "Rejected scheme import");
        })?;
        let id = scheme.id.clone();
        Self::check_writable_scheme(&id)?;
        info!(
            event_type = "scheme_imported",
            scheme_id = %id,
            shortcuts = scheme.shortcuts.len(),
            "Shortcut scheme imported"
        );
        self.registry.insert_scheme(scheme);
        Ok(id)
    }

    // =========================================================================
    // Dispatch & recording
    // =========================================================================

    /// Process one input event. At most one shortcut action runs per event.
    pub fn dispatch(&mut self, event: &KeyEvent) -> DispatchOutcome {
        if let Some(step) = self.recorder.handle_event(event) {
            return DispatchOutcome::Recorded(step);
        }

        if !self.config.enabled || event.editable_target || !event.is_key_down() {
            return DispatchOutcome::Ignored;
        }

        let Some(combination) = KeyCombination::from_event(event) else {
            return DispatchOutcome::Ignored;
        };

        let matched = self
            .bindings
            .local_candidates(&combination.binding_key())
            .iter()
            .filter_map(|id| {
                let position = self.registry.position(id)?;
                let shortcut = self.registry.get(id)?;
                (shortcut.enabled
                    && shortcut.context.is_active_in(&self.context)
                    && shortcut.combination == combination)
                    .then_some((position, shortcut))
            })
            .min_by_key(|(position, _)| *position)
            .map(|(_, shortcut)| (shortcut.id.clone(), shortcut.action.clone()));

        let Some((shortcut_id, action)) = matched else {
            return DispatchOutcome::Unmatched;
        };

        debug!(
            event_type = "shortcut_triggered",
            shortcut_id = %shortcut_id,
            label = %combination.label(),
            context = %self.context,
            "Shortcut matched"
        );
        self.executor.invoke(&shortcut_id, &action);
        self.usage.record(&shortcut_id, Utc::now());
        self.events.emit(ShortcutEvent::Triggered {
            id: shortcut_id.clone(),
            combination,
            context: self.context.clone(),
        });

        DispatchOutcome::Triggered { shortcut_id }
    }

    /// Drive spawned async actions as far as they can go without blocking.
    pub fn run_pending_actions(&mut self) {
        self.executor.run_until_stalled();
    }

    /// Capture the next combination typed. `on_result` gets `None` if the
    /// user cancels with Escape.
    pub fn start_recording(&mut self, on_result: impl FnOnce(Option<KeyCombination>) + 'static) {
        self.recorder.start(on_result);
    }

    pub fn start_recording_channel(&mut self) -> RecordingReceiver {
        self.recorder.start_channel()
    }

    /// Abandon recording without reporting a result.
    pub fn stop_recording(&mut self) -> bool {
        self.recorder.stop()
    }

    pub fn recording_state(&self) -> RecorderState {
        self.recorder.state()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Record the combination a shortcut registers with as its default.
    /// A re-registration replaces whatever an earlier one left behind.
    fn remember_default(&mut self, shortcut: &Shortcut) {
        let Some(default_scheme) = self.registry.scheme(DEFAULT_SCHEME_ID) else {
            return;
        };
        if default_scheme.combination_for(&shortcut.id) == Some(&shortcut.combination) {
            return;
        }
        let mut updated = default_scheme.clone();
        updated
            .shortcuts
            .insert(shortcut.id.clone(), shortcut.combination.clone());
        self.registry.insert_scheme(updated);
    }

    fn bind_if_enabled(&mut self, id: &str) {
        let Some(shortcut) = self.registry.get(id) else {
            return;
        };
        if shortcut.enabled {
            self.bindings
                .bind(shortcut, self.config.global_shortcuts_enabled, &mut self.events);
        } else {
            self.bindings.unbind(id, &mut self.events);
        }
    }

    /// Unbind under the old key, swap in the new combination, bind again.
    fn rebind_with(&mut self, id: &str, combination: KeyCombination) {
        self.bindings.unbind(id, &mut self.events);
        self.registry.set_combination(id, combination);
        self.bind_if_enabled(id);
    }

    fn emit_config_updated(&mut self) {
        self.events.emit(ShortcutEvent::ConfigUpdated {
            config: self.config.clone(),
        });
    }
}
