//! Conflict detection between enabled shortcuts.
//!
//! Two enabled shortcuts conflict when their combinations are equal and their
//! contexts overlap: identical contexts are an `Error`, an overlap through the
//! `global` context is a `Warning`. Anything else is not a conflict.

use serde::Serialize;

use super::context::ShortcutContext;
use super::registry::Shortcut;
use super::types::KeyCombination;

/// How serious a conflict is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    /// Same combination in the same context. Only one of them can ever fire.
    Error,
    /// Same combination where one side is scoped to `global`.
    Warning,
}

/// A collision between a candidate binding and an existing enabled shortcut.
///
/// Derived on demand, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutConflict {
    /// The shortcut being checked, when the check was made on its behalf.
    pub candidate_id: Option<String>,
    /// The enabled shortcut already holding the combination.
    pub existing_id: String,
    pub combination: KeyCombination,
    /// The context the candidate was evaluated against.
    pub context: ShortcutContext,
    pub severity: ConflictSeverity,
}

/// Classify the overlap of two contexts.
pub fn context_overlap(a: &ShortcutContext, b: &ShortcutContext) -> Option<ConflictSeverity> {
    if a == b {
        Some(ConflictSeverity::Error)
    } else if a.is_global() || b.is_global() {
        Some(ConflictSeverity::Warning)
    } else {
        None
    }
}

/// Report every enabled shortcut (other than `exclude_id`) that collides with
/// `combination` in `context`, in iteration order.
pub fn find_conflicts<'a>(
    shortcuts: impl IntoIterator<Item = &'a Shortcut>,
    combination: &KeyCombination,
    context: &ShortcutContext,
    exclude_id: Option<&str>,
) -> Vec<ShortcutConflict> {
    shortcuts
        .into_iter()
        .filter(|s| s.enabled && Some(s.id.as_str()) != exclude_id)
        .filter(|s| s.combination == *combination)
        .filter_map(|s| {
            context_overlap(context, &s.context).map(|severity| ShortcutConflict {
                candidate_id: exclude_id.map(str::to_string),
                existing_id: s.id.clone(),
                combination: combination.clone(),
                context: context.clone(),
                severity,
            })
        })
        .collect()
}

/// Every conflicting pair among the enabled shortcuts, each pair reported once
/// with the earlier-registered shortcut as the candidate.
pub fn pairwise_conflicts(shortcuts: &[Shortcut]) -> Vec<ShortcutConflict> {
    let enabled: Vec<&Shortcut> = shortcuts.iter().filter(|s| s.enabled).collect();
    let mut conflicts = Vec::new();

    for (i, first) in enabled.iter().enumerate() {
        for second in &enabled[i + 1..] {
            if first.combination != second.combination {
                continue;
            }
            if let Some(severity) = context_overlap(&first.context, &second.context) {
                conflicts.push(ShortcutConflict {
                    candidate_id: Some(first.id.clone()),
                    existing_id: second.id.clone(),
                    combination: first.combination.clone(),
                    context: first.context.clone(),
                    severity,
                });
            }
        }
    }

    conflicts
}
