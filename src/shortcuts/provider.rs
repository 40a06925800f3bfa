//! Shortcut providers: bundles of shortcuts a feature installs and removes
//! as a unit.

use super::registry::Shortcut;

/// A feature's shortcut set.
///
/// The engine calls `initialize` before registering the shortcuts and
/// `cleanup` after unregistering all of them.
pub trait ShortcutProvider {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn shortcuts(&self) -> Vec<Shortcut>;

    fn initialize(&mut self) {}

    fn cleanup(&mut self) {}
}

/// A provider over a fixed list, with no lifecycle hooks.
#[derive(Clone, Debug)]
pub struct StaticProvider {
    id: String,
    name: String,
    shortcuts: Vec<Shortcut>,
}

impl StaticProvider {
    pub fn new(id: impl Into<String>, name: impl Into<String>, shortcuts: Vec<Shortcut>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            shortcuts,
        }
    }
}

impl ShortcutProvider for StaticProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn shortcuts(&self) -> Vec<Shortcut> {
        self.shortcuts.clone()
    }
}
