//! Typed publish/subscribe notifications.
//!
//! Subscribers get an unbounded `async_channel::Receiver<ShortcutEvent>`.
//! They re-render or perform side effects (e.g. OS-level hotkey registration
//! for `BindGlobal`) but never mutate engine state except through its methods.

use tracing::trace;

use super::conflict::ShortcutConflict;
use super::context::ShortcutContext;
use super::registry::Shortcut;
use super::types::KeyCombination;
use crate::config::EngineConfig;

#[derive(Clone, Debug)]
pub enum ShortcutEvent {
    Registered {
        id: String,
    },
    Unregistered {
        id: String,
    },
    Triggered {
        id: String,
        combination: KeyCombination,
        context: ShortcutContext,
    },
    ConfigUpdated {
        config: EngineConfig,
    },
    ContextChanged {
        previous: ShortcutContext,
        current: ShortcutContext,
    },
    SchemeChanged {
        scheme_id: String,
    },
    ConflictDetected {
        id: String,
        combination: KeyCombination,
        conflicts: Vec<ShortcutConflict>,
    },
    /// Ask the OS integration layer to hook `label` and run the shortcut's
    /// action itself when the OS reports it.
    BindGlobal {
        shortcut: Shortcut,
        label: String,
    },
    UnbindGlobal {
        id: String,
        label: String,
    },
}

impl ShortcutEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Registered { .. } => "registered",
            Self::Unregistered { .. } => "unregistered",
            Self::Triggered { .. } => "triggered",
            Self::ConfigUpdated { .. } => "config-updated",
            Self::ContextChanged { .. } => "context-changed",
            Self::SchemeChanged { .. } => "scheme-changed",
            Self::ConflictDetected { .. } => "conflict-detected",
            Self::BindGlobal { .. } => "bind-global",
            Self::UnbindGlobal { .. } => "unbind-global",
        }
    }
}

/// Fan-out of engine events to every live subscriber.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<async_channel::Sender<ShortcutEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> async_channel::Receiver<ShortcutEvent> {
        let (tx, rx) = async_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver to all subscribers, pruning those whose receiver was dropped.
    pub fn emit(&mut self, event: ShortcutEvent) {
        trace!(event = event.name(), subscribers = self.subscribers.len(), "Emitting shortcut event");
        self.subscribers
            .retain(|tx| tx.try_send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn close(&mut self) {
        for tx in self.subscribers.drain(..) {
            tx.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_events() {
        let mut bus = EventBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.emit(ShortcutEvent::Registered { id: "save".to_string() });

        for rx in [first, second] {
            match rx.try_recv() {
                Ok(ShortcutEvent::Registered { id }) => assert_eq!(id, "save"),
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        bus.emit(ShortcutEvent::SchemeChanged { scheme_id: "vim".to_string() });
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap().name(), "scheme-changed");
    }
}
