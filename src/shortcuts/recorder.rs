//! Key-combination recorder.
//!
//! `Idle -> Recording -> {Captured, Cancelled} -> Idle`. While recording the
//! recorder has exclusive claim on the input stream: the engine hands every
//! event to it before any shortcut matching happens.
//!
//! A bare `Escape` press is reserved for cancelling; releasing `Escape`
//! cancels the recording and reports `None`.

use futures::channel::oneshot;
use tracing::{debug, info};

use super::types::{is_modifier_key, normalize_key, KeyCombination, KeyEvent};

pub type RecordingCallback = Box<dyn FnOnce(Option<KeyCombination>)>;

/// Resolves to the captured combination, or `None` when cancelled. Resolves
/// to `Err(Canceled)` when recording was stopped without a result.
pub type RecordingReceiver = oneshot::Receiver<Option<KeyCombination>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
}

/// What happened to an event offered to a recording recorder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecorderStep {
    /// Swallowed; still waiting for a primary key.
    Pending,
    Captured(KeyCombination),
    Cancelled,
}

enum ResultSink {
    Callback(RecordingCallback),
    Channel(oneshot::Sender<Option<KeyCombination>>),
}

impl ResultSink {
    fn deliver(self, result: Option<KeyCombination>) {
        match self {
            Self::Callback(callback) => callback(result),
            Self::Channel(tx) => {
                // Receiver may have been dropped by an abandoned UI.
                let _ = tx.send(result);
            }
        }
    }
}

#[derive(Default)]
pub struct Recorder {
    sink: Option<ResultSink>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RecorderState {
        if self.is_recording() {
            RecorderState::Recording
        } else {
            RecorderState::Idle
        }
    }

    pub fn is_recording(&self) -> bool {
        self.sink.is_some()
    }

    /// Start recording; `on_result` fires once with the captured combination
    /// or `None` on cancellation. Replaces any recording in progress without
    /// notifying its callback.
    pub fn start(&mut self, on_result: impl FnOnce(Option<KeyCombination>) + 'static) {
        self.begin(ResultSink::Callback(Box::new(on_result)));
    }

    /// Channel flavour of [`Recorder::start`].
    pub fn start_channel(&mut self) -> RecordingReceiver {
        let (tx, rx) = oneshot::channel();
        self.begin(ResultSink::Channel(tx));
        rx
    }

    fn begin(&mut self, sink: ResultSink) {
        if self.sink.replace(sink).is_some() {
            debug!("Previous recording abandoned by a new one");
        }
        info!(event_type = "recorder", state = "recording", "Shortcut recording started");
    }

    /// Return to idle without invoking the callback. Returns whether a
    /// recording was in progress.
    pub fn stop(&mut self) -> bool {
        let was_recording = self.sink.take().is_some();
        if was_recording {
            info!(event_type = "recorder", state = "idle", "Shortcut recording stopped");
        }
        was_recording
    }

    /// Offer an input event. Returns `None` when idle (event not consumed).
    pub fn handle_event(&mut self, event: &KeyEvent) -> Option<RecorderStep> {
        self.sink.as_ref()?;

        let is_escape = normalize_key(&event.key) == "escape";

        if !event.is_key_down() {
            if is_escape {
                return Some(self.finish(None));
            }
            return Some(RecorderStep::Pending);
        }

        if event.key.is_empty() || is_modifier_key(&event.key) {
            return Some(RecorderStep::Pending);
        }

        let combination = KeyCombination::from_event(event)?;
        if is_escape && combination.modifiers().is_empty() {
            return Some(RecorderStep::Pending);
        }

        Some(self.finish(Some(combination)))
    }

    fn finish(&mut self, result: Option<KeyCombination>) -> RecorderStep {
        let step = match &result {
            Some(combination) => {
                info!(
                    event_type = "recorder",
                    state = "captured",
                    label = %combination.label(),
                    "Shortcut recorded"
                );
                RecorderStep::Captured(combination.clone())
            }
            None => {
                info!(event_type = "recorder", state = "cancelled", "Shortcut recording cancelled");
                RecorderStep::Cancelled
            }
        };
        if let Some(sink) = self.sink.take() {
            sink.deliver(result);
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::types::Modifier;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder_with_slot() -> (Recorder, Rc<RefCell<Vec<Option<KeyCombination>>>>) {
        let results = Rc::new(RefCell::new(Vec::new()));
        let sink = results.clone();
        let mut recorder = Recorder::new();
        recorder.start(move |result| sink.borrow_mut().push(result));
        (recorder, results)
    }

    #[test]
    fn idle_recorder_ignores_events() {
        let mut recorder = Recorder::new();
        assert_eq!(recorder.handle_event(&KeyEvent::down("a")), None);
    }

    #[test]
    fn modifiers_alone_do_not_complete_recording() {
        let (mut recorder, results) = recorder_with_slot();
        let step = recorder.handle_event(&KeyEvent::down("Control").with_modifier(Modifier::Ctrl));
        assert_eq!(step, Some(RecorderStep::Pending));
        assert!(recorder.is_recording());
        assert!(results.borrow().is_empty());
    }

    #[test]
    fn captures_first_primary_key_with_held_modifiers() {
        let (mut recorder, results) = recorder_with_slot();
        let event = KeyEvent::down("K")
            .with_modifier(Modifier::Cmd)
            .with_modifier(Modifier::Shift);
        let expected = KeyCombination::new("k", [Modifier::Cmd, Modifier::Shift]);

        assert_eq!(
            recorder.handle_event(&event),
            Some(RecorderStep::Captured(expected.clone()))
        );
        assert_eq!(recorder.state(), RecorderState::Idle);
        assert_eq!(*results.borrow(), vec![Some(expected)]);
    }

    #[test]
    fn escape_release_cancels() {
        let (mut recorder, results) = recorder_with_slot();
        assert_eq!(
            recorder.handle_event(&KeyEvent::down("Escape")),
            Some(RecorderStep::Pending)
        );
        assert_eq!(
            recorder.handle_event(&KeyEvent::up("Escape")),
            Some(RecorderStep::Cancelled)
        );
        assert_eq!(*results.borrow(), vec![None]);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn stop_does_not_invoke_callback() {
        let (mut recorder, results) = recorder_with_slot();
        assert!(recorder.stop());
        assert!(!recorder.stop());
        assert!(results.borrow().is_empty());
    }

    #[test]
    fn channel_receives_capture() {
        let mut recorder = Recorder::new();
        let mut rx = recorder.start_channel();
        recorder.handle_event(&KeyEvent::down("F5"));
        assert_eq!(
            rx.try_recv().unwrap(),
            Some(Some(KeyCombination::new("f5", [])))
        );
    }

    #[test]
    fn stopped_channel_reports_canceled() {
        let mut recorder = Recorder::new();
        let mut rx = recorder.start_channel();
        recorder.stop();
        assert!(rx.try_recv().is_err());
    }
}
