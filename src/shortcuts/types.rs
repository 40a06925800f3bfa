//! Key combination codec.
//!
//! This module provides:
//! - `Modifier` - the closed set of modifier keys (ctrl, cmd, alt, shift, meta)
//! - `KeyCombination` - an immutable, canonical `{modifiers, key}` value
//! - `KeyEvent` - an already-decoded "key pressed with modifiers" input event
//! - `ShortcutParseError` - detailed parse errors for textual combinations
//! - Platform-aware display (⌃⇧S labels, `Ctrl+Shift+S` on Windows/Linux)

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a combination string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("shortcut string is empty")]
    Empty,
    #[error("shortcut has no key, only modifiers")]
    MissingKey,
    #[error("unknown token '{0}' in shortcut")]
    UnknownToken(String),
}

/// Modifier keys a combination may hold.
///
/// The declaration order is the canonical display order used by
/// [`KeyCombination::label`], so `BTreeSet<Modifier>` iterates in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Ctrl,
    Cmd,
    Alt,
    Shift,
    Meta,
}

impl Modifier {
    pub const ALL: [Modifier; 5] = [
        Modifier::Ctrl,
        Modifier::Cmd,
        Modifier::Alt,
        Modifier::Shift,
        Modifier::Meta,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ctrl => "ctrl",
            Self::Cmd => "cmd",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::Meta => "meta",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Ctrl => '⌃',
            Self::Cmd => '⌘',
            Self::Alt => '⌥',
            Self::Shift => '⇧',
            Self::Meta => '◆',
        }
    }

    fn display_text(self) -> &'static str {
        match self {
            Self::Ctrl => "Ctrl",
            Self::Cmd => "Cmd",
            Self::Alt => "Alt",
            Self::Shift => "Shift",
            Self::Meta => "Super",
        }
    }

    /// Resolve a modifier name or one of its synonyms.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "ctrl" | "control" | "ctl" | "^" | "⌃" => Some(Self::Ctrl),
            "cmd" | "command" | "⌘" | "mod" => Some(Self::Cmd),
            "alt" | "opt" | "option" | "⌥" => Some(Self::Alt),
            "shift" | "shft" | "⇧" => Some(Self::Shift),
            "meta" | "super" | "win" | "os" => Some(Self::Meta),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform enum for display formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        {
            Platform::MacOS
        }
        #[cfg(target_os = "windows")]
        {
            Platform::Windows
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            Platform::Linux
        }
    }
}

/// Canonicalize a raw key name to the internal vocabulary.
///
/// Device-specific names (arrow keys, space, escape, delete, ...) map to a
/// fixed set of names; everything else passes through case-folded.
pub fn normalize_key(raw: &str) -> String {
    if raw == " " {
        return "space".to_string();
    }
    let key_lower = raw.trim().to_lowercase();
    match key_lower.as_str() {
        "arrowup" | "uparrow" => "up",
        "arrowdown" | "downarrow" => "down",
        "arrowleft" | "leftarrow" => "left",
        "arrowright" | "rightarrow" => "right",
        "spacebar" => "space",
        "esc" => "escape",
        "del" => "delete",
        "ins" => "insert",
        "return" => "enter",
        "back" => "backspace",
        "pgup" => "pageup",
        "pgdn" | "pgdown" => "pagedown",
        "plus" => "+",
        _ => return key_lower,
    }
    .to_string()
}

/// Whether a raw key name is a bare modifier press (no primary key yet).
pub fn is_modifier_key(raw: &str) -> bool {
    matches!(
        raw.to_lowercase().as_str(),
        "shift"
            | "control"
            | "ctrl"
            | "alt"
            | "altgraph"
            | "meta"
            | "command"
            | "cmd"
            | "super"
            | "win"
            | "os"
            | "opt"
            | "option"
            | "hyper"
            | "fn"
    )
}

/// Read the modifier flags off an input event.
pub fn extract_modifiers(event: &KeyEvent) -> BTreeSet<Modifier> {
    [
        (event.ctrl, Modifier::Ctrl),
        (event.cmd, Modifier::Cmd),
        (event.alt, Modifier::Alt),
        (event.shift, Modifier::Shift),
        (event.meta, Modifier::Meta),
    ]
    .into_iter()
    .filter_map(|(held, modifier)| held.then_some(modifier))
    .collect()
}

/// A primary key plus a set of modifiers, compared by value.
///
/// Fields are private so every value stays canonical; customizing a shortcut
/// produces a new `KeyCombination` rather than mutating one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawKeyCombination")]
pub struct KeyCombination {
    modifiers: BTreeSet<Modifier>,
    key: String,
}

/// Wire shape accepted when deserializing; normalized on the way in.
#[derive(Deserialize)]
struct RawKeyCombination {
    #[serde(default)]
    modifiers: Vec<Modifier>,
    key: String,
}

impl TryFrom<RawKeyCombination> for KeyCombination {
    type Error = ShortcutParseError;

    fn try_from(raw: RawKeyCombination) -> Result<Self, Self::Error> {
        if raw.key.trim().is_empty() && raw.key != " " {
            return Err(ShortcutParseError::MissingKey);
        }
        Ok(Self::new(raw.key, raw.modifiers))
    }
}

impl KeyCombination {
    pub fn new(key: impl AsRef<str>, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        Self {
            modifiers: modifiers.into_iter().collect(),
            key: normalize_key(key.as_ref()),
        }
    }

    /// Build the combination an input event represents.
    ///
    /// Returns `None` for bare modifier presses.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.key.is_empty() || is_modifier_key(&event.key) {
            return None;
        }
        Some(Self {
            modifiers: extract_modifiers(event),
            key: normalize_key(&event.key),
        })
    }

    /// Parse a combination such as `"ctrl+shift+s"` or `"cmd k"`.
    pub fn parse(s: &str) -> Result<Self, ShortcutParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShortcutParseError::Empty);
        }

        let mut modifiers = BTreeSet::new();
        let mut key_part: Option<&str> = None;

        for part in s.split(['+', ' ']).filter(|p| !p.is_empty()) {
            if let Some(modifier) = Modifier::from_name(part) {
                modifiers.insert(modifier);
                continue;
            }
            if key_part.is_some() {
                return Err(ShortcutParseError::UnknownToken(part.to_string()));
            }
            key_part = Some(part);
        }

        let key = key_part.ok_or(ShortcutParseError::MissingKey)?;
        Ok(Self {
            modifiers,
            key: normalize_key(key),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> &BTreeSet<Modifier> {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Re-run normalization. Idempotent on values built by this module.
    pub fn normalized(&self) -> Self {
        Self::new(&self.key, self.modifiers.iter().copied())
    }

    /// Human-readable label: modifier glyphs in canonical order, then the
    /// upper-cased key (`⌃⇧S`).
    pub fn label(&self) -> String {
        let mut s: String = self.modifiers.iter().map(|m| m.glyph()).collect();
        s.push_str(&self.key.to_uppercase());
        s
    }

    /// Key into the local binding table: alphabetically sorted modifier
    /// names joined with `+`, then the key (`alt+ctrl+s`).
    pub fn binding_key(&self) -> String {
        let mut parts: Vec<&str> = self.modifiers.iter().map(|m| m.as_str()).collect();
        parts.sort_unstable();
        parts.push(&self.key);
        parts.join("+")
    }

    pub fn display_for_platform(&self, platform: Platform) -> String {
        match platform {
            Platform::MacOS => self.label(),
            Platform::Windows | Platform::Linux => {
                let mut parts: Vec<String> = self
                    .modifiers
                    .iter()
                    .map(|m| m.display_text().to_string())
                    .collect();
                parts.push(key_display_text(&self.key));
                parts.join("+")
            }
        }
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn key_display_text(key: &str) -> String {
    match key {
        "enter" => "Enter",
        "escape" => "Esc",
        "tab" => "Tab",
        "space" => "Space",
        "backspace" => "Backspace",
        "delete" => "Delete",
        "up" => "Up",
        "down" => "Down",
        "left" => "Left",
        "right" => "Right",
        "home" => "Home",
        "end" => "End",
        "pageup" => "PageUp",
        "pagedown" => "PageDown",
        k => return k.to_uppercase(),
    }
    .to_string()
}

/// Direction of a key event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyEventKind {
    #[default]
    Down,
    Up,
}

/// An already-decoded keyboard event as delivered by the host UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Physical key name as reported by the host (e.g. `"ArrowUp"`, `"S"`).
    pub key: String,
    pub kind: KeyEventKind,
    pub ctrl: bool,
    pub cmd: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// Focus is in a text-entry element; the host decides what that means.
    pub editable_target: bool,
}

impl KeyEvent {
    pub fn down(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn up(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Up,
            ..Default::default()
        }
    }

    /// Key-down event carrying exactly the combination's modifiers.
    pub fn from_combination(combination: &KeyCombination) -> Self {
        let mut event = Self::down(combination.key());
        for modifier in combination.modifiers() {
            event = event.with_modifier(*modifier);
        }
        event
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        match modifier {
            Modifier::Ctrl => self.ctrl = true,
            Modifier::Cmd => self.cmd = true,
            Modifier::Alt => self.alt = true,
            Modifier::Shift => self.shift = true,
            Modifier::Meta => self.meta = true,
        }
        self
    }

    pub fn in_editable(mut self) -> Self {
        self.editable_target = true;
        self
    }

    pub fn is_key_down(&self) -> bool {
        self.kind == KeyEventKind::Down
    }
}
