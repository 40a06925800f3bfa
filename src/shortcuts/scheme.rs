//! Shortcut schemes: named, swappable presets mapping shortcut ids to
//! combinations.
//!
//! Serialized form (JSON):
//! ```json
//! {"id":"vim","name":"Vim-like","shortcuts":{"save":{"modifiers":["ctrl"],"key":"s"}},
//!  "createdAt":"2024-12-25T10:30:45Z"}
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::KeyCombination;
use crate::error::{Result, ShortcutError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutScheme {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub shortcuts: BTreeMap<String, KeyCombination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ShortcutScheme {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            shortcuts: BTreeMap::new(),
            author: None,
            version: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_binding(mut self, shortcut_id: impl Into<String>, combination: KeyCombination) -> Self {
        self.shortcuts.insert(shortcut_id.into(), combination);
        self
    }

    pub fn combination_for(&self, shortcut_id: &str) -> Option<&KeyCombination> {
        self.shortcuts.get(shortcut_id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a serialized scheme.
    pub fn from_json(input: &str) -> Result<Self> {
        let scheme: Self = serde_json::from_str(input)?;
        scheme.validate()?;
        Ok(scheme)
    }

    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ShortcutError::InvalidScheme("scheme id is empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(ShortcutError::InvalidScheme(format!(
                "scheme '{}' has no name",
                self.id
            )));
        }
        if let Some(empty) = self.shortcuts.keys().find(|id| id.trim().is_empty()) {
            return Err(ShortcutError::InvalidScheme(format!(
                "scheme '{}' maps an empty shortcut id '{}'",
                self.id, empty
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::types::Modifier;

    #[test]
    fn parses_minimal_scheme() {
        let json = r#"{
            "id": "vim",
            "name": "Vim-like",
            "shortcuts": {"save": {"modifiers": ["ctrl"], "key": "S"}},
            "createdAt": "2024-12-25T10:30:45Z"
        }"#;
        let scheme = ShortcutScheme::from_json(json).unwrap();
        assert_eq!(scheme.id, "vim");
        assert_eq!(
            scheme.combination_for("save"),
            Some(&KeyCombination::new("s", [Modifier::Ctrl]))
        );
        assert!(scheme.author.is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ShortcutScheme::from_json("{not json"),
            Err(ShortcutError::Json(_))
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        let json = r#"{"id": "x", "name": "X"}"#;
        assert!(ShortcutScheme::from_json(json).is_err());
    }

    #[test]
    fn rejects_empty_id() {
        let json = r#"{"id": " ", "name": "X", "shortcuts": {}, "createdAt": "2024-12-25T10:30:45Z"}"#;
        assert!(matches!(
            ShortcutScheme::from_json(json),
            Err(ShortcutError::InvalidScheme(_))
        ));
    }

    #[test]
    fn rejects_combination_without_key() {
        let json = r#"{
            "id": "x", "name": "X", "createdAt": "2024-12-25T10:30:45Z",
            "shortcuts": {"save": {"modifiers": ["ctrl"], "key": ""}}
        }"#;
        assert!(ShortcutScheme::from_json(json).is_err());
    }

    #[test]
    fn json_uses_camel_case_timestamps() {
        let scheme = ShortcutScheme::new("default", "Default")
            .with_binding("save", KeyCombination::new("s", [Modifier::Ctrl]));
        let json = scheme.to_json().unwrap();
        assert!(json.contains("createdAt"));
        assert!(!json.contains("updatedAt"));
        assert!(json.contains("\"ctrl\""));
    }
}
