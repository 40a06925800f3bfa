use thiserror::Error;
use tracing::{error, warn};

use crate::shortcuts::{ShortcutConflict, ShortcutParseError};

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning, // Yellow - recoverable caller misuse or bad data
    Error,   // Red - operation refused
}

/// Errors returned by engine operations.
///
/// None of these are fatal: each one stands for a refused call that left the
/// engine state untouched.
#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error("shortcut '{0}' is already registered")]
    DuplicateId(String),

    #[error("unknown shortcut '{0}'")]
    UnknownShortcut(String),

    #[error("unknown scheme '{0}'")]
    UnknownScheme(String),

    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("provider '{0}' is already registered")]
    DuplicateProvider(String),

    #[error("'{id}' conflicts with {} other shortcut(s)", .conflicts.len())]
    Conflict {
        id: String,
        conflicts: Vec<ShortcutConflict>,
    },

    #[error("invalid scheme: {0}")]
    InvalidScheme(String),

    #[error("invalid combination: {0}")]
    Parse(#[from] ShortcutParseError),

    #[error("failed to read or write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShortcutError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Conflict { .. } => ErrorSeverity::Error,
            Self::Io { .. } => ErrorSeverity::Error,
            _ => ErrorSeverity::Warning,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Conflict { conflicts, .. } => {
                let others: Vec<&str> = conflicts.iter().map(|c| c.existing_id.as_str()).collect();
                format!("Already used by: {}", others.join(", "))
            }
            Self::InvalidScheme(_) | Self::Json(_) => "The scheme file could not be read".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShortcutError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the caller doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use shortcut_engine::error::ResultExt;
///
/// // Log and continue if a config file is unreadable
/// let config = read_config().log_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_is_error_severity() {
        let err = ShortcutError::Conflict {
            id: "save".to_string(),
            conflicts: Vec::new(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert_eq!(
            ShortcutError::DuplicateId("save".to_string()).severity(),
            ErrorSeverity::Warning
        );
    }

    #[test]
    fn log_err_returns_none_on_error() {
        let result: std::result::Result<u32, &str> = Err("nope");
        assert_eq!(result.log_err(), None);
        let ok: std::result::Result<u32, &str> = Ok(7);
        assert_eq!(ok.warn_on_err(), Some(7));
    }

    #[test]
    fn parse_error_converts() {
        let err: ShortcutError = ShortcutParseError::Empty.into();
        assert!(matches!(err, ShortcutError::Parse(ShortcutParseError::Empty)));
    }
}
