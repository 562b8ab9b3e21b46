//! Error types for Veil session operations.

use thiserror::Error;
use veil_core::VeilError;

/// Errors that can occur while driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Rejected input or collaborator failure from the core.
    #[error(transparent)]
    Core(#[from] VeilError),

    /// Tried to remove a pattern that is not configured.
    #[error("Pattern '{0}' is not configured")]
    UnknownPattern(String),

    /// Settings could not be written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err: SessionError = VeilError::Pattern("too long".into()).into();
        assert_eq!(err.to_string(), "Pattern rejected: too long");
    }

    #[test]
    fn test_unknown_pattern_display() {
        let err = SessionError::UnknownPattern("42".into());
        assert!(err.to_string().contains("'42'"));
    }
}
