//! Error types for the Veil core library.
//!
//! The ceremony hot path never returns errors; these cover the input
//! boundary (pattern entry) and loading of the external collaborators.

use thiserror::Error;

/// Errors that can occur in Veil core operations.
#[derive(Debug, Error)]
pub enum VeilError {
    /// A user-entered pattern was rejected.
    #[error("Pattern rejected: {0}")]
    Pattern(String),

    /// The word list could not be read or parsed.
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// Configuration or persistence error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Veil core operations.
pub type Result<T> = std::result::Result<T, VeilError>;
