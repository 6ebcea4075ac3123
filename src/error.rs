//! Error types for nafnaleit.
//!
//! All errors are strongly typed using thiserror. Collaborator failures
//! (lexicon, directory) keep their own enums next to the traits that
//! produce them and are wrapped by [`NafnError`] at the crate boundary.

use thiserror::Error;

use crate::directory::DirectoryError;
use crate::lexicon::LexiconError;

/// Validation errors that occur during input or configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A configuration value is out of range.
    #[error("Configuration field '{field}' is invalid: {reason}")]
    InvalidConfig {
        /// Offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A query pattern failed to compile.
    #[error("Invalid query pattern '{pattern}': {reason}")]
    InvalidQueryPattern {
        /// The pattern as built.
        pattern: String,
        /// Compiler message.
        reason: String,
    },
}

/// Top-level error type for nafnaleit.
///
/// Empty input and ambiguous matches are not errors; this enum only covers
/// conditions that abort the current request.
#[derive(Debug, Error)]
pub enum NafnError {
    /// Invalid input or configuration.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The lexicon failed.
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// The contact directory failed.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl NafnError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the lexicon collaborator failed.
    #[must_use]
    pub const fn is_lexicon(&self) -> bool {
        matches!(self, Self::Lexicon(_))
    }

    /// Returns true if the directory collaborator failed.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Returns true if the caller may retry the request.
    ///
    /// The core itself never retries; this only classifies the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Lexicon(e) => matches!(e, LexiconError::Unavailable(_)),
            Self::Directory(e) => matches!(e, DirectoryError::Unavailable(_)),
        }
    }
}

/// Result type alias for nafnaleit operations.
pub type NafnResult<T> = Result<T, NafnError>;
