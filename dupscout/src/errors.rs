//! Error types for dupscout.
//!
//! Search outcomes are not errors: `Found`, `NotFound` and `Truncated` are all
//! normal terminal states of a search and live in [`crate::results::MatchOutcome`].
//! The errors below come from the edges of the system: input validation done by
//! the caller, configuration loading, and report serialization.
//!
//! ```rust,ignore
//! match prepare_sentences(raw, &config) {
//!     Ok(sentences) => // Run the batch,
//!     Err(DupError::Validation(e)) => // Reject the request,
//!     Err(e) => // Handle other errors
//! }
//! ```

use thiserror::Error;

/// Result type for dupscout operations
pub type DupResult<T> = Result<T, DupError>;

/// Errors that can occur around a duplicate check
#[derive(Error, Debug)]
pub enum DupError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Rejections produced while preparing caller input for a batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least 2 sentences are required, got {0}")]
    TooFewSentences(usize),
    #[error("at most {max} sentences are allowed, got {actual}")]
    TooManySentences { max: usize, actual: usize },
    #[error("sentence {index} is too long ({length} > {max} characters)")]
    SentenceTooLong {
        index: usize,
        length: usize,
        max: usize,
    },
    #[error("at least 2 non-empty sentences are required, got {0}")]
    TooFewNonEmpty(usize),
}

impl DupError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Returns true when the error was caused by caller input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<config::ConfigError> for DupError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
