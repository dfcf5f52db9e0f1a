//! Error types for the macroplan core library.

use thiserror::Error;

/// Top-level error type for profile validation and configuration loading.
#[derive(Error, Debug)]
pub enum MacroplanError {
    /// A profile field or ingredient selection is malformed or out of range.
    ///
    /// Raised before any provider call is made.
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Which input failed validation.
        field: &'static str,
        /// Human-readable reason, safe to show to the end user.
        reason: String,
    },

    /// Configuration error (bad TOML, missing region table, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MacroplanError {
    /// Shorthand for a [`MacroplanError::Validation`].
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error was raised by input validation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, MacroplanError>;
