//! LLM error types.
//!
//! [`LlmError`] is the internal diagnostic taxonomy and is logged. Callers
//! only ever see [`GenerationFailure`], whose `Display` is a fixed
//! user-safe message.

use thiserror::Error;

/// Errors that can occur while talking to the generative provider.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// HTTP request failed before a response arrived.
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    /// Provider answered with a non-success status.
    #[error("LLM provider returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Provider error message, or the raw body.
        message: String,
    },

    /// Provider rejected the call for quota or rate limits (HTTP 429).
    #[error("LLM provider quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Provider answered successfully but produced no text.
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// LLM response was not valid JSON.
    #[error("Failed to parse LLM response as JSON: {0}")]
    ParseError(String),

    /// LLM response did not match expected schema.
    #[error("LLM output schema validation failed: {0}")]
    SchemaValidation(String),

    /// LLM provider is unavailable.
    #[error("LLM provider unavailable: {0}")]
    Unavailable(String),

    /// Configuration error.
    #[error("LLM configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            LlmError::Unavailable(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}

/// User-safe message for a failed meal plan.
pub const MEAL_PLAN_FAILURE_MESSAGE: &str = "Failed to generate meal plan. Please try again.";
/// User-safe message for a failed shake recipe.
pub const SHAKE_FAILURE_MESSAGE: &str = "Failed to generate shake recipe.";

/// The single failure kind surfaced by the request clients.
///
/// `Display` prints only [`GenerationFailure::user_message`]; the diagnostic
/// cause is reachable through [`std::error::Error::source`] and
/// [`GenerationFailure::cause`].
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GenerationFailure {
    message: &'static str,
    #[source]
    cause: LlmError,
}

impl GenerationFailure {
    /// Failure of the meal-plan flow.
    #[must_use]
    pub fn meal_plan(cause: LlmError) -> Self {
        Self {
            message: MEAL_PLAN_FAILURE_MESSAGE,
            cause,
        }
    }

    /// Failure of the shake flow.
    #[must_use]
    pub fn shake(cause: LlmError) -> Self {
        Self {
            message: SHAKE_FAILURE_MESSAGE,
            cause,
        }
    }

    /// Message safe to present to the end user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        self.message
    }

    /// Internal diagnostic cause.
    #[must_use]
    pub fn cause(&self) -> &LlmError {
        &self.cause
    }
}
