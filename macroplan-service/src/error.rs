//! Planner error type.

use macroplan_core::MacroplanError;
use macroplan_llm::{GenerationFailure, LlmError};
use thiserror::Error;

/// Everything a [`Planner`](crate::Planner) operation can fail with.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Input rejected before any provider call.
    #[error(transparent)]
    Validation(MacroplanError),

    /// The provider call failed. `Display` is the user-safe message.
    #[error(transparent)]
    Generation(#[from] GenerationFailure),

    /// The planner could not be built from configuration.
    #[error("Planner configuration error: {0}")]
    Config(String),
}

impl PlannerError {
    /// Message safe to present to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(MacroplanError::Validation { reason, .. }) => reason.clone(),
            Self::Generation(failure) => failure.user_message().to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the error was raised before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<MacroplanError> for PlannerError {
    fn from(err: MacroplanError) -> Self {
        if err.is_validation() {
            Self::Validation(err)
        } else {
            Self::Config(err.to_string())
        }
    }
}

impl From<LlmError> for PlannerError {
    fn from(err: LlmError) -> Self {
        Self::Config(err.to_string())
    }
}
