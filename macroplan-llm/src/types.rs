//! Core types for provider requests and responses.

use std::fmt;

use crate::schema::Schema;

/// Which flow a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// One-day meal plan.
    MealPlan,
    /// Protein shake recipe.
    Shake,
}

impl RequestKind {
    /// Name used for the schema in OpenAI `response_format`.
    #[must_use]
    pub fn schema_name(self) -> &'static str {
        match self {
            Self::MealPlan => "daily_plan",
            Self::Shake => "shake_recipe",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MealPlan => write!(f, "meal_plan"),
            Self::Shake => write!(f, "shake"),
        }
    }
}

/// A fully composed request to the generative provider.
///
/// Built by [`PromptComposer`](crate::prompt::PromptComposer); carries no
/// transport details.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Flow this request belongs to.
    pub kind: RequestKind,
    /// System role instruction (meal-plan flow only).
    pub system: Option<String>,
    /// Natural-language instruction prompt.
    pub prompt: String,
    /// Schema the response must satisfy.
    pub schema: Schema,
}

/// Raw text returned by the provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// The generated text, expected to be a JSON document.
    pub text: String,
    /// How many tokens were generated, when reported.
    pub tokens_generated: u32,
    /// Latency in milliseconds.
    pub latency_ms: u64,
    /// Which model was used.
    pub model: String,
}
