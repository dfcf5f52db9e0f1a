//! # macroplan-llm: generative provider layer for macroplan
//!
//! Turns a profile and its targets into a schema-constrained request, sends it
//! to the configured provider, and parses the answer into a plan entity:
//!   - **Gemini** `generateContent` (default)
//!   - **OpenAI-compatible** chat completions with `json_schema` output
//!   - **None** (every call fails with a user-safe message)
//!
//! All provider calls go through this crate, ensuring:
//!   - The output schema travels with every request
//!   - One network round trip per call, never retried
//!   - Responses are validated against the schema before deserialization
//!   - Provider detail is logged, not shown to end users
//!
//! # Flow
//!
//! ```text
//! UserProfile + MacroTargets + Region
//!        │  PromptComposer
//!        ▼
//! ProviderRequest { system?, prompt, schema }
//!        │  PlanRequestClient / RecipeRequestClient → LlmClient
//!        ▼
//! DailyPlan | ShakeRecipe   or   GenerationFailure
//! ```

#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod generation;
pub mod prompt;
pub mod schema;
pub mod types;

pub use client::{LlmClient, LlmProvider};
pub use error::{GenerationFailure, LlmError};
pub use generation::{PlanRequestClient, RecipeRequestClient, RequestState, parse_structured};
pub use prompt::PromptComposer;
pub use types::{ProviderRequest, ProviderResponse, RequestKind};
