//! Request clients for the two generation flows, and the per-request state
//! machine callers track them with.
//!
//! Each `fetch_*` call is one provider round trip. The outcome is either a
//! fully parsed and schema-checked entity or a [`GenerationFailure`]; a
//! partially populated plan is never returned.

use macroplan_core::{DailyPlan, ShakeRecipe};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::client::LlmClient;
use crate::error::{GenerationFailure, LlmError};
use crate::schema::Schema;
use crate::types::{ProviderRequest, RequestKind};

/// Parse provider text into `T`, checking it against `schema` first.
///
/// # Errors
/// [`LlmError::ParseError`] if the text is not JSON,
/// [`LlmError::SchemaValidation`] if a required field is missing or mistyped.
pub fn parse_structured<T: DeserializeOwned>(schema: &Schema, text: &str) -> Result<T, LlmError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| LlmError::ParseError(e.to_string()))?;
    schema.validate(&value).map_err(LlmError::SchemaValidation)?;
    serde_json::from_value(value).map_err(|e| LlmError::SchemaValidation(e.to_string()))
}

async fn fetch_structured<T: DeserializeOwned>(
    client: &LlmClient,
    request: &ProviderRequest,
    expected: RequestKind,
) -> Result<T, LlmError> {
    if request.kind != expected {
        return Err(LlmError::ConfigError(format!(
            "expected a {expected} request, got {}",
            request.kind
        )));
    }
    let response = client.generate(request).await?;
    debug!(
        model = %response.model,
        latency_ms = response.latency_ms,
        tokens = response.tokens_generated,
        "parsing structured response"
    );
    parse_structured(&request.schema, &response.text)
}

// ---------------------------------------------------------------------------
// Flow clients
// ---------------------------------------------------------------------------

/// Fetches one-day meal plans.
#[derive(Debug, Clone)]
pub struct PlanRequestClient {
    client: LlmClient,
}

impl PlanRequestClient {
    /// Wrap a provider client.
    #[must_use]
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Issue the meal-plan request exactly once.
    ///
    /// # Errors
    /// [`GenerationFailure`] on transport, provider, or parse failure. The
    /// underlying [`LlmError`] is logged and kept as the error's source.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4(), kind = %request.kind))]
    pub async fn fetch_plan(&self, request: &ProviderRequest) -> Result<DailyPlan, GenerationFailure> {
        match fetch_structured::<DailyPlan>(&self.client, request, RequestKind::MealPlan).await {
            Ok(plan) => {
                info!(meals = plan.meals.len(), "meal plan generated");
                Ok(plan)
            }
            Err(e) => {
                error!(error = %e, "meal plan generation failed");
                Err(GenerationFailure::meal_plan(e))
            }
        }
    }
}

/// Fetches protein shake recipes.
#[derive(Debug, Clone)]
pub struct RecipeRequestClient {
    client: LlmClient,
}

impl RecipeRequestClient {
    /// Wrap a provider client.
    #[must_use]
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Issue the shake request exactly once.
    ///
    /// # Errors
    /// [`GenerationFailure`] on transport, provider, or parse failure.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4(), kind = %request.kind))]
    pub async fn fetch_recipe(&self, request: &ProviderRequest) -> Result<ShakeRecipe, GenerationFailure> {
        match fetch_structured::<ShakeRecipe>(&self.client, request, RequestKind::Shake).await {
            Ok(recipe) => {
                info!(recipe = %recipe.name, "shake recipe generated");
                Ok(recipe)
            }
            Err(e) => {
                error!(error = %e, "shake recipe generation failed");
                Err(GenerationFailure::shake(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request state
// ---------------------------------------------------------------------------

/// Lifecycle of one logical request slot.
///
/// `Succeeded` and `Failed` are terminal for the request that produced them;
/// [`RequestState::start`] begins a fresh request with a new ticket.
#[derive(Debug, Clone, Default)]
pub enum RequestState<T> {
    /// Nothing requested yet, or cleared.
    #[default]
    Idle,
    /// Waiting on the provider.
    InFlight {
        /// Identifies the request whose result may resolve this slot.
        ticket: Uuid,
    },
    /// Last request produced an entity.
    Succeeded(T),
    /// Last request failed.
    Failed(GenerationFailure),
}

impl<T> RequestState<T> {
    /// Move to `InFlight` and return the ticket the result must present.
    pub fn start(&mut self) -> Uuid {
        let ticket = Uuid::new_v4();
        *self = Self::InFlight { ticket };
        ticket
    }

    /// Record the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when `ticket` is not the
    /// request currently in flight (it was superseded or the slot was reset).
    pub fn resolve(&mut self, ticket: Uuid, outcome: Result<T, GenerationFailure>) -> bool {
        match self {
            Self::InFlight { ticket: current } if *current == ticket => {
                *self = match outcome {
                    Ok(value) => Self::Succeeded(value),
                    Err(failure) => Self::Failed(failure),
                };
                true
            }
            _ => {
                debug!(%ticket, "discarding stale result");
                false
            }
        }
    }

    /// Return to `Idle`, dropping any result.
    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    /// The successful entity, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&GenerationFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}
