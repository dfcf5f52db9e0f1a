//! LLM client: schema-constrained text generation over Gemini or an
//! OpenAI-compatible endpoint.
//!
//! One call to [`LlmClient::generate`] is exactly one HTTP round trip. There
//! is no retry loop, no cache and no client-side deadline; a caller that
//! wants any of those layers it on top.

use std::env;
use std::time::Instant;

use macroplan_core::config::{DEFAULT_GEMINI_BASE_URL, ProviderConfig, ProviderKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::error::LlmError;
use crate::schema::SchemaDialect;
use crate::types::{ProviderRequest, ProviderResponse};

/// Provider backend for generation.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    /// Google Gemini `generateContent`.
    Gemini { base_url: String, api_key: String },
    /// OpenAI-compatible chat completions.
    OpenAiCompatible { base_url: String, api_key: String },
    /// No backend configured; every call fails.
    None,
}

// ---------------------------------------------------------------------------
// Gemini wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<GeminiError>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// The provider client. Cheap to clone; clones share the HTTP pool.
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: LlmProvider,
    http: Client,
    model: String,
    temperature: Option<f32>,
}

impl LlmClient {
    /// Create a new client.
    #[must_use]
    pub fn new(provider: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            http: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Create a client with no backend (all calls fail).
    #[must_use]
    pub fn none() -> Self {
        Self::new(LlmProvider::None, String::new())
    }

    /// Build a client from configuration, reading the API key from the
    /// configured environment variable.
    ///
    /// # Errors
    /// Returns [`LlmError::ConfigError`] if a key is required but not set.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, LlmError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let provider = match config.kind {
            ProviderKind::None => LlmProvider::None,
            ProviderKind::Gemini => LlmProvider::Gemini {
                base_url,
                api_key: read_api_key(&config.api_key_env)?,
            },
            ProviderKind::OpenAi => {
                if base_url == DEFAULT_GEMINI_BASE_URL {
                    return Err(LlmError::ConfigError(
                        "provider.base_url must be set for an openai provider".into(),
                    ));
                }
                LlmProvider::OpenAiCompatible {
                    base_url,
                    api_key: read_api_key(&config.api_key_env)?,
                }
            }
        };
        Ok(Self::new(provider, config.model.clone()).with_temperature(config.temperature))
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check if the client has a backend configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self.provider, LlmProvider::None)
    }

    /// Send one request and return the generated text.
    ///
    /// # Errors
    /// Returns `Err` on transport failure, a non-success status, an error
    /// body, or an empty generation.
    pub async fn generate(&self, request: &ProviderRequest) -> Result<ProviderResponse, LlmError> {
        let start = Instant::now();
        let (text, tokens_generated) = match &self.provider {
            LlmProvider::None => {
                return Err(LlmError::Unavailable("No LLM provider configured".into()));
            }
            LlmProvider::Gemini { base_url, api_key } => {
                self.generate_gemini(base_url, api_key, request).await?
            }
            LlmProvider::OpenAiCompatible { base_url, api_key } => {
                self.generate_openai(base_url, api_key, request).await?
            }
        };
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        if text.trim().is_empty() {
            warn!(latency_ms, "provider returned empty text");
            return Err(LlmError::EmptyResponse);
        }

        debug!(latency_ms, tokens_generated, "provider response received");
        Ok(ProviderResponse {
            text,
            tokens_generated,
            latency_ms,
            model: self.model.clone(),
        })
    }

    /// Generate using Gemini's `generateContent`.
    async fn generate_gemini(
        &self,
        base_url: &str,
        api_key: &str,
        request: &ProviderRequest,
    ) -> Result<(String, u32), LlmError> {
        let url = format!("{base_url}/models/{}:generateContent", self.model);
        let body = build_gemini_request(request, self.temperature);

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "Gemini request failed"))?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            error!(status = %status, "Gemini API returned error");
            return Err(map_api_error(status.as_u16(), &text));
        }

        let parsed: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, "failed to parse Gemini envelope");
            LlmError::ParseError(format!("Gemini envelope: {e}"))
        })?;
        if let Some(err) = parsed.error {
            return Err(LlmError::RequestFailed(err.message));
        }

        let candidate = parsed.candidates.and_then(|c| c.into_iter().next());
        if let Some(reason) = candidate.as_ref().and_then(|c| c.finish_reason.as_deref()) {
            if reason != "STOP" {
                warn!(finish_reason = reason, "Gemini generation did not stop cleanly");
            }
        }
        let text: String = candidate
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        let tokens = parsed
            .usage_metadata
            .and_then(|u| u.candidates)
            .unwrap_or(0);

        Ok((text, tokens))
    }

    /// Generate using an OpenAI-compatible chat completions API.
    async fn generate_openai(
        &self,
        base_url: &str,
        api_key: &str,
        request: &ProviderRequest,
    ) -> Result<(String, u32), LlmError> {
        let url = format!("{base_url}/v1/chat/completions");
        let body = build_openai_request(request, &self.model, self.temperature);

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "OpenAI API request failed"))?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            error!(status = %status, "OpenAI API returned error");
            return Err(map_api_error(status.as_u16(), &text));
        }

        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| LlmError::ParseError(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();
        let tokens = json["usage"]["completion_tokens"]
            .as_u64()
            .and_then(|t| u32::try_from(t).ok())
            .unwrap_or(0);

        Ok((content, tokens))
    }
}

fn read_api_key(var: &str) -> Result<String, LlmError> {
    match env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(LlmError::ConfigError(format!(
            "{var} environment variable not set"
        ))),
    }
}

fn build_gemini_request(request: &ProviderRequest, temperature: Option<f32>) -> GeminiRequest<'_> {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user"),
            parts: vec![TextPart {
                text: &request.prompt,
            }],
        }],
        system_instruction: request.system.as_deref().map(|system| GeminiContent {
            role: None,
            parts: vec![TextPart { text: system }],
        }),
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: request.schema.to_value(SchemaDialect::OpenApi),
            temperature,
        },
    }
}

fn build_openai_request(
    request: &ProviderRequest,
    model: &str,
    temperature: Option<f32>,
) -> serde_json::Value {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &request.system {
        messages.push(json!({ "role": "system", "content": system }));
    }
    messages.push(json!({ "role": "user", "content": request.prompt }));

    let mut body = json!({
        "model": model,
        "messages": messages,
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": request.kind.schema_name(),
                "schema": request.schema.to_value(SchemaDialect::JsonSchema),
            }
        },
    });
    if let Some(t) = temperature {
        body["temperature"] = json!(t);
    }
    body
}

/// Map a non-success status to an error, pulling the provider's message out
/// of a `{"error": {"message": ...}}` body when present.
fn map_api_error(status: u16, body: &str) -> LlmError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error)
        .map_or_else(|| body.to_string(), |e| e.message);

    match status {
        429 => LlmError::QuotaExceeded(message),
        _ => LlmError::Http { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{daily_plan_schema, shake_schema};
    use crate::types::RequestKind;

    fn meal_request() -> ProviderRequest {
        ProviderRequest {
            kind: RequestKind::MealPlan,
            system: Some("You are a nutritionist.".into()),
            prompt: "Plan my day.".into(),
            schema: daily_plan_schema(),
        }
    }

    #[test]
    fn gemini_body_carries_schema_and_system_instruction() {
        let request = meal_request();
        let body = serde_json::to_value(build_gemini_request(&request, None)).expect("serialize");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan my day.");
        assert_eq!(body["system_instruction"]["parts"][0]["text"], "You are a nutritionist.");
        assert_eq!(body["generation_config"]["response_mime_type"], "application/json");
        assert_eq!(body["generation_config"]["response_schema"]["type"], "OBJECT");
        assert!(body["generation_config"].get("temperature").is_none());
    }

    #[test]
    fn gemini_body_omits_absent_system_instruction() {
        let request = ProviderRequest {
            kind: RequestKind::Shake,
            system: None,
            prompt: "Shake it.".into(),
            schema: shake_schema(),
        };
        let body = serde_json::to_value(build_gemini_request(&request, Some(0.5))).expect("serialize");
        assert!(body.get("system_instruction").is_none());
        assert_eq!(body["generation_config"]["temperature"], 0.5);
    }

    #[test]
    fn openai_body_uses_json_schema_format() {
        let body = build_openai_request(&meal_request(), "gpt-4o-mini", None);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["response_format"]["json_schema"]["name"], "daily_plan");
        assert_eq!(body["response_format"]["json_schema"]["schema"]["type"], "object");
    }

    #[test]
    fn quota_errors_are_distinguished() {
        let err = map_api_error(429, r#"{"error": {"message": "Resource exhausted"}}"#);
        assert!(matches!(err, LlmError::QuotaExceeded(ref m) if m == "Resource exhausted"));

        let err = map_api_error(500, "upstream exploded");
        assert!(matches!(err, LlmError::Http { status: 500, ref message } if message == "upstream exploded"));
    }

    #[tokio::test]
    async fn none_provider_is_unavailable() {
        let client = LlmClient::none();
        assert!(!client.is_available());
        let err = client.generate(&meal_request()).await.expect_err("no backend");
        assert!(matches!(err, LlmError::Unavailable(_)));
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = ProviderConfig {
            api_key_env: "MACROPLAN_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..ProviderConfig::default()
        };
        let err = LlmClient::from_config(&config).expect_err("key missing");
        assert!(matches!(err, LlmError::ConfigError(_)));
    }

    #[test]
    fn from_config_none_needs_no_key() {
        let config = ProviderConfig {
            kind: ProviderKind::None,
            api_key_env: "MACROPLAN_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..ProviderConfig::default()
        };
        let client = LlmClient::from_config(&config).expect("none provider");
        assert!(!client.is_available());
    }

    #[test]
    fn from_config_openai_needs_its_own_base_url() {
        let config = ProviderConfig {
            kind: ProviderKind::OpenAi,
            ..ProviderConfig::default()
        };
        let err = LlmClient::from_config(&config).expect_err("gemini url for openai");
        assert!(matches!(err, LlmError::ConfigError(ref m) if m.contains("base_url")));
    }

    #[test]
    fn from_config_openai_with_base_url_reads_key() {
        let config = ProviderConfig {
            kind: ProviderKind::OpenAi,
            base_url: "https://api.openai.com/".into(),
            model: "gpt-4o-mini".into(),
            api_key_env: "MACROPLAN_TEST_KEY_THAT_IS_NEVER_SET".into(),
            temperature: None,
        };
        // Past the URL check, the missing key is what fails.
        let err = LlmClient::from_config(&config).expect_err("key missing");
        assert!(matches!(err, LlmError::ConfigError(ref m) if m.contains("MACROPLAN_TEST_KEY")));
    }
}
