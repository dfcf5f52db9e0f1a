//! Configuration for macroplan.
//!
//! Maps directly to `macroplan.toml`. Every section and field has a default,
//! so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::region::RegionCatalog;

/// Gemini REST base URL, the default `provider.base_url`.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MacroplanConfig {
    /// Logging settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Generative provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Region catalog source.
    #[serde(default)]
    pub regions: RegionsConfig,
}

impl MacroplanConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `MacroplanError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::MacroplanError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level or filter directive: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Text,
        }
    }
}

/// Which generative backend to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini `generateContent`.
    #[default]
    Gemini,
    /// Any OpenAI-compatible chat completions endpoint.
    OpenAi,
    /// No backend; every request fails.
    None,
}

/// Generative provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend kind.
    ///
    /// `base_url`, `model` and `api_key_env` default to Gemini values; an
    /// `openai` provider must set `base_url` (and normally `model` and
    /// `api_key_env`) explicitly.
    #[serde(default)]
    pub kind: ProviderKind,
    /// API base URL (no trailing slash).
    #[serde(default = "default_gemini_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Sampling temperature; provider default when unset.
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Gemini,
            base_url: default_gemini_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: None,
        }
    }
}

/// Region catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionsConfig {
    /// TOML file replacing the built-in tables.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl RegionsConfig {
    /// Load the configured catalog, or the built-in one.
    ///
    /// # Errors
    /// Returns an error if a configured file cannot be read or parsed.
    pub fn load(&self) -> crate::error::Result<RegionCatalog> {
        match &self.catalog_path {
            Some(path) => RegionCatalog::from_file(path),
            None => Ok(RegionCatalog::builtin()),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String { "info".to_string() }
fn default_gemini_url() -> String { DEFAULT_GEMINI_BASE_URL.to_string() }
fn default_model() -> String { "gemini-2.5-flash".to_string() }
fn default_api_key_env() -> String { "GEMINI_API_KEY".to_string() }
