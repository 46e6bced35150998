// ABOUTME: Google Gemini provider producing schema-constrained JSON output
// ABOUTME: Sends prompt text plus inline image parts with responseMimeType application/json
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of [`LlmProvider`] for Google's Gemini models using the
//! `generateContent` method with `responseSchema`.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. `GEMINI_MODEL` overrides the default model.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, instrument};

use super::{LlmCapabilities, LlmProvider, MediaPart, StructuredRequest};
use crate::errors::{AppError, ErrorCode};

/// Environment variable for Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model to use
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Base URL for the Gemini API
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key; the key never appears in a URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// JSON schema keywords Gemini's `responseSchema` rejects
const UNSUPPORTED_SCHEMA_KEYS: &[&str] = &["additionalProperties", "$schema", "title"];

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl From<&MediaPart> for ContentPart {
    fn from(media: &MediaPart) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: media.mime_type.clone(),
                data: media.data.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: DEFAULT_MODEL.to_owned(),
            base_url: API_BASE_URL.to_owned(),
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::config(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point the provider at a different API root (proxies, tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    fn build_request(request: &StructuredRequest) -> GeminiRequest {
        let mut parts = vec![ContentPart::Text {
            text: request.prompt.clone(),
        }];
        parts.extend(request.media.iter().map(ContentPart::from));

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: to_gemini_schema(&request.output_schema),
                temperature: request.temperature,
                candidate_count: 1,
            },
        }
    }

    fn extract_json(response: &GeminiResponse) -> Result<Value, AppError> {
        let candidate = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .ok_or_else(|| AppError::external_service("Gemini", "No candidates in response"))?;

        let text = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| match part {
                        ContentPart::Text { text } => Some(text.as_str()),
                        ContentPart::InlineData { .. } => None,
                    })
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::external_service(
                "Gemini",
                format!(
                    "Empty response (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            ));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, "Gemini returned non-JSON content");
            AppError::new(
                ErrorCode::InvalidResponse,
                format!("Gemini returned invalid JSON: {e}"),
            )
        })
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                "AI service quota exceeded. Please wait a moment and try again.",
            )
            .with_details(Value::String(message)),
            _ => AppError::external_service("Gemini", format!("API error ({status}): {message}")),
        }
    }
}

/// Convert a JSON schema into the OpenAPI subset Gemini accepts
///
/// Type names are upper-cased and unsupported keywords dropped, recursively.
#[must_use]
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut converted = Map::new();
            for (key, value) in map {
                if UNSUPPORTED_SCHEMA_KEYS.contains(&key.as_str()) {
                    continue;
                }
                let value = match (key.as_str(), value) {
                    ("type", Value::String(kind)) => Value::String(kind.to_uppercase()),
                    // Property names are user keys, not schema keywords
                    ("properties", Value::Object(props)) => Value::Object(
                        props
                            .iter()
                            .map(|(name, prop)| (name.clone(), to_gemini_schema(prop)))
                            .collect(),
                    ),
                    _ => to_gemini_schema(value),
                };
                converted.insert(key.clone(), value);
            }
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::full_featured()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model), media = request.media.len()))]
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<Value, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");
        let gemini_request = Self::build_request(request);

        debug!("Sending structured request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("Gemini request failed: {}", e.without_url()),
                )
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service(
                "Gemini",
                format!("Failed to read response: {}", e.without_url()),
            )
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response envelope");
                AppError::external_service("Gemini", format!("Failed to parse response: {e}"))
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service("Gemini", error.message));
        }

        let value = Self::extract_json(&gemini_response)?;
        debug!("Received structured Gemini response");
        Ok(value)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(
                    "Gemini",
                    format!("Health check failed: {}", e.without_url()),
                )
            })?;

        Ok(response.status().is_success())
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
