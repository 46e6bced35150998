// ABOUTME: Generic OpenAI-compatible provider for local and cloud chat completion endpoints
// ABOUTME: Requests json_schema structured output from Ollama, vLLM, LocalAI and similar servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Generic implementation for any `OpenAI`-compatible chat completions endpoint.
//!
//! ## Configuration
//!
//! - `LOCAL_LLM_BASE_URL`: Base URL (default: <http://localhost:11434/v1> for Ollama)
//! - `LOCAL_LLM_MODEL`: Model to use (default: `qwen2.5:14b-instruct`)
//! - `LOCAL_LLM_API_KEY`: API key (optional, empty for local servers)
//! - `LOCAL_LLM_VISION`: `true` when the model accepts images

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};

use super::{LlmCapabilities, LlmProvider, StructuredRequest};
use crate::errors::{AppError, ErrorCode};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default base URL (Ollama)
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model for local inference
pub const DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";

/// Connection timeout for local servers (more lenient than cloud)
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Request timeout (local inference can be slower)
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Name given to every structured-output schema
const SCHEMA_NAME: &str = "flow_output";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    response_format: Value,
    stream: bool,
}

/// Message with either plain text or multi-part (text + image) content
#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: Value,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
}

impl OpenAiCompatibleConfig {
    /// Create configuration for a local Ollama instance
    #[must_use]
    pub fn ollama(model: &str) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            default_model: model.to_owned(),
            capabilities: LlmCapabilities::JSON_MODE | LlmCapabilities::STRUCTURED_OUTPUT,
        }
    }

    /// Mark the configured model as accepting image input
    #[must_use]
    pub fn with_vision(mut self, vision: bool) -> Self {
        self.capabilities.set(LlmCapabilities::VISION, vision);
        self
    }
}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self::ollama(DEFAULT_MODEL)
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            vision = config.capabilities.supports_vision(),
            "Initializing OpenAI-compatible provider"
        );

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    fn build_request(&self, request: &StructuredRequest) -> OpenAiRequest {
        let content = if request.media.is_empty() {
            Value::String(request.prompt.clone())
        } else {
            let mut parts = vec![json!({"type": "text", "text": request.prompt})];
            parts.extend(request.media.iter().map(|media| {
                json!({"type": "image_url", "image_url": {"url": media.to_data_uri()}})
            }));
            Value::Array(parts)
        };

        OpenAiRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.default_model.clone()),
            messages: vec![OpenAiMessage {
                role: "user",
                content,
            }],
            temperature: request.temperature,
            response_format: json!({
                "type": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "schema": request.output_schema,
                    "strict": true,
                }
            }),
            stream: false,
        }
    }

    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let message = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |e| e.error.message,
        );

        match status.as_u16() {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                "LLM rate limit reached. Please wait a moment and try again.",
            ),
            502..=504 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "Local LLM server is not responding. Is Ollama/vLLM running?",
            ),
            _ => AppError::external_service("LocalLLM", format!("API error ({status}): {message}")),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai_compatible"
    }

    fn display_name(&self) -> &'static str {
        "OpenAI-Compatible"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<Value, AppError> {
        if !request.media.is_empty() && !self.config.capabilities.supports_vision() {
            warn!(media = request.media.len(), "Rejecting images for a text-only model");
            return Err(AppError::config(format!(
                "Model {} is not configured for image input (set LOCAL_LLM_VISION=true)",
                request.model.as_deref().unwrap_or(&self.config.default_model)
            )));
        }

        let body = self.build_request(request);
        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&body);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!(error = %e, "Failed to send request to OpenAI-compatible server");
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("Cannot reach {}: {e}", self.config.base_url),
                )
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::external_service("LocalLLM", format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &text));
        }

        let parsed: OpenAiResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::external_service("LocalLLM", format!("Failed to parse response: {e}"))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service("LocalLLM", "API returned no choices"))?;

        debug!(finish_reason = ?choice.finish_reason, "Received structured completion");

        let content = choice.message.content.unwrap_or_default();
        serde_json::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCode::InvalidResponse,
                format!("Model returned invalid JSON: {e}"),
            )
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let http_request = self.client.get(self.api_url("models"));
        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(
                    "LocalLLM",
                    format!("Health check failed: {}", e.without_url()),
                )
            })?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!(status = %response.status(), "Local LLM health check failed");
        }
        Ok(healthy)
    }
}
