// ABOUTME: Generative-text provider abstraction for structured JSON generation
// ABOUTME: Defines the LlmProvider contract (Gemini, OpenAI-compatible) used by prompt-backed flows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! Prompt-backed flows submit a rendered prompt, optional inline images and
//! the JSON schema of the expected output. Providers return the decoded JSON
//! value; decoding into a typed output happens in the flow layer.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitness_ai_server::llm::{GeminiProvider, LlmProvider, StructuredRequest};
//! use serde_json::json;
//!
//! async fn example(provider: &GeminiProvider) {
//!     let request = StructuredRequest::new(
//!         "Suggest a stretch.",
//!         json!({"type": "object", "properties": {"stretch": {"type": "string"}}}),
//!     );
//!     let value = provider.generate_structured(&request).await;
//! }
//! ```

mod gemini;
mod openai_compatible;

pub use gemini::{to_gemini_schema, GeminiProvider, DEFAULT_MODEL as GEMINI_DEFAULT_MODEL};
pub use openai_compatible::{
    OpenAiCompatibleConfig, OpenAiCompatibleProvider, DEFAULT_BASE_URL as LOCAL_DEFAULT_BASE_URL,
    DEFAULT_MODEL as LOCAL_DEFAULT_MODEL,
};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::environment::{LlmConfig, LlmProviderKind};
use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// Provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider accepts inline image input
        const VISION = 0b0000_0001;
        /// Provider can be forced to emit JSON
        const JSON_MODE = 0b0000_0010;
        /// Provider enforces a caller-supplied output schema
        const STRUCTURED_OUTPUT = 0b0000_0100;
    }
}

impl LlmCapabilities {
    /// Everything Gemini offers
    #[must_use]
    pub const fn full_featured() -> Self {
        Self::VISION
            .union(Self::JSON_MODE)
            .union(Self::STRUCTURED_OUTPUT)
    }

    /// Check if vision is supported
    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.contains(Self::VISION)
    }

    /// Check if schema-enforced output is supported
    #[must_use]
    pub const fn supports_structured_output(&self) -> bool {
        self.contains(Self::STRUCTURED_OUTPUT)
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Inline image attached to a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPart {
    /// MIME type (`image/png`, `image/jpeg`, ...)
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

impl MediaPart {
    /// Render as a `data:` URI
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// A single structured generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredRequest {
    /// Fully rendered prompt text
    pub prompt: String,
    /// Images referenced by the prompt, in order
    pub media: Vec<MediaPart>,
    /// JSON schema the response must satisfy
    pub output_schema: Value,
    /// Model override (provider default otherwise)
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl StructuredRequest {
    /// Create a text-only request
    #[must_use]
    pub fn new(prompt: impl Into<String>, output_schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            media: Vec::new(),
            output_schema,
            model: None,
            temperature: None,
        }
    }

    /// Attach inline images
    #[must_use]
    pub fn with_media(mut self, media: Vec<MediaPart>) -> Self {
        self.media = media;
        self
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Generative-text provider used by prompt-backed flows
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini", "openai_compatible")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Generate a JSON value conforming to `request.output_schema`
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<Value, AppError>;

    /// Check if the provider is reachable and the credentials are valid
    async fn health_check(&self) -> Result<bool, AppError>;
}

/// Build the provider selected by configuration
///
/// # Errors
///
/// Returns an error if the selected provider is missing credentials or its
/// HTTP client cannot be built
pub fn provider_from_config(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, AppError> {
    let provider: Arc<dyn LlmProvider> = match config.provider {
        LlmProviderKind::Gemini => {
            let api_key = config.gemini_api_key.clone().ok_or_else(|| {
                AppError::config("GEMINI_API_KEY is required for the gemini provider")
            })?;
            let mut gemini = GeminiProvider::new(api_key).with_default_model(&config.gemini_model);
            if let Some(base_url) = &config.gemini_base_url {
                gemini = gemini.with_base_url(base_url);
            }
            Arc::new(gemini)
        }
        LlmProviderKind::OpenAiCompatible => {
            let local = OpenAiCompatibleConfig {
                base_url: config.local_base_url.clone(),
                api_key: config.local_api_key.clone(),
                default_model: config.local_model.clone(),
                ..OpenAiCompatibleConfig::default()
            }
            .with_vision(config.local_vision);
            Arc::new(OpenAiCompatibleProvider::new(local)?)
        }
    };

    info!(
        provider = provider.name(),
        model = provider.default_model(),
        "Initialized generative-text provider"
    );
    Ok(provider)
}
