// ABOUTME: Prompt-template generation backend backed by a generative-text provider
// ABOUTME: Renders the flow template from input fields and requests schema-conforming JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::backend::{BackendError, BackendHealth, GenerationBackend, GenerationRequest};
use super::template::{self, TemplateError};
use crate::config::environment::BackendKind;
use crate::errors::AppError;
use crate::llm::{LlmProvider, StructuredRequest};

/// Backend that renders a prompt and delegates to an [`LlmProvider`]
#[derive(Clone)]
pub struct PromptBackend {
    provider: Arc<dyn LlmProvider>,
    temperature: Option<f32>,
}

impl PromptBackend {
    /// Create a backend around a provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            temperature: None,
        }
    }

    /// Set the sampling temperature for every call, or keep the provider default
    #[must_use]
    pub const fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Provider name, for logs
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}

impl From<TemplateError> for BackendError {
    fn from(error: TemplateError) -> Self {
        let app_error = match error {
            TemplateError::EngineUnavailable => {
                AppError::internal("prompt template engine unavailable")
            }
            TemplateError::Media(e) => AppError::from(e),
        };
        Self::Provider(app_error)
    }
}

#[async_trait]
impl GenerationBackend for PromptBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Prompt
    }

    #[instrument(skip(self, request), fields(flow = request.flow, provider = self.provider.name()))]
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<Value, BackendError> {
        let rendered = template::render(request.template, request.payload)?;

        let mut structured = StructuredRequest::new(rendered.text, request.output_schema.clone())
            .with_media(rendered.media);
        if let Some(temperature) = self.temperature {
            structured = structured.with_temperature(temperature);
        }

        debug!(media = structured.media.len(), "Submitting rendered prompt");
        self.provider
            .generate_structured(&structured)
            .await
            .map_err(BackendError::Provider)
    }

    async fn health(&self) -> Option<BackendHealth> {
        let reachable = match self.provider.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(provider = self.provider_name(), error = %e, "Provider health check failed");
                false
            }
        };
        Some(BackendHealth {
            provider: self.provider_name(),
            reachable,
        })
    }
}
