// ABOUTME: Generic flow pipeline: validate input, generate, decode and validate output
// ABOUTME: Applies the configured transport failure policy with the use case's fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use fitness_ai_core::errors::ValidationError;
use fitness_ai_core::models::Schema;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::backend::{BackendError, GenerationBackend, GenerationRequest};
use super::definitions::{required_fields, UseCase};
use crate::config::environment::{BackendKind, TransportFailurePolicy};
use crate::errors::{AppError, ErrorCode};

/// Flow failure taxonomy
#[derive(Debug, Error)]
pub enum FlowError {
    /// Input did not satisfy its schema; no backend call was made
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Generative-text provider failed or returned a non-conforming structure
    #[error("{flow}: {source}")]
    Provider {
        /// Flow name
        flow: &'static str,
        /// Underlying provider error
        source: AppError,
    },
    /// Remote call failed
    #[error("{flow}: transport failure: {message}")]
    Transport {
        /// Flow name
        flow: &'static str,
        /// What went wrong
        message: String,
        /// HTTP status when the service answered
        status: Option<u16>,
    },
    /// Output is missing required fields or violates its schema
    #[error("{flow}: output contract violated: {reason}")]
    Contract {
        /// Flow name
        flow: &'static str,
        /// Offending fields
        reason: String,
    },
}

impl FlowError {
    /// Short label for structured logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Provider { .. } => "provider",
            Self::Transport { .. } => "transport",
            Self::Contract { .. } => "contract",
        }
    }
}

/// One use case bound to its configured backend and failure policy
pub struct Flow<U: UseCase> {
    backend: Arc<dyn GenerationBackend>,
    policy: TransportFailurePolicy,
    use_case: PhantomData<fn() -> U>,
}

impl<U: UseCase> Clone for Flow<U> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            policy: self.policy,
            use_case: PhantomData,
        }
    }
}

impl<U: UseCase> fmt::Debug for Flow<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("name", &U::NAME)
            .field("backend", &self.backend.kind())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<U: UseCase> Flow<U> {
    /// Bind a use case to a backend
    #[must_use]
    pub fn new(backend: Arc<dyn GenerationBackend>, policy: TransportFailurePolicy) -> Self {
        Self {
            backend,
            policy,
            use_case: PhantomData,
        }
    }

    /// Strategy serving this flow
    #[must_use]
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Transport failure policy
    #[must_use]
    pub const fn policy(&self) -> TransportFailurePolicy {
        self.policy
    }

    /// Run the flow
    ///
    /// # Errors
    ///
    /// - [`FlowError::Validation`] before any backend call when the input is invalid
    /// - [`FlowError::Provider`] when the prompt backend fails
    /// - [`FlowError::Transport`] when the remote call fails under the propagate policy
    /// - [`FlowError::Contract`] when the provider output misses required fields
    #[instrument(skip_all, fields(flow = U::NAME, backend = %self.backend.kind()))]
    pub async fn execute(&self, input: &U::Input) -> Result<U::Output, FlowError> {
        input.validate()?;

        match self.generate(input).await {
            Err(FlowError::Transport {
                message, status, ..
            }) if self.policy == TransportFailurePolicy::Fallback => {
                warn!(
                    status,
                    error = %message,
                    "Transport failure, answering with fallback output"
                );
                Ok(U::fallback(input))
            }
            other => other,
        }
    }

    async fn generate(&self, input: &U::Input) -> Result<U::Output, FlowError> {
        let payload = serde_json::to_value(input).map_err(|e| FlowError::Provider {
            flow: U::NAME,
            source: AppError::from(e),
        })?;
        let schema = U::output_schema();
        let request = GenerationRequest {
            flow: U::NAME,
            remote_path: U::REMOTE_PATH,
            template: U::TEMPLATE,
            output_schema: &schema,
            payload: &payload,
        };

        let value = self
            .backend
            .generate(&request)
            .await
            .map_err(|e| match e {
                BackendError::Provider(source) => FlowError::Provider {
                    flow: U::NAME,
                    source,
                },
                BackendError::Transport { message, status } => FlowError::Transport {
                    flow: U::NAME,
                    message,
                    status,
                },
            })?;

        debug!("Backend produced output");
        self.decode(&schema, value)
    }

    /// A malformed remote body counts as a transport failure; a malformed
    /// provider body is a provider or contract failure.
    fn decode(&self, schema: &Value, value: Value) -> Result<U::Output, FlowError> {
        let remote = self.backend.kind() == BackendKind::Http;
        let transport = |message: String| FlowError::Transport {
            flow: U::NAME,
            message,
            status: None,
        };
        let contract = |reason: String| FlowError::Contract {
            flow: U::NAME,
            reason,
        };

        let missing = missing_fields(schema, &value);
        if !missing.is_empty() {
            let reason = format!("missing required fields: {}", missing.join(", "));
            return Err(if remote { transport(reason) } else { contract(reason) });
        }

        let output: U::Output = serde_json::from_value(value).map_err(|e| {
            if remote {
                transport(format!("response does not match the output schema: {e}"))
            } else {
                FlowError::Provider {
                    flow: U::NAME,
                    source: AppError::new(
                        ErrorCode::InvalidResponse,
                        format!("output does not match the schema: {e}"),
                    ),
                }
            }
        })?;

        output.validate().map_err(|e| {
            if remote {
                transport(e.to_string())
            } else {
                contract(e.to_string())
            }
        })?;
        Ok(output)
    }
}

fn missing_fields(schema: &Value, value: &Value) -> Vec<String> {
    required_fields(schema)
        .into_iter()
        .filter(|field| value.get(*field).is_none_or(Value::is_null))
        .map(str::to_owned)
        .collect()
}
