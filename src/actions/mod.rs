// ABOUTME: Server-side action wrappers around flows with request logging and error masking
// ABOUTME: Enforces the primary output field and maps flow failures to one message per use case
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Action Wrappers
//!
//! An action is what the HTTP layer calls. It never exposes why a flow
//! failed: validation errors keep their field list, a missing primary output
//! becomes `Invalid response from <flow>.`, and everything else becomes the
//! use case's generic message. The underlying error is logged.

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::errors::{AppError, ErrorCode};
use crate::flows::{Flow, FlowError, FlowRegistry, UseCase};
use crate::session::SessionContext;

/// Longest logged payload; photos are base64 and would flood the logs
const MAX_LOGGED_CHARS: usize = 1024;

fn log_json<T: Serialize>(value: &T) -> String {
    let text = serde_json::to_string(value)
        .unwrap_or_else(|e| format!("<unserializable payload: {e}>"));
    if text.chars().count() > MAX_LOGGED_CHARS {
        let head: String = text.chars().take(MAX_LOGGED_CHARS).collect();
        format!("{head}... ({} chars total)", text.chars().count())
    } else {
        text
    }
}

/// Action wrapper for one use case
pub struct Action<U: UseCase> {
    flow: Flow<U>,
}

impl<U: UseCase> Clone for Action<U> {
    fn clone(&self) -> Self {
        Self {
            flow: self.flow.clone(),
        }
    }
}

impl<U: UseCase> Action<U> {
    /// Wrap a flow
    #[must_use]
    pub const fn new(flow: Flow<U>) -> Self {
        Self { flow }
    }

    /// Action over the registry's configured flow for `U`
    #[must_use]
    pub fn from_registry(registry: &FlowRegistry) -> Self {
        Self::new(registry.flow::<U>())
    }

    /// Underlying flow
    #[must_use]
    pub const fn flow(&self) -> &Flow<U> {
        &self.flow
    }

    /// Run the flow for `session`
    ///
    /// # Errors
    ///
    /// - `InvalidInput` with the offending fields when the input is invalid
    /// - `InvalidResponse` when the output lacks its primary field
    /// - `ExternalServiceError` with the use case's generic message otherwise
    #[instrument(
        skip_all,
        fields(action = U::NAME, user_id = session.user_id().unwrap_or("anonymous"))
    )]
    pub async fn handle(
        &self,
        session: &SessionContext,
        input: U::Input,
    ) -> Result<U::Output, AppError> {
        info!(payload = %log_json(&input), "Request payload for {}", U::NAME);

        match self.flow.execute(&input).await {
            Ok(output) => {
                info!(output = %log_json(&output), "Raw output from {}", U::NAME);
                if U::has_primary_output(&output) {
                    Ok(output)
                } else {
                    error!(output = %log_json(&output), "Missing expected fields in {} output", U::NAME);
                    Err(AppError::invalid_response(U::NAME))
                }
            }
            Err(FlowError::Validation(e)) => {
                warn!(error = %e, "Rejected invalid input");
                Err(e.into())
            }
            Err(FlowError::Contract { reason, .. }) => {
                error!(reason = %reason, "Missing expected fields in {} output", U::NAME);
                Err(AppError::invalid_response(U::NAME))
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), "{} failed", U::NAME);
                Err(AppError::new(ErrorCode::ExternalServiceError, U::GENERIC_ERROR))
            }
        }
    }
}
