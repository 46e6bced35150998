// ABOUTME: GenerationBackend trait shared by prompt-template and remote HTTP strategies
// ABOUTME: Defines the generation request and the provider/transport error split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generation Backends
//!
//! A flow hands its validated input to exactly one backend. The backend only
//! produces a JSON value; typed decoding and output validation stay in the
//! flow so both strategies share them.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::environment::BackendKind;
use crate::errors::AppError;

/// Everything a backend needs for one call
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Flow name used in logs and provider metadata
    pub flow: &'static str,
    /// Remote service path for the HTTP strategy
    pub remote_path: &'static str,
    /// Prompt template for the prompt strategy
    pub template: &'static str,
    /// JSON schema of the expected output
    pub output_schema: &'a Value,
    /// Input serialized with camelCase keys
    pub payload: &'a Value,
}

/// Backend failure, split by who is at fault
#[derive(Debug, Error)]
pub enum BackendError {
    /// Generative-text provider failed or returned a non-conforming structure
    #[error("provider error: {0}")]
    Provider(#[source] AppError),
    /// Remote call failed: non-2xx status, network error, or unparsable body
    #[error("transport error: {message}")]
    Transport {
        /// What went wrong
        message: String,
        /// HTTP status when the service answered
        status: Option<u16>,
    },
}

impl BackendError {
    /// Transport failure without an HTTP status
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
        }
    }
}

/// Reachability of the service behind a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackendHealth {
    /// Provider identifier
    pub provider: &'static str,
    /// Whether the provider answered its health probe
    pub reachable: bool,
}

/// A strategy that turns a flow input into a raw JSON output
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Which strategy this is
    fn kind(&self) -> BackendKind;

    /// Produce the raw output value for one request
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<Value, BackendError>;

    /// Probe the service behind this backend; `None` when it has no probe
    async fn health(&self) -> Option<BackendHealth> {
        None
    }
}

/// Prompt backend stand-in used when no provider could be configured
///
/// Every call fails with a provider error carrying the configuration problem.
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    /// Create a backend that always fails with `reason`
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl GenerationBackend for UnavailableBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Prompt
    }

    async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<Value, BackendError> {
        Err(BackendError::Provider(AppError::config(self.reason.clone())))
    }

    async fn health(&self) -> Option<BackendHealth> {
        Some(BackendHealth {
            provider: "unavailable",
            reachable: false,
        })
    }
}
