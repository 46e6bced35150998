// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Quiet logging, a scripted generative-text provider and registry builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `fitness_ai_server`

use std::collections::BTreeMap;
use std::env;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use fitness_ai_core::constants::flow_keys;
use fitness_ai_server::config::{BackendKind, FlowSettings, TransportFailurePolicy};
use fitness_ai_server::errors::AppError;
use fitness_ai_server::flows::{FlowRegistry, GenerationBackend, PromptBackend, UnavailableBackend};
use fitness_ai_server::llm::{LlmCapabilities, LlmProvider, StructuredRequest};
use serde_json::Value;
use tokio::time::sleep;
use tracing::Level;

/// Smallest valid PNG-looking data URI accepted by the schemas
pub const PHOTO_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Provider answering every call with one scripted result
pub struct ScriptedProvider {
    response: Result<Value, String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<StructuredRequest>>,
}

impl ScriptedProvider {
    pub fn returning(value: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(value),
            delay: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_owned()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn delayed(value: Value, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(value),
            delay: Some(delay),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<StructuredRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted test provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::full_featured()
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn generate_structured(&self, request: &StructuredRequest) -> Result<Value, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        self.response
            .clone()
            .map_err(|message| AppError::external_service("Scripted", message))
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Every flow on `backend` with `policy`
pub fn all_flows(
    backend: BackendKind,
    policy: TransportFailurePolicy,
) -> BTreeMap<String, FlowSettings> {
    flow_keys::ALL
        .iter()
        .map(|key| {
            (
                (*key).to_owned(),
                FlowSettings {
                    backend,
                    on_transport_failure: policy,
                },
            )
        })
        .collect()
}

/// Registry serving every flow from `provider`
pub fn prompt_registry(provider: Arc<ScriptedProvider>) -> FlowRegistry {
    prompt_registry_with(provider)
}

/// Registry serving every flow from any provider
pub fn prompt_registry_with(provider: Arc<dyn LlmProvider>) -> FlowRegistry {
    FlowRegistry::new(
        Arc::new(PromptBackend::new(provider)),
        Arc::new(UnavailableBackend::new("remote service not used in this test")),
        all_flows(BackendKind::Prompt, TransportFailurePolicy::Fallback),
    )
}

/// Registry serving every flow from `http` with `policy`
pub fn http_registry(
    http: Arc<dyn GenerationBackend>,
    policy: TransportFailurePolicy,
) -> FlowRegistry {
    FlowRegistry::new(
        Arc::new(UnavailableBackend::new("provider not used in this test")),
        http,
        all_flows(BackendKind::Http, policy),
    )
}
