// ABOUTME: Registry of generation backends that binds each use case to its configured strategy
// ABOUTME: Built once at startup from ServerConfig and shared read-only across requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Flow Registry
//!
//! Holds one prompt backend and one HTTP backend. [`FlowRegistry::flow`] picks
//! between them per use case from configuration, so the choice never changes
//! between calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::backend::{BackendHealth, GenerationBackend, UnavailableBackend};
use super::definitions::UseCase;
use super::flow::Flow;
use super::http_backend::HttpBackend;
use super::prompt_backend::PromptBackend;
use crate::config::environment::{BackendKind, FlowSettings, ServerConfig};
use crate::llm;

/// Backends plus per-flow settings
#[derive(Clone)]
pub struct FlowRegistry {
    prompt: Arc<dyn GenerationBackend>,
    http: Arc<dyn GenerationBackend>,
    settings: BTreeMap<String, FlowSettings>,
}

impl FlowRegistry {
    /// Create a registry from explicit backends
    #[must_use]
    pub fn new(
        prompt: Arc<dyn GenerationBackend>,
        http: Arc<dyn GenerationBackend>,
        settings: BTreeMap<String, FlowSettings>,
    ) -> Self {
        Self {
            prompt,
            http,
            settings,
        }
    }

    /// Build the registry described by `config`
    ///
    /// A provider that cannot be built does not stop the server: flows on the
    /// prompt backend fail with a provider error until it is configured.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let prompt: Arc<dyn GenerationBackend> = if config.uses_prompt_backend() {
            match llm::provider_from_config(&config.llm) {
                Ok(provider) => Arc::new(
                    PromptBackend::new(provider).with_temperature(config.llm.temperature),
                ),
                Err(e) => {
                    warn!(error = %e, "Generative-text provider unavailable");
                    Arc::new(UnavailableBackend::new(e.message))
                }
            }
        } else {
            Arc::new(UnavailableBackend::new(
                "no flow is configured for the prompt backend",
            ))
        };
        let http: Arc<dyn GenerationBackend> = Arc::new(HttpBackend::new(&config.remote));

        let registry = Self::new(prompt, http, config.flows.clone());
        for (key, settings) in &registry.settings {
            info!(
                flow = %key,
                backend = %settings.backend,
                on_transport_failure = %settings.on_transport_failure,
                "Flow registered"
            );
        }
        registry
    }

    /// Settings for a flow key, defaulting when unconfigured
    #[must_use]
    pub fn settings(&self, key: &str) -> FlowSettings {
        self.settings
            .get(key)
            .copied()
            .unwrap_or_else(|| FlowSettings::default_for(key))
    }

    /// Every configured flow with its settings
    #[must_use]
    pub const fn all_settings(&self) -> &BTreeMap<String, FlowSettings> {
        &self.settings
    }

    /// Probe the generative-text provider; `None` when no flow uses it
    pub async fn provider_health(&self) -> Option<BackendHealth> {
        let uses_prompt = self
            .settings
            .values()
            .any(|settings| settings.backend == BackendKind::Prompt);
        if uses_prompt {
            self.prompt.health().await
        } else {
            None
        }
    }

    /// Flow for `U` on its configured backend
    #[must_use]
    pub fn flow<U: UseCase>(&self) -> Flow<U> {
        let settings = self.settings(U::KEY);
        let backend = match settings.backend {
            BackendKind::Prompt => Arc::clone(&self.prompt),
            BackendKind::Http => Arc::clone(&self.http),
        };
        Flow::new(backend, settings.on_transport_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::TransportFailurePolicy;
    use crate::flows::definitions::{DietPlan, MotivationalUpdate};

    #[test]
    fn test_defaults_follow_flow_settings() {
        let registry = FlowRegistry::from_config(&ServerConfig::defaults());
        assert_eq!(registry.flow::<DietPlan>().backend_kind(), BackendKind::Prompt);
        assert_eq!(
            registry.flow::<MotivationalUpdate>().backend_kind(),
            BackendKind::Http
        );
    }

    #[test]
    fn test_override_switches_backend_and_policy() {
        let mut config = ServerConfig::defaults();
        config.flows.insert(
            "diet-plan".to_owned(),
            FlowSettings {
                backend: BackendKind::Http,
                on_transport_failure: TransportFailurePolicy::Propagate,
            },
        );
        let registry = FlowRegistry::from_config(&config);
        let flow = registry.flow::<DietPlan>();
        assert_eq!(flow.backend_kind(), BackendKind::Http);
        assert_eq!(flow.policy(), TransportFailurePolicy::Propagate);
    }
}
