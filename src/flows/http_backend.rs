// ABOUTME: Remote-call generation backend that POSTs flow input to the remote flow service
// ABOUTME: Translates camelCase to snake_case on the way out and back again on the way in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::backend::{BackendError, GenerationBackend, GenerationRequest};
use super::naming::{to_camel_case_keys, to_snake_case_keys};
use crate::config::environment::{BackendKind, RemoteServiceConfig};

/// Connection timeout for the remote service
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Backend for the remote flow service
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend from the remote service settings
    #[must_use]
    pub fn new(config: &RemoteServiceConfig) -> Self {
        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(client, &config.base_url)
    }

    /// Create a backend around an existing client
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Http
    }

    #[instrument(skip(self, request), fields(flow = request.flow, path = request.remote_path))]
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<Value, BackendError> {
        let body = to_snake_case_keys(request.payload.clone());

        let response = self
            .client
            .post(self.url(request.remote_path))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Remote flow service unreachable");
                BackendError::transport(format!("request to {} failed: {e}", request.remote_path))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Remote flow service returned an error status");
            return Err(BackendError::Transport {
                message: format!(
                    "{} answered {status}: {}",
                    request.remote_path,
                    detail.chars().take(200).collect::<String>()
                ),
                status: Some(status.as_u16()),
            });
        }

        let value: Value = response.json().await.map_err(|e| {
            BackendError::transport(format!("{} returned invalid JSON: {e}", request.remote_path))
        })?;
        debug!("Remote flow service responded");

        Ok(to_camel_case_keys(value))
    }
}
