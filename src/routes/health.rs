// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness plus readiness probing the provider and listing each flow's backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::flows::FlowRegistry;
use crate::logging::SERVICE_NAME;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(registry: Arc<FlowRegistry>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(registry)
    }

    async fn health_handler() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339()
        }))
    }

    /// 503 when prompt-backed flows depend on a provider that does not answer
    async fn ready_handler(
        State(registry): State<Arc<FlowRegistry>>,
    ) -> (StatusCode, Json<Value>) {
        let provider = registry.provider_health().await;
        let ready = provider.is_none_or(|health| health.reachable);

        let flows: Map<String, Value> = registry
            .all_settings()
            .iter()
            .map(|(key, settings)| {
                (
                    key.clone(),
                    json!({
                        "backend": settings.backend,
                        "onTransportFailure": settings.on_transport_failure,
                    }),
                )
            })
            .collect();

        let (status, label) = if ready {
            (StatusCode::OK, "ready")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        };

        (
            status,
            Json(json!({
                "status": label,
                "provider": provider,
                "flows": flows,
                "timestamp": Utc::now().to_rfc3339()
            })),
        )
    }
}
