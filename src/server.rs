// ABOUTME: HTTP server assembly binding routes, session middleware and tower-http layers
// ABOUTME: Builds the axum router from ServerConfig and serves it with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Server
//!
//! Layer order, outermost first: trace, CORS, timeout, session context.

#[cfg(not(unix))]
use std::future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::Request;
use axum::middleware::from_fn_with_state;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{field, info, info_span, warn, Span};

use crate::config::ServerConfig;
use crate::flows::definitions::{
    DietPlan, FoodNutrition, GymRecommender, MotivationalUpdate, SkipPrediction, SmartAssistant,
    WorkoutFeedback, WorkoutSuggestion,
};
use crate::flows::FlowRegistry;
use crate::middleware::{session_context_middleware, setup_cors};
use crate::routes::{FlowRoutes, HealthRoutes, NavigationRoutes};

/// Router for `config` over `registry`
#[must_use]
pub fn build_router(config: &ServerConfig, registry: Arc<FlowRegistry>) -> Router {
    let session_config = Arc::new(config.session.clone());

    Router::new()
        .merge(FlowRoutes::routes(&registry))
        .merge(NavigationRoutes::routes())
        .merge(HealthRoutes::routes(registry))
        .layer(from_fn_with_state(session_config, session_context_middleware))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(setup_cors(config))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}

/// Span for one inbound request; the session middleware fills `user_id`
fn request_span(request: &Request) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        user_id = field::Empty,
    )
}

/// Bind `config.host:config.http_port` and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound,
/// or the server fails
pub async fn serve(config: ServerConfig) -> Result<()> {
    let registry = Arc::new(FlowRegistry::from_config(&config));
    let router = build_router(&config, registry);

    let addr: SocketAddr = format!("{}:{}", config.host, config.http_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "HTTP server listening");
    display_available_endpoints(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);
    let flows = [
        FlowRoutes::path::<WorkoutFeedback>(),
        FlowRoutes::path::<DietPlan>(),
        FlowRoutes::path::<FoodNutrition>(),
        FlowRoutes::path::<GymRecommender>(),
        FlowRoutes::path::<MotivationalUpdate>(),
        FlowRoutes::path::<SkipPrediction>(),
        FlowRoutes::path::<SmartAssistant>(),
        FlowRoutes::path::<WorkoutSuggestion>(),
    ];

    info!("=== Available API Endpoints ===");
    for path in &flows {
        info!("   POST {base}{path}");
    }
    info!("   GET  {base}/api/navigation?path=");
    info!("   GET  {base}/health");
    info!("   GET  {base}/ready");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => warn!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
