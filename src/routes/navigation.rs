// ABOUTME: Route handler answering navigation guard decisions for the request's session
// ABOUTME: GET /api/navigation?path= returns the route class plus allow, pending or redirect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::guard::{GuardDecision, NavigationGuard, RouteClass};
use crate::session::{SessionContext, SessionState};

/// Query parameters for the navigation endpoint
#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    /// Requested client route
    pub path: String,
}

/// Guard answer for one navigation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    /// Route as requested
    pub path: String,
    /// Kind of route
    pub route_class: RouteClass,
    /// `allow`, `pending` or `redirect`
    pub decision: &'static str,
    /// Redirect target, when redirecting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Session the decision was made for
    pub session: SessionState,
}

impl NavigationResponse {
    fn new(session: SessionContext, path: String, decision: GuardDecision) -> Self {
        let (decision, target) = match decision {
            GuardDecision::Allow => ("allow", None),
            GuardDecision::Pending => ("pending", None),
            GuardDecision::Redirect(target) => ("redirect", Some(target)),
        };
        Self {
            route_class: NavigationGuard::classify(&path),
            path,
            decision,
            target,
            session: session.state,
        }
    }
}

/// Navigation guard routes
pub struct NavigationRoutes;

impl NavigationRoutes {
    /// Create the navigation route
    pub fn routes() -> Router {
        Router::new().route("/api/navigation", get(Self::handle_navigation))
    }

    async fn handle_navigation(
        session: SessionContext,
        query: Result<Query<NavigationQuery>, QueryRejection>,
    ) -> Result<Json<NavigationResponse>, AppError> {
        let Query(NavigationQuery { path }) =
            query.map_err(|e| AppError::invalid_input(e.body_text()))?;
        if !path.starts_with('/') {
            return Err(AppError::invalid_input("path must start with '/'"));
        }

        let decision = NavigationGuard::decide(&session, &path);
        debug!(path = %path, ?decision, "Navigation decided");
        Ok(Json(NavigationResponse::new(session, path, decision)))
    }
}
