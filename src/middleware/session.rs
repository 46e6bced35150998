// ABOUTME: Session context middleware reading identity headers set by the upstream auth provider
// ABOUTME: Injects SessionContext into request extensions and provides an axum extractor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::convert::Infallible;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, Span};

use crate::config::environment::SessionConfig;
use crate::session::SessionContext;

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

/// Build the session from trusted identity headers
#[must_use]
pub fn session_from_headers(headers: &HeaderMap, config: &SessionConfig) -> SessionContext {
    header_text(headers, &config.user_header).map_or_else(SessionContext::anonymous, |id| {
        SessionContext::authenticated(id, header_text(headers, &config.email_header))
    })
}

/// Session context middleware
///
/// Never rejects: requests without the identity header get an anonymous
/// session and handlers decide what that means.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use axum::{middleware, routing::get, Router};
/// use fitness_ai_server::config::environment::SessionConfig;
/// use fitness_ai_server::middleware::session_context_middleware;
///
/// # async fn handler() -> &'static str { "" }
/// let app: Router = Router::new().route("/", get(handler)).layer(
///     middleware::from_fn_with_state(Arc::new(SessionConfig::default()), session_context_middleware),
/// );
/// ```
pub async fn session_context_middleware(
    State(config): State<Arc<SessionConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = session_from_headers(req.headers(), &config);

    if let Some(user_id) = session.user_id() {
        Span::current().record("user_id", user_id);
    } else {
        debug!("No identity header, proceeding with anonymous session");
    }

    req.extensions_mut().insert(session);
    next.run(req).await
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_default())
    }
}
