// ABOUTME: CORS middleware configuration for the flow service HTTP API
// ABOUTME: Allows the web client's origins plus the identity headers set by the auth proxy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::environment::ServerConfig;

/// Configure CORS from `CORS_ALLOWED_ORIGINS`
///
/// `*` (or an empty or unparsable list) allows any origin. Otherwise only
/// the listed origins are allowed.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
/// ```
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let allow_origin = if origins.is_empty() || config.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    let mut headers = vec![
        HeaderName::from_static("content-type"),
        HeaderName::from_static("authorization"),
        HeaderName::from_static("x-requested-with"),
        HeaderName::from_static("accept"),
        HeaderName::from_static("origin"),
    ];
    for name in [&config.session.user_header, &config.session.email_header] {
        if let Ok(header) = HeaderName::from_bytes(name.as_bytes()) {
            headers.push(header);
        }
    }

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers(headers)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}
