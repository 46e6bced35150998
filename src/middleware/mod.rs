// ABOUTME: HTTP middleware for session context propagation and CORS
// ABOUTME: Session extraction from trusted headers and cross-origin configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Session context extraction
pub mod session;

pub use cors::setup_cors;
pub use session::{session_context_middleware, session_from_headers};
