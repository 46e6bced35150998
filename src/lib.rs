// ABOUTME: Main library entry point for the Fitness AI flow service
// ABOUTME: Schema-validated generative flows, action wrappers, navigation guard and HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitness AI Server
//!
//! Eight fitness use cases (workout form feedback, diet plans, food lookup,
//! gym recommendations, motivational updates, skip prediction, in-set
//! assistance and next-exercise suggestions), each a flow that validates
//! its input, asks a generative backend for structured output and checks
//! that output against its schema.
//!
//! ## Architecture
//!
//! - **Flows**: input validation, backend call, output decoding, fallback policy
//! - **Actions**: the server-side entry point per use case with logging and error masking
//! - **Guard**: navigation decisions from an explicit session context
//! - **Live**: periodic workout form analysis with a single in-flight call
//! - **Routes**: the axum HTTP surface over actions and the guard
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitness_ai_server::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     fitness_ai_server::server::serve(config).await
//! }
//! ```

/// Action wrappers called by the HTTP layer
pub mod actions;

/// Environment configuration
pub mod config;

/// Application error types
pub mod errors;

/// Generative flows and their backends
pub mod flows;

/// Navigation guard
pub mod guard;

/// Generative-text providers
pub mod llm;

/// Live workout analysis loop
pub mod live;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Per-request session context
pub mod session;
