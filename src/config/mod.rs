// ABOUTME: Configuration management module for server and flow settings
// ABOUTME: Environment-driven configuration with per-flow backend selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Fitness AI server
//!
//! - **Environment**: server, remote service, provider and per-flow settings

/// Environment and server configuration
pub mod environment;

pub use environment::{BackendKind, FlowSettings, ServerConfig, TransportFailurePolicy};
