// ABOUTME: Flow layer: schema-validated pass-through to a prompt or remote HTTP backend
// ABOUTME: Wires templates, backends, use-case definitions and the registry together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Flows
//!
//! A flow validates its input, asks one [`GenerationBackend`] for output,
//! then decodes and validates that output. Which backend serves a flow is
//! fixed by configuration:
//!
//! - [`PromptBackend`] renders the flow's template and calls an
//!   [`LlmProvider`](crate::llm::LlmProvider) with the output schema
//! - [`HttpBackend`] POSTs the snake_case input to the remote flow service
//!
//! Transport failures follow the flow's [`TransportFailurePolicy`](crate::config::TransportFailurePolicy):
//! answer with the fixed fallback output, or surface the error.

/// Backend trait and request type
pub mod backend;
/// Use-case definitions
pub mod definitions;
mod flow;
/// Remote flow service backend
pub mod http_backend;
/// camelCase and snake_case key translation
pub mod naming;
/// Generative-text backend
pub mod prompt_backend;
/// Backend selection per use case
pub mod registry;
/// Prompt template rendering
pub mod template;

pub use backend::{
    BackendError, BackendHealth, GenerationBackend, GenerationRequest, UnavailableBackend,
};
pub use definitions::UseCase;
pub use flow::{Flow, FlowError};
pub use http_backend::HttpBackend;
pub use prompt_backend::PromptBackend;
pub use registry::FlowRegistry;
