// ABOUTME: Application error types re-exported from the core crate
// ABOUTME: AppError, ErrorCode and ValidationError with HTTP response mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! The error types live in `fitness-ai-core` so the schemas can produce them
//! without depending on the server crate. `IntoResponse` is enabled through
//! the core crate's `http-response` feature.

pub use fitness_ai_core::errors::*;
