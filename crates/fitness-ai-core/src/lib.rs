// ABOUTME: Core types and constants for the Fitness AI flow service
// ABOUTME: Foundation crate with error handling, validation, and use-case schemas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitness AI Core
//!
//! Foundation crate providing the shared types of the flow service. It changes
//! rarely, so the server crate gets incremental compilation benefits.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and field-level `ValidationError`
//! - **constants**: Form limits and score bounds shared by schemas and forms
//! - **models**: Input/output records for each of the eight use cases

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Limits shared between schema validation and form rules
pub mod constants;

/// Per use-case input and output schemas
pub mod models;
