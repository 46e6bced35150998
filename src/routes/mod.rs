// ABOUTME: Route module organization for the Fitness AI HTTP endpoints
// ABOUTME: Use-case actions, the navigation guard and health checks, one router per domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Fitness AI server
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to actions or the guard.

/// Use-case action routes
pub mod flows;
/// Health check and readiness routes
pub mod health;
/// Navigation guard routes
pub mod navigation;

/// Use-case action route handlers
pub use flows::FlowRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Navigation guard route handlers
pub use navigation::{NavigationResponse, NavigationRoutes};
