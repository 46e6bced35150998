// ABOUTME: Route handlers exposing each use-case action as POST /api/<key>
// ABOUTME: Applies the form rules before the action runs and returns the output as camelCase JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Use-case routes
//!
//! Each route is the form boundary of its page: a body that fails the form
//! rules is rejected with 400 and the offending fields, and the action is
//! never called.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use fitness_ai_core::models::FormInput;

use crate::actions::Action;
use crate::errors::AppError;
use crate::flows::definitions::{
    DietPlan, FoodNutrition, GymRecommender, MotivationalUpdate, SkipPrediction, SmartAssistant,
    WorkoutFeedback, WorkoutSuggestion,
};
use crate::flows::{FlowRegistry, UseCase};
use crate::session::SessionContext;

/// Use-case action routes
pub struct FlowRoutes;

impl FlowRoutes {
    /// Create one route per use case, each bound to its configured flow
    pub fn routes(registry: &FlowRegistry) -> Router {
        Router::new()
            .merge(Self::use_case::<WorkoutFeedback>(registry))
            .merge(Self::use_case::<DietPlan>(registry))
            .merge(Self::use_case::<FoodNutrition>(registry))
            .merge(Self::use_case::<GymRecommender>(registry))
            .merge(Self::use_case::<MotivationalUpdate>(registry))
            .merge(Self::use_case::<SkipPrediction>(registry))
            .merge(Self::use_case::<SmartAssistant>(registry))
            .merge(Self::use_case::<WorkoutSuggestion>(registry))
    }

    /// Path of the route serving `U`
    #[must_use]
    pub fn path<U: UseCase>() -> String {
        format!("/api/{}", U::KEY)
    }

    fn use_case<U: UseCase>(registry: &FlowRegistry) -> Router {
        let action = Arc::new(Action::<U>::from_registry(registry));
        Router::new()
            .route(&Self::path::<U>(), post(Self::handle_action::<U>))
            .with_state(action)
    }

    /// Handle a use-case submission
    async fn handle_action<U: UseCase>(
        State(action): State<Arc<Action<U>>>,
        session: SessionContext,
        body: Result<Json<U::Input>, JsonRejection>,
    ) -> Result<Json<U::Output>, AppError> {
        let Json(input) = body.map_err(|e| AppError::invalid_input(e.body_text()))?;
        input.validate_form()?;

        let output = action.handle(&session, input).await?;
        Ok(Json(output))
    }
}
