// ABOUTME: Use-case definitions binding each schema pair to its template, path and fallback
// ABOUTME: Declares the UseCase trait implemented once per flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Use-Case Definitions
//!
//! Each flow is the same four-stage pipeline instantiated with a [`UseCase`]:
//! the input/output schema pair, the prompt template, the remote path, the
//! output JSON schema handed to the provider, and the fixed fallback output.

use std::fmt::Debug;

use fitness_ai_core::models::{FormInput, Schema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

mod diet_plan;
mod food_nutrition;
mod gym_recommender;
mod motivational_update;
mod skip_prediction;
mod smart_assistant;
mod workout_feedback;
mod workout_suggestion;

pub use diet_plan::DietPlan;
pub use food_nutrition::FoodNutrition;
pub use gym_recommender::GymRecommender;
pub use motivational_update::MotivationalUpdate;
pub use skip_prediction::SkipPrediction;
pub use smart_assistant::SmartAssistant;
pub use workout_feedback::WorkoutFeedback;
pub use workout_suggestion::WorkoutSuggestion;

/// Static description of one flow
pub trait UseCase: Send + Sync + 'static {
    /// Validated input record
    type Input: Schema + FormInput + Serialize + DeserializeOwned + Debug + Clone + Send + Sync;
    /// Validated output record
    type Output: Schema + Serialize + DeserializeOwned + Debug + Clone + Send + Sync;

    /// Route key and `FLOW_<KEY>_*` configuration key
    const KEY: &'static str;
    /// Flow name used in logs and error messages
    const NAME: &'static str;
    /// Path on the remote flow service
    const REMOTE_PATH: &'static str;
    /// Prompt template rendered against the camelCase input
    const TEMPLATE: &'static str;
    /// The only failure message callers ever see
    const GENERIC_ERROR: &'static str;

    /// JSON schema of [`Self::Output`], including its `required` list
    fn output_schema() -> Value;

    /// Output returned when the transport fails under the fallback policy
    fn fallback(input: &Self::Input) -> Self::Output;

    /// Whether the primary output field is populated
    fn has_primary_output(output: &Self::Output) -> bool;
}

/// Names listed in a schema's `required` array
#[must_use]
pub fn required_fields(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|fields| fields.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
