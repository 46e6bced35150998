// ABOUTME: Input and output records for the eight flow use cases
// ABOUTME: Schema and form validation traits plus shared field helpers (data URIs, string-or-number)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Use-case models
//!
//! Every use case has an `*Input` and `*Output` record. Wire names are
//! camelCase. Server-side schema checks live in [`Schema`]; the stricter
//! rules of the submitting page live in [`FormInput`].

mod diet_plan;
mod food_nutrition;
mod gym_recommender;
mod motivational;
mod skip_prediction;
mod smart_assistant;
mod workout_feedback;
mod workout_suggestion;

pub use diet_plan::{DietPlanInput, DietPlanOutput, WeightGoal};
pub use food_nutrition::{FoodNutritionInput, FoodNutritionOutput};
pub use gym_recommender::{
    GymRecommendation, GymRecommenderInput, GymRecommenderOutput, RecommendationType,
};
pub use motivational::{MotivationalUpdateInput, MotivationalUpdateOutput};
pub use skip_prediction::{MotivationLevel, SkipPredictionInput, SkipPredictionOutput};
pub use smart_assistant::{SmartAssistantInput, SmartAssistantOutput};
pub use workout_feedback::{WorkoutFeedbackInput, WorkoutFeedbackOutput};
pub use workout_suggestion::{WorkoutSuggestionInput, WorkoutSuggestionOutput};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

use crate::errors::ValidationError;

/// Runtime schema validation applied to every flow input and output
pub trait Schema {
    /// Check the record, listing every offending field
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any field breaks its rule
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Stricter rules enforced at the page/form boundary before an action runs
pub trait FormInput {
    /// Check the record against the form's constraints
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any field breaks its rule
    fn validate_form(&self) -> Result<(), ValidationError>;
}

/// Image payload carried as a `data:<mime>;base64,<payload>` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// MIME type, always `image/*`
    pub mime_type: String,
    /// Base64 payload exactly as received
    pub data: String,
}

impl DataUri {
    /// Parse and check a data URI
    ///
    /// # Errors
    ///
    /// Fails when the prefix, MIME type, encoding marker or payload is invalid
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::single(field, reason);

        let rest = value
            .strip_prefix("data:")
            .ok_or_else(|| invalid("must be a data URI"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("must contain a payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("must be base64 encoded"))?;

        if !mime_type.starts_with("image/") || mime_type.len() <= "image/".len() {
            return Err(invalid("must have an image MIME type"));
        }
        if payload.is_empty() || STANDARD.decode(payload).is_err() {
            return Err(invalid("must carry a valid base64 payload"));
        }

        Ok(Self {
            mime_type: mime_type.to_owned(),
            data: payload.to_owned(),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(Number),
}

/// Accept either a JSON string or a JSON number, keeping it as text
///
/// # Errors
///
/// Fails when the value is neither a string nor a number
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Number(number) => number.to_string(),
    })
}
