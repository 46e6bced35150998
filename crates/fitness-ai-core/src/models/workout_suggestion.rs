// ABOUTME: Next-exercise suggestion records for an in-progress session
// ABOUTME: Input lists completed exercises; output is one recommendation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{FormInput, Schema};
use crate::errors::{ValidationError, Validator};

/// Suggestion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSuggestionInput {
    /// Exercises already done this session
    #[serde(default)]
    pub previous_exercises: Vec<String>,
    /// What the user asked
    pub user_query: String,
}

impl Schema for WorkoutSuggestionInput {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::new();
        validator.require_text("userQuery", &self.user_query);
        for (index, exercise) in self.previous_exercises.iter().enumerate() {
            validator.require_text(&format!("previousExercises[{index}]"), exercise);
        }
        validator.finish()
    }
}

impl FormInput for WorkoutSuggestionInput {
    fn validate_form(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("userQuery", &self.user_query)
            .finish()
    }
}

/// Suggested next exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSuggestionOutput {
    /// Exercise and why it fits
    pub recommendation: String,
}

impl Schema for WorkoutSuggestionOutput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("recommendation", &self.recommendation)
            .finish()
    }
}
