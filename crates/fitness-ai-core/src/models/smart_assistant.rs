// ABOUTME: Smart gym assistant records combining set progress with optional sensor readings
// ABOUTME: Sensor fields are optional; counts and durations are non-negative
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{FormInput, Schema};
use crate::constants::form_limits::{
    MIN_SET_OR_REPS, PERCEIVED_EXERTION_MIN_CHARS, WORKOUT_TYPE_MIN_CHARS,
};
use crate::errors::{ValidationError, Validator};

/// Set progress and sensor data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartAssistantInput {
    /// Exercise being performed
    pub workout_type: String,
    /// Current set number
    pub current_set: u32,
    /// Reps completed in the current set
    pub rep_count: u32,
    /// Heart rate in BPM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Time under tension in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_under_tension: Option<f64>,
    /// Weight with units ("70 kg")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_lifted: Option<String>,
    /// How hard the set felt
    pub perceived_exertion: String,
}

impl Schema for SmartAssistantInput {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::new();
        validator
            .require_text("workoutType", &self.workout_type)
            .require_text("perceivedExertion", &self.perceived_exertion);
        if let Some(heart_rate) = self.heart_rate {
            validator.at_least("heartRate", heart_rate, 0.0);
        }
        if let Some(tension) = self.time_under_tension {
            validator.at_least("timeUnderTension", tension, 0.0);
        }
        validator.finish()
    }
}

impl FormInput for SmartAssistantInput {
    fn validate_form(&self) -> Result<(), ValidationError> {
        Validator::new()
            .min_chars("workoutType", &self.workout_type, WORKOUT_TYPE_MIN_CHARS)
            .at_least(
                "currentSet",
                f64::from(self.current_set),
                f64::from(MIN_SET_OR_REPS),
            )
            .at_least(
                "repCount",
                f64::from(self.rep_count),
                f64::from(MIN_SET_OR_REPS),
            )
            .min_chars(
                "perceivedExertion",
                &self.perceived_exertion,
                PERCEIVED_EXERTION_MIN_CHARS,
            )
            .finish()
    }
}

/// Guidance for the next set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartAssistantOutput {
    /// Increase, decrease or maintain intensity
    pub intensity_recommendation: String,
    /// Rest before the next set
    pub rest_suggestion: String,
    /// Contextual encouragement
    pub motivational_nudge: String,
}

impl Schema for SmartAssistantOutput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("intensityRecommendation", &self.intensity_recommendation)
            .require_text("restSuggestion", &self.rest_suggestion)
            .require_text("motivationalNudge", &self.motivational_nudge)
            .finish()
    }
}
