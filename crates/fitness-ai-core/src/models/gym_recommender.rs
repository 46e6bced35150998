// ABOUTME: Gym, workout program and fitness challenge recommendation records
// ABOUTME: Recommendation type is a closed set; short aliases are accepted on input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{FormInput, Schema};
use crate::constants::form_limits::{GOALS_MIN_CHARS, LOCATION_MIN_CHARS};
use crate::errors::{ValidationError, Validator};

/// Recommendation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymRecommenderInput {
    /// Fitness goals (weight loss, muscle gain, ...)
    pub goals: String,
    /// Where the user is
    pub location: String,
    /// Activity preferences (yoga, HIIT, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    /// Past workouts, liked and disliked gyms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
}

impl Schema for GymRecommenderInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("goals", &self.goals)
            .require_text("location", &self.location)
            .finish()
    }
}

impl FormInput for GymRecommenderInput {
    fn validate_form(&self) -> Result<(), ValidationError> {
        Validator::new()
            .min_chars("goals", &self.goals, GOALS_MIN_CHARS)
            .min_chars("location", &self.location, LOCATION_MIN_CHARS)
            .finish()
    }
}

/// Kind of recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationType {
    /// A physical gym
    Gym,
    /// A structured workout program
    #[serde(rename = "Workout Program", alias = "Program")]
    WorkoutProgram,
    /// A time-boxed challenge
    #[serde(rename = "Fitness Challenge", alias = "Challenge")]
    FitnessChallenge,
}

/// One recommended option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymRecommendation {
    /// Name of the gym, program or challenge
    pub name: String,
    /// Kind of recommendation
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    /// Why it suits the user
    pub description: String,
    /// Address or area, for physical gyms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Recommendation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymRecommenderOutput {
    /// Recommended options
    pub recommendations: Vec<GymRecommendation>,
}

impl Schema for GymRecommenderOutput {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::new();
        for (index, entry) in self.recommendations.iter().enumerate() {
            validator
                .require_text(&format!("recommendations[{index}].name"), &entry.name)
                .require_text(
                    &format!("recommendations[{index}].description"),
                    &entry.description,
                );
        }
        validator.finish()
    }
}
