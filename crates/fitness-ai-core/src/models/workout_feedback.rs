// ABOUTME: Workout form feedback records analysed from a single camera frame
// ABOUTME: Input carries the frame as an image data URI; output carries a 0-100 score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{DataUri, FormInput, Schema};
use crate::constants::form_limits::{MUSCLE_GROUPS_MIN_CHARS, WORKOUT_TYPE_MIN_CHARS};
use crate::constants::score::{PERFORMANCE_SCORE_MAX, PERFORMANCE_SCORE_MIN};
use crate::errors::{ValidationError, Validator};

/// Frame-based form analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutFeedbackInput {
    /// Exercise being performed (squats, push-ups, ...)
    pub workout_type: String,
    /// Muscle groups the exercise targets
    pub target_muscle_groups: String,
    /// `data:image/<type>;base64,<payload>`
    pub photo_data_uri: String,
}

impl WorkoutFeedbackInput {
    /// Parsed image part of the request
    ///
    /// # Errors
    ///
    /// Fails when `photoDataUri` is not a base64 image data URI
    pub fn photo(&self) -> Result<DataUri, ValidationError> {
        DataUri::parse("photoDataUri", &self.photo_data_uri)
    }
}

impl Schema for WorkoutFeedbackInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("workoutType", &self.workout_type)
            .require_text("targetMuscleGroups", &self.target_muscle_groups)
            .merge(self.photo().map(|_| ()))
            .finish()
    }
}

impl FormInput for WorkoutFeedbackInput {
    fn validate_form(&self) -> Result<(), ValidationError> {
        Validator::new()
            .min_chars("workoutType", &self.workout_type, WORKOUT_TYPE_MIN_CHARS)
            .min_chars(
                "targetMuscleGroups",
                &self.target_muscle_groups,
                MUSCLE_GROUPS_MIN_CHARS,
            )
            .finish()
    }
}

/// Form analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutFeedbackOutput {
    /// Corrections and areas for improvement
    pub form_feedback: String,
    /// How to hold this form across the whole set
    pub rep_feedback: String,
    /// Posture quality out of 100
    pub performance_score: f64,
    /// Short encouragement
    pub motivational_message: String,
}

impl Schema for WorkoutFeedbackOutput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("formFeedback", &self.form_feedback)
            .require_text("repFeedback", &self.rep_feedback)
            .range_f64(
                "performanceScore",
                self.performance_score,
                PERFORMANCE_SCORE_MIN,
                PERFORMANCE_SCORE_MAX,
            )
            .require_text("motivationalMessage", &self.motivational_message)
            .finish()
    }
}
