// ABOUTME: Workout skip prediction records built from behaviour history and motivation
// ABOUTME: Motivation level is a closed high/medium/low set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FormInput, Schema};
use crate::constants::form_limits::{BEHAVIORAL_DATA_MIN_CHARS, SCHEDULE_MIN_CHARS};
use crate::errors::{ValidationError, Validator};

/// Self-reported motivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationLevel {
    /// High
    High,
    /// Medium
    Medium,
    /// Low
    Low,
}

impl fmt::Display for MotivationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

/// Skip prediction request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipPredictionInput {
    /// Workout habits: frequency, duration, time of day, reasons for skipping
    pub behavioral_data: String,
    /// Current motivation level
    pub current_motivation_level: MotivationLevel,
    /// Current workout schedule
    pub schedule: String,
}

impl Schema for SkipPredictionInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("behavioralData", &self.behavioral_data)
            .require_text("schedule", &self.schedule)
            .finish()
    }
}

impl FormInput for SkipPredictionInput {
    fn validate_form(&self) -> Result<(), ValidationError> {
        Validator::new()
            .min_chars(
                "behavioralData",
                &self.behavioral_data,
                BEHAVIORAL_DATA_MIN_CHARS,
            )
            .min_chars("schedule", &self.schedule, SCHEDULE_MIN_CHARS)
            .finish()
    }
}

/// Prediction with a nudge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipPredictionOutput {
    /// Whether the next workout is likely to be skipped
    pub skip_prediction: bool,
    /// Encouragement to stick to the schedule
    pub motivation_nudge: String,
    /// Schedule adjustment, usually only when a skip is predicted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_schedule_suggestion: Option<String>,
}

impl Schema for SkipPredictionOutput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("motivationNudge", &self.motivation_nudge)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_skip_prediction_fails_decoding() {
        let result = serde_json::from_value::<SkipPredictionOutput>(json!({
            "motivationNudge": "Go!"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_motivation_level_is_lowercase() {
        let level: MotivationLevel = serde_json::from_value(json!("medium")).unwrap();
        assert_eq!(level, MotivationLevel::Medium);
        assert!(serde_json::from_value::<MotivationLevel>(json!("extreme")).is_err());
    }
}
