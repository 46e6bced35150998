// ABOUTME: Workout-skip prediction flow definition
// ABOUTME: Behaviour/motivation/schedule template, output schema, and a nudge fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_ai_core::constants::flow_keys;
use fitness_ai_core::models::{SkipPredictionInput, SkipPredictionOutput};
use serde_json::{json, Value};

use super::UseCase;

/// Will the user skip their next workout
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipPrediction;

const TEMPLATE: &str = "You are an AI fitness tracker that analyzes user behavior to predict skipped workouts and give motivational nudges.

Decide from the following data whether the user is likely to skip their next workout:

Behavioral Data: {{{behavioralData}}}
Current Motivation Level: {{{currentMotivationLevel}}}
Schedule: {{{schedule}}}

Give a motivational nudge that helps them stick to their schedule.
If you predict a skip, suggest an adjusted schedule that fits their current motivation and behavior.

Output in JSON format:
{
  \"skipPrediction\": true or false,
  \"motivationNudge\": \"Your motivational message here\",
  \"adjustedScheduleSuggestion\": \"Your suggested schedule adjustment here (optional)\"
}";

impl UseCase for SkipPrediction {
    type Input = SkipPredictionInput;
    type Output = SkipPredictionOutput;

    const KEY: &'static str = flow_keys::SKIP_PREDICTION;
    const NAME: &'static str = "predictWorkoutSkipping";
    const REMOTE_PATH: &'static str = "/api/predict-workout-skipping";
    const TEMPLATE: &'static str = TEMPLATE;
    const GENERIC_ERROR: &'static str = "Failed to get workout skipping prediction.";

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "skipPrediction": {
                    "type": "boolean",
                    "description": "Whether the user is likely to skip their next workout."
                },
                "motivationNudge": {
                    "type": "string",
                    "description": "A motivational nudge to keep the user on schedule."
                },
                "adjustedScheduleSuggestion": {
                    "type": "string",
                    "description": "A schedule adjustment when a skip is predicted."
                }
            },
            "required": ["skipPrediction", "motivationNudge"]
        })
    }

    fn fallback(_input: &SkipPredictionInput) -> SkipPredictionOutput {
        SkipPredictionOutput {
            skip_prediction: true,
            motivation_nudge: "Don't skip your workout today! Remember your goals.".to_owned(),
            adjusted_schedule_suggestion: Some(
                "Consider a lighter workout if you're feeling unmotivated.".to_owned(),
            ),
        }
    }

    // skipPrediction is a required bool, so a decoded output always has it
    fn has_primary_output(_output: &SkipPredictionOutput) -> bool {
        true
    }
}
