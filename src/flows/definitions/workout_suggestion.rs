// ABOUTME: Next-exercise suggestion flow definition
// ABOUTME: Session-context template, output schema, and a bench press fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_ai_core::constants::flow_keys;
use fitness_ai_core::models::{WorkoutSuggestionInput, WorkoutSuggestionOutput};
use serde_json::{json, Value};

use super::UseCase;

/// What to do next in the current session
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutSuggestion;

const TEMPLATE: &str = "You are an expert AI personal trainer. A user wants a recommendation for their next exercise.

Suggest something logical that complements their current session. Be encouraging and give a brief reason for the choice.

Workout Context:
- Exercises already completed: {{#if previousExercises}}{{{previousExercises}}}{{else}}none yet{{/if}}

User's Request:
\"{{{userQuery}}}\"

From the context and the request, give a single, actionable exercise recommendation.";

impl UseCase for WorkoutSuggestion {
    type Input = WorkoutSuggestionInput;
    type Output = WorkoutSuggestionOutput;

    const KEY: &'static str = flow_keys::WORKOUT_SUGGESTION;
    const NAME: &'static str = "suggestNextExercise";
    const REMOTE_PATH: &'static str = "/api/workout-suggestion";
    const TEMPLATE: &'static str = TEMPLATE;
    const GENERIC_ERROR: &'static str = "Failed to get exercise suggestion.";

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "recommendation": {
                    "type": "string",
                    "description": "The next exercise and why it is a good choice."
                }
            },
            "required": ["recommendation"]
        })
    }

    fn fallback(_input: &WorkoutSuggestionInput) -> WorkoutSuggestionOutput {
        WorkoutSuggestionOutput {
            recommendation: "A good next move would be 3 sets of dumbbell bench presses to target your chest. It complements the bicep curls you just did.".to_owned(),
        }
    }

    fn has_primary_output(output: &WorkoutSuggestionOutput) -> bool {
        !output.recommendation.trim().is_empty()
    }
}
