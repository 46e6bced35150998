// ABOUTME: Workout form feedback flow definition analysing a still image of the user
// ABOUTME: Template with inline media, output schema, and fixed fallback feedback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_ai_core::constants::{flow_keys, score};
use fitness_ai_core::models::{WorkoutFeedbackInput, WorkoutFeedbackOutput};
use serde_json::{json, Value};

use super::UseCase;

/// Form feedback from a single workout frame
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutFeedback;

const TEMPLATE: &str = "You are an AI Smart Gym Assistant giving real-time feedback on a user's workout from a single still image.

Use the user's posture in the photo, the workout type and the targeted muscle groups to give specific feedback on their form.

Workout Type: {{{workoutType}}}
Target Muscle Groups: {{{targetMuscleGroups}}}
User's Pose: {{media url=photoDataUri}}

Analyze the pose in the image for this exercise.

Form Feedback: specific corrections and areas to improve. For a squat you might check that the back is straight, the knees stay behind the toes, and the depth is good. If the form is good, confirm it.
Rep Feedback: this is one frame, so explain how to hold this form for a whole set of reps.
Performance Score: a score out of 100 for the form in the image. A perfect squat is 100; a dangerously rounded back might be 30.
Motivational Message: encourage the user to keep or correct their form to get the most from the workout and avoid injury.

Keep the feedback concise, actionable and motivating.
Output a valid JSON object with the given schema.";

impl UseCase for WorkoutFeedback {
    type Input = WorkoutFeedbackInput;
    type Output = WorkoutFeedbackOutput;

    const KEY: &'static str = flow_keys::WORKOUT_FEEDBACK;
    const NAME: &'static str = "getPersonalizedWorkoutFeedback";
    const REMOTE_PATH: &'static str = "/api/personalized-workout-feedback";
    const TEMPLATE: &'static str = TEMPLATE;
    const GENERIC_ERROR: &'static str = "Failed to get personalized workout feedback.";

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "formFeedback": {
                    "type": "string",
                    "description": "Specific feedback on the user's form, including corrections."
                },
                "repFeedback": {
                    "type": "string",
                    "description": "How to maintain the current form for the full set."
                },
                "performanceScore": {
                    "type": "number",
                    "minimum": score::PERFORMANCE_SCORE_MIN,
                    "maximum": score::PERFORMANCE_SCORE_MAX,
                    "description": "Overall score for the current posture, out of 100."
                },
                "motivationalMessage": {
                    "type": "string",
                    "description": "A short motivational message."
                }
            },
            "required": ["formFeedback", "repFeedback", "performanceScore", "motivationalMessage"]
        })
    }

    fn fallback(_input: &WorkoutFeedbackInput) -> WorkoutFeedbackOutput {
        WorkoutFeedbackOutput {
            form_feedback: "Keep your back straight and engage your core.".to_owned(),
            rep_feedback: "Good consistency in your reps. Maintain this form throughout."
                .to_owned(),
            performance_score: 85.0,
            motivational_message: "Great job! You're doing amazing. Keep it up!".to_owned(),
        }
    }

    fn has_primary_output(output: &WorkoutFeedbackOutput) -> bool {
        !output.form_feedback.trim().is_empty()
    }
}
