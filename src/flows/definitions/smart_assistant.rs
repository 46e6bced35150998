// ABOUTME: Smart gym assistant flow definition for set-by-set guidance
// ABOUTME: Sensor-data template with optional fields, output schema, and a steady fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_ai_core::constants::flow_keys;
use fitness_ai_core::models::{SmartAssistantInput, SmartAssistantOutput};
use serde_json::{json, Value};

use super::UseCase;

/// Intensity and rest guidance for the next set
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartAssistant;

const TEMPLATE: &str = "You are an AI Smart Gym Assistant connected to IoT gym equipment. You give real-time guidance from user performance and sensor data.

Workout: {{{workoutType}}}
Current Set: {{{currentSet}}}
Reps Completed: {{{repCount}}}

Sensor Data:
- Heart Rate: {{#if heartRate}}{{{heartRate}}} BPM{{else}}N/A{{/if}}
- Time Under Tension: {{#if timeUnderTension}}{{{timeUnderTension}}} seconds{{else}}N/A{{/if}}
- Weight Lifted: {{#if weightLifted}}{{{weightLifted}}}{{else}}N/A{{/if}}
- User's Perceived Exertion: {{{perceivedExertion}}}

From this data provide:
1. An intensity recommendation for the next set (\"Increase weight by 5%\", \"Maintain current weight\", \"Reduce reps by 2\"). This is a command to the smart equipment.
2. A specific rest time suggestion (\"Rest for 60 seconds\", \"Take a 2-minute break\").
3. A short, contextual motivational nudge.

Analyze the data like a real personal trainer. A very high heart rate for the exercise calls for lower intensity or longer rest. Low time under tension with high reps and low exertion calls for more weight.";

impl UseCase for SmartAssistant {
    type Input = SmartAssistantInput;
    type Output = SmartAssistantOutput;

    const KEY: &'static str = flow_keys::SMART_ASSISTANT;
    const NAME: &'static str = "getSmartAssistantFeedback";
    const REMOTE_PATH: &'static str = "/api/smart-assistant-feedback";
    const TEMPLATE: &'static str = TEMPLATE;
    const GENERIC_ERROR: &'static str = "Failed to get smart assistant feedback.";

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "intensityRecommendation": {
                    "type": "string",
                    "description": "Increase, decrease or maintain intensity."
                },
                "restSuggestion": {
                    "type": "string",
                    "description": "Suggested rest time before the next set."
                },
                "motivationalNudge": {
                    "type": "string",
                    "description": "A contextual motivational message."
                }
            },
            "required": ["intensityRecommendation", "restSuggestion", "motivationalNudge"]
        })
    }

    fn fallback(_input: &SmartAssistantInput) -> SmartAssistantOutput {
        SmartAssistantOutput {
            intensity_recommendation: "Maintain current intensity.".to_owned(),
            rest_suggestion: "Take a 60-second rest before the next set.".to_owned(),
            motivational_nudge: "You're doing great! Keep pushing forward.".to_owned(),
        }
    }

    fn has_primary_output(output: &SmartAssistantOutput) -> bool {
        !output.intensity_recommendation.trim().is_empty()
    }
}
