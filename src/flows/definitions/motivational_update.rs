// ABOUTME: Motivational chat flow definition for the virtual gym buddy
// ABOUTME: Sentiment-aware template, output schema, and a supportive fallback message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_ai_core::constants::flow_keys;
use fitness_ai_core::models::{MotivationalUpdateInput, MotivationalUpdateOutput};
use serde_json::{json, Value};

use super::UseCase;

/// Reply from the virtual gym buddy
#[derive(Debug, Clone, Copy, Default)]
pub struct MotivationalUpdate;

const FALLBACK_MESSAGE: &str = "Hey, it's totally okay to feel that way! Some days are just tougher than others. Don't be too hard on yourself.";
const FALLBACK_GUIDANCE: &str = "How about we just aim for a quick 10-minute walk? Just to get the body moving a little. No pressure!";

const TEMPLATE: &str = "You are a virtual gym buddy talking to a friend. You are supportive, friendly and motivating.

The user sent you this message:
\"{{{userMessage}}}\"

Based on the message:
1. Analyze Sentiment: work out how the user feels (happy, tired, frustrated, motivated...).
2. Write a Motivational Message: a short, conversational and empathetic reply to their message. Encourage them if they are down, celebrate with them if they are excited. Talk like a real friend.
3. Provide Personalized Guidance: one short, actionable piece of advice, such as a shorter workout or a rest day when they are tired, or a simple exercise when they are unsure.

Example:
User Message: \"I feel so lazy and tired today, don't feel like working out.\"
Your Motivational Message: \"Hey, it's totally okay to feel that way! Some days are just tougher than others. Don't be too hard on yourself.\"
Your Personalized Guidance: \"How about we just aim for a quick 10-minute walk? Just to get the body moving a little. No pressure!\"

Output a valid JSON object with the given schema.";

impl UseCase for MotivationalUpdate {
    type Input = MotivationalUpdateInput;
    type Output = MotivationalUpdateOutput;

    const KEY: &'static str = flow_keys::MOTIVATIONAL_UPDATE;
    const NAME: &'static str = "getMotivationalFitnessUpdate";
    const REMOTE_PATH: &'static str = "/api/motivational-fitness-update";
    const TEMPLATE: &'static str = TEMPLATE;
    const GENERIC_ERROR: &'static str = "Failed to get motivational fitness update.";

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "motivationalMessage": {
                    "type": "string",
                    "description": "A friendly, supportive reply to the user's message."
                },
                "personalizedGuidance": {
                    "type": "string",
                    "description": "One short, actionable piece of advice."
                }
            },
            "required": ["motivationalMessage", "personalizedGuidance"]
        })
    }

    fn fallback(_input: &MotivationalUpdateInput) -> MotivationalUpdateOutput {
        MotivationalUpdateOutput {
            motivational_message: FALLBACK_MESSAGE.to_owned(),
            personalized_guidance: FALLBACK_GUIDANCE.to_owned(),
        }
    }

    fn has_primary_output(output: &MotivationalUpdateOutput) -> bool {
        !output.motivational_message.trim().is_empty()
    }
}
