// ABOUTME: Gym, program and challenge recommendation flow definition
// ABOUTME: Goals/location template, list output schema, and a three-entry fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_ai_core::constants::flow_keys;
use fitness_ai_core::models::{
    GymRecommendation, GymRecommenderInput, GymRecommenderOutput, RecommendationType,
};
use serde_json::{json, Value};

use super::UseCase;

/// Nearby gyms, workout programs and fitness challenges
#[derive(Debug, Clone, Copy, Default)]
pub struct GymRecommender;

const TEMPLATE: &str = "You are a fitness recommendation expert. From the user's goals, location, preferences and workout history, suggest a mix of nearby gyms, workout programs and fitness challenges.

User Goals: {{{goals}}}
User Location: {{{location}}}
User Preferences: {{#if preferences}}{{{preferences}}}{{else}}None provided{{/if}}
User History: {{#if history}}{{{history}}}{{else}}None provided{{/if}}

Provide a diverse list of recommendations. For gyms, include their general location.
Output a valid JSON object with the given schema.";

fn entry(name: &str, kind: RecommendationType, description: &str) -> GymRecommendation {
    GymRecommendation {
        name: name.to_owned(),
        kind,
        description: description.to_owned(),
        location: None,
    }
}

impl UseCase for GymRecommender {
    type Input = GymRecommenderInput;
    type Output = GymRecommenderOutput;

    const KEY: &'static str = flow_keys::GYM_RECOMMENDER;
    const NAME: &'static str = "getGymRecommendations";
    const REMOTE_PATH: &'static str = "/api/recommend-gyms";
    const TEMPLATE: &'static str = TEMPLATE;
    const GENERIC_ERROR: &'static str = "Failed to get gym recommendations.";

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "recommendations": {
                    "type": "array",
                    "description": "A list of recommended gyms, workout programs and fitness challenges.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string", "description": "Name of the recommendation."},
                            "type": {
                                "type": "string",
                                "enum": ["Gym", "Workout Program", "Fitness Challenge"],
                                "description": "Kind of recommendation."
                            },
                            "description": {"type": "string", "description": "Short description."},
                            "location": {"type": "string", "description": "General location, for gyms."}
                        },
                        "required": ["name", "type", "description"]
                    }
                }
            },
            "required": ["recommendations"]
        })
    }

    fn fallback(_input: &GymRecommenderInput) -> GymRecommenderOutput {
        GymRecommenderOutput {
            recommendations: vec![
                entry("Gym A", RecommendationType::Gym, "Close to your location"),
                entry(
                    "Yoga Program",
                    RecommendationType::WorkoutProgram,
                    "Suitable for relaxation",
                ),
                entry(
                    "Fitness Challenge",
                    RecommendationType::FitnessChallenge,
                    "30-day weight loss program",
                ),
            ],
        }
    }

    fn has_primary_output(output: &GymRecommenderOutput) -> bool {
        !output.recommendations.is_empty()
    }
}
