// ABOUTME: Diet plan recommendation flow definition
// ABOUTME: BMI/goal/preference template, output schema, and the templated fallback plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_ai_core::constants::flow_keys;
use fitness_ai_core::models::{DietPlanInput, DietPlanOutput};
use serde_json::{json, Value};

use super::UseCase;

/// Personalized diet plan
#[derive(Debug, Clone, Copy, Default)]
pub struct DietPlan;

const TEMPLATE: &str = "You are an AI Dietician that recommends personalized diet plans from the user's BMI, weight goal and dietary preferences.

BMI: {{{bmi}}}
Weight Goal: {{{weightGoal}}}
Dietary Preferences: {{{dietaryPreferences}}}
User History: {{#if userHistory}}{{{userHistory}}}{{else}}None provided{{/if}}

Generate a personalized diet plan, a grocery list for that plan, and nutritional information for that plan.";

impl UseCase for DietPlan {
    type Input = DietPlanInput;
    type Output = DietPlanOutput;

    const KEY: &'static str = flow_keys::DIET_PLAN;
    const NAME: &'static str = "recommendDietPlan";
    const REMOTE_PATH: &'static str = "/api/recommend-diet-plan";
    const TEMPLATE: &'static str = TEMPLATE;
    const GENERIC_ERROR: &'static str = "Failed to get diet plan recommendation.";

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "dietPlan": {
                    "type": "string",
                    "description": "A personalized diet plan based on the user inputs."
                },
                "groceryList": {
                    "type": "string",
                    "description": "A grocery list for the recommended diet plan."
                },
                "nutritionalInformation": {
                    "type": "string",
                    "description": "Nutritional information for the diet plan."
                }
            },
            "required": ["dietPlan", "groceryList", "nutritionalInformation"]
        })
    }

    fn fallback(input: &DietPlanInput) -> DietPlanOutput {
        DietPlanOutput {
            diet_plan: format!(
                "Personalized diet plan for BMI {:?}, goal: {}, preferences: {}",
                input.bmi, input.weight_goal, input.dietary_preferences
            ),
            grocery_list: "Sample grocery list based on the diet plan.".to_owned(),
            nutritional_information: "Sample nutritional information for the diet plan."
                .to_owned(),
        }
    }

    fn has_primary_output(output: &DietPlanOutput) -> bool {
        !output.diet_plan.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_ai_core::models::WeightGoal;

    #[test]
    fn test_fallback_mentions_bmi_goal_and_preferences() {
        let output = DietPlan::fallback(&DietPlanInput {
            bmi: 22.5,
            weight_goal: WeightGoal::Maintain,
            dietary_preferences: "None".to_owned(),
            user_history: None,
        });
        assert_eq!(
            output.diet_plan,
            "Personalized diet plan for BMI 22.5, goal: maintain weight, preferences: None"
        );
    }

    #[test]
    fn test_fallback_keeps_decimal_for_whole_bmi() {
        let output = DietPlan::fallback(&DietPlanInput {
            bmi: 22.0,
            weight_goal: WeightGoal::Lose,
            dietary_preferences: "vegan".to_owned(),
            user_history: None,
        });
        assert!(output.diet_plan.contains("BMI 22.0,"));
    }
}
