// ABOUTME: Food nutrition lookup flow definition
// ABOUTME: Nutritional database template, output schema, and a fixed-value fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_ai_core::constants::flow_keys;
use fitness_ai_core::models::{FoodNutritionInput, FoodNutritionOutput};
use serde_json::{json, Value};

use super::UseCase;

/// Nutrition facts for one food
#[derive(Debug, Clone, Copy, Default)]
pub struct FoodNutrition;

const TEMPLATE: &str = "You are a nutritional database. Given a food name, provide the estimated nutritional information for a standard serving size.

Food Name: {{{foodName}}}

Return the calories, protein, carbohydrates and fats, each with units (for example kcal or g).
If the food name is ambiguous, make a reasonable assumption (\"apple\" means a medium-sized raw apple).

The foodName in the output must match the input foodName.";

impl UseCase for FoodNutrition {
    type Input = FoodNutritionInput;
    type Output = FoodNutritionOutput;

    const KEY: &'static str = flow_keys::FOOD_NUTRITION;
    const NAME: &'static str = "getFoodNutrition";
    const REMOTE_PATH: &'static str = "/api/food-nutrition";
    const TEMPLATE: &'static str = TEMPLATE;
    const GENERIC_ERROR: &'static str = "Failed to get food nutrition information.";

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "foodName": {"type": "string", "description": "The name of the food item."},
                "calories": {"type": "string", "description": "Calories with units, e.g. \"150 kcal\"."},
                "protein": {"type": "string", "description": "Protein with units, e.g. \"25g\"."},
                "carbs": {"type": "string", "description": "Carbohydrates with units, e.g. \"5g\"."},
                "fats": {"type": "string", "description": "Fat with units, e.g. \"10g\"."}
            },
            "required": ["foodName", "calories", "protein", "carbs", "fats"]
        })
    }

    fn fallback(input: &FoodNutritionInput) -> FoodNutritionOutput {
        FoodNutritionOutput {
            food_name: input.food_name.clone(),
            calories: "150 kcal".to_owned(),
            protein: "25g".to_owned(),
            carbs: "5g".to_owned(),
            fats: "10g".to_owned(),
        }
    }

    fn has_primary_output(output: &FoodNutritionOutput) -> bool {
        !output.calories.trim().is_empty()
    }
}
