// ABOUTME: Food nutrition lookup records for a single named food item
// ABOUTME: Output values are strings with units; bare numbers from providers are kept as text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{string_or_number, FormInput, Schema};
use crate::constants::form_limits::FOOD_NAME_MIN_CHARS;
use crate::errors::{ValidationError, Validator};

/// Food lookup request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutritionInput {
    /// Food to look up
    pub food_name: String,
}

impl Schema for FoodNutritionInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("foodName", &self.food_name)
            .finish()
    }
}

impl FormInput for FoodNutritionInput {
    fn validate_form(&self) -> Result<(), ValidationError> {
        Validator::new()
            .min_chars("foodName", &self.food_name, FOOD_NAME_MIN_CHARS)
            .finish()
    }
}

/// Nutrition facts for a standard serving
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutritionOutput {
    /// Same as the requested food name
    pub food_name: String,
    /// e.g. "150 kcal"
    #[serde(deserialize_with = "string_or_number")]
    pub calories: String,
    /// e.g. "25g"
    #[serde(deserialize_with = "string_or_number")]
    pub protein: String,
    /// e.g. "5g"
    #[serde(deserialize_with = "string_or_number")]
    pub carbs: String,
    /// e.g. "10g"
    #[serde(deserialize_with = "string_or_number")]
    pub fats: String,
}

impl Schema for FoodNutritionOutput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("foodName", &self.food_name)
            .require_text("calories", &self.calories)
            .require_text("protein", &self.protein)
            .require_text("carbs", &self.carbs)
            .require_text("fats", &self.fats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_output_accepts_numbers_as_text() {
        let output: FoodNutritionOutput = serde_json::from_value(json!({
            "foodName": "apple",
            "calories": 95,
            "protein": "0.5g",
            "carbs": 25.1,
            "fats": "0.3g",
        }))
        .unwrap();

        assert_eq!(output.calories, "95");
        assert_eq!(output.carbs, "25.1");
        assert!(output.validate().is_ok());
    }

    #[test]
    fn test_form_rejects_empty_food_name() {
        let input = FoodNutritionInput {
            food_name: String::new(),
        };
        assert!(input.validate_form().unwrap_err().has_field("foodName"));
    }
}
