// ABOUTME: Diet plan recommendation records keyed on BMI, weight goal and preferences
// ABOUTME: WeightGoal accepts both the long form ("lose weight") and the short form ("lose")
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FormInput, Schema};
use crate::constants::form_limits::{BMI_MAX, BMI_MIN, DIETARY_PREFERENCES_MIN_CHARS};
use crate::errors::{ValidationError, Validator};

/// What the user wants to do with their weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightGoal {
    /// Lose weight
    #[serde(rename = "lose weight", alias = "lose")]
    Lose,
    /// Maintain weight
    #[serde(rename = "maintain weight", alias = "maintain")]
    Maintain,
    /// Gain weight
    #[serde(rename = "gain weight", alias = "gain")]
    Gain,
}

impl WeightGoal {
    /// Wire form of the goal
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lose => "lose weight",
            Self::Maintain => "maintain weight",
            Self::Gain => "gain weight",
        }
    }
}

impl fmt::Display for WeightGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diet plan request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanInput {
    /// Body Mass Index
    pub bmi: f64,
    /// Weight goal
    pub weight_goal: WeightGoal,
    /// Dietary preferences (vegetarian, gluten-free, ...)
    pub dietary_preferences: String,
    /// Historical diet data and feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_history: Option<String>,
}

impl Schema for DietPlanInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .check(
                "bmi",
                self.bmi.is_finite() && self.bmi > 0.0,
                "must be a positive number",
            )
            .require_text("dietaryPreferences", &self.dietary_preferences)
            .finish()
    }
}

impl FormInput for DietPlanInput {
    fn validate_form(&self) -> Result<(), ValidationError> {
        Validator::new()
            .range_f64("bmi", self.bmi, BMI_MIN, BMI_MAX)
            .min_chars(
                "dietaryPreferences",
                &self.dietary_preferences,
                DIETARY_PREFERENCES_MIN_CHARS,
            )
            .finish()
    }
}

/// Recommended plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanOutput {
    /// The plan itself
    pub diet_plan: String,
    /// Groceries needed for the plan
    pub grocery_list: String,
    /// Nutritional breakdown of the plan
    pub nutritional_information: String,
}

impl Schema for DietPlanOutput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("dietPlan", &self.diet_plan)
            .require_text("groceryList", &self.grocery_list)
            .require_text("nutritionalInformation", &self.nutritional_information)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_weight_goal_accepts_short_and_long_forms() {
        let long: WeightGoal = serde_json::from_value(json!("maintain weight")).unwrap();
        let short: WeightGoal = serde_json::from_value(json!("maintain")).unwrap();
        assert_eq!(long, WeightGoal::Maintain);
        assert_eq!(short, WeightGoal::Maintain);
        assert_eq!(serde_json::to_value(short).unwrap(), json!("maintain weight"));
        assert!(serde_json::from_value::<WeightGoal>(json!("bulk")).is_err());
    }

    #[test]
    fn test_form_rejects_bmi_out_of_range() {
        let input = DietPlanInput {
            bmi: 9.5,
            weight_goal: WeightGoal::Lose,
            dietary_preferences: "v".to_owned(),
            user_history: None,
        };
        assert!(input.validate().is_ok());

        let error = input.validate_form().unwrap_err();
        assert!(error.has_field("bmi"));
        assert!(error.has_field("dietaryPreferences"));
    }
}
