// ABOUTME: Shared limits for schema validation and client-side form rules
// ABOUTME: Keeps form minimums and score bounds in one place for models and routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Minimum lengths and ranges enforced by the page forms before submission
pub mod form_limits {
    /// Lowest BMI accepted by the diet plan form
    pub const BMI_MIN: f64 = 10.0;
    /// Highest BMI accepted by the diet plan form
    pub const BMI_MAX: f64 = 50.0;
    /// Dietary preferences minimum length
    pub const DIETARY_PREFERENCES_MIN_CHARS: usize = 2;
    /// Food name minimum length
    pub const FOOD_NAME_MIN_CHARS: usize = 2;
    /// Gym recommender goals minimum length
    pub const GOALS_MIN_CHARS: usize = 3;
    /// Gym recommender location minimum length
    pub const LOCATION_MIN_CHARS: usize = 2;
    /// Skip prediction behavioral data minimum length
    pub const BEHAVIORAL_DATA_MIN_CHARS: usize = 10;
    /// Skip prediction schedule minimum length
    pub const SCHEDULE_MIN_CHARS: usize = 5;
    /// Workout type minimum length (assistant and live analysis forms)
    pub const WORKOUT_TYPE_MIN_CHARS: usize = 2;
    /// Target muscle groups minimum length
    pub const MUSCLE_GROUPS_MIN_CHARS: usize = 2;
    /// Perceived exertion description minimum length
    pub const PERCEIVED_EXERTION_MIN_CHARS: usize = 3;
    /// Lowest set number and rep count accepted by the assistant form
    pub const MIN_SET_OR_REPS: u32 = 1;
}

/// Bounds of the workout feedback performance score
pub mod score {
    /// Lowest possible performance score
    pub const PERFORMANCE_SCORE_MIN: f64 = 0.0;
    /// Highest possible performance score
    pub const PERFORMANCE_SCORE_MAX: f64 = 100.0;
}

/// Route keys of the eight use cases, also used in `FLOW_<KEY>_*` variables
pub mod flow_keys {
    /// Workout form feedback
    pub const WORKOUT_FEEDBACK: &str = "workout-feedback";
    /// Diet plan
    pub const DIET_PLAN: &str = "diet-plan";
    /// Food nutrition lookup
    pub const FOOD_NUTRITION: &str = "food-nutrition";
    /// Gym recommender
    pub const GYM_RECOMMENDER: &str = "gym-recommender";
    /// Motivational update
    pub const MOTIVATIONAL_UPDATE: &str = "motivational-update";
    /// Skip prediction
    pub const SKIP_PREDICTION: &str = "skip-prediction";
    /// Smart assistant
    pub const SMART_ASSISTANT: &str = "smart-assistant";
    /// Next exercise suggestion
    pub const WORKOUT_SUGGESTION: &str = "workout-suggestion";

    /// Every key, in route registration order
    pub const ALL: [&str; 8] = [
        WORKOUT_FEEDBACK,
        DIET_PLAN,
        FOOD_NUTRITION,
        GYM_RECOMMENDER,
        MOTIVATIONAL_UPDATE,
        SKIP_PREDICTION,
        SMART_ASSISTANT,
        WORKOUT_SUGGESTION,
    ];
}
