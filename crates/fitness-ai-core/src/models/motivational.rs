// ABOUTME: Gym buddy chat records: the user's message and a supportive reply
// ABOUTME: Both output fields are required free text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{FormInput, Schema};
use crate::errors::{ValidationError, Validator};

/// What the user told their gym buddy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationalUpdateInput {
    /// How the user feels right now
    pub user_message: String,
}

impl Schema for MotivationalUpdateInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("userMessage", &self.user_message)
            .finish()
    }
}

impl FormInput for MotivationalUpdateInput {
    fn validate_form(&self) -> Result<(), ValidationError> {
        self.validate()
    }
}

/// Buddy reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationalUpdateOutput {
    /// Empathetic response to the message
    pub motivational_message: String,
    /// One actionable suggestion
    pub personalized_guidance: String,
}

impl Schema for MotivationalUpdateOutput {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require_text("motivationalMessage", &self.motivational_message)
            .require_text("personalizedGuidance", &self.personalized_guidance)
            .finish()
    }
}
