// ABOUTME: Field-level validation errors shared by schema checks and form rules
// ABOUTME: Collects every offending field before failing so callers see the full list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;
use std::mem;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single rule violated by a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// camelCase name of the offending field
    pub field: String,
    /// Why the value was rejected
    pub reason: String,
}

/// Validation failure listing every offending field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input: {}", summarize(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    let mut out = String::new();
    for (index, violation) in violations.iter().enumerate() {
        if index > 0 {
            out.push_str("; ");
        }
        // Writing into a String cannot fail
        let _ = write!(out, "{} {}", violation.field, violation.reason);
    }
    out
}

impl ValidationError {
    /// Build an error from a single violation
    #[must_use]
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation {
                field: field.into(),
                reason: reason.into(),
            }],
        }
    }

    /// Offending fields in the order they were checked
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether the given field is among the offenders
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Accumulates violations across several checks
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    /// Start an empty validator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, reason: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.to_owned(),
            reason: reason.into(),
        });
    }

    /// Require a non-blank string
    pub fn require_text(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        }
        self
    }

    /// Require at least `min` characters (trimmed)
    pub fn min_chars(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.trim().chars().count() < min {
            self.push(field, format!("must be at least {min} characters"));
        }
        self
    }

    /// Require a finite number inside `[min, max]`
    pub fn range_f64(&mut self, field: &str, value: f64, min: f64, max: f64) -> &mut Self {
        if !value.is_finite() || value < min || value > max {
            self.push(field, format!("must be between {min} and {max}"));
        }
        self
    }

    /// Require a number of at least `min`
    pub fn at_least(&mut self, field: &str, value: f64, min: f64) -> &mut Self {
        if !value.is_finite() || value < min {
            self.push(field, format!("must be at least {min}"));
        }
        self
    }

    /// Record a violation when `ok` is false
    pub fn check(&mut self, field: &str, ok: bool, reason: &str) -> &mut Self {
        if !ok {
            self.push(field, reason);
        }
        self
    }

    /// Fold in violations from a nested validation
    pub fn merge(&mut self, result: Result<(), ValidationError>) -> &mut Self {
        if let Err(error) = result {
            self.violations.extend(error.violations);
        }
        self
    }

    /// Finish, failing if anything was recorded
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every recorded violation
    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: mem::take(&mut self.violations),
            })
        }
    }
}
