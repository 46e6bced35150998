// ABOUTME: Prompt template rendering for prompt-backed flows
// ABOUTME: Substitutes input fields, evaluates if/else blocks, and extracts inline media parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompt Templates
//!
//! Templates use a small handlebars-like syntax evaluated against the
//! camelCase JSON form of a flow input:
//!
//! - `{{{field}}}` or `{{field}}` inserts the field's value
//! - `{{#if field}}...{{else}}...{{/if}}` picks a branch by truthiness
//! - `{{media url=field}}` attaches a `data:` URI field as an image part
//!
//! Missing fields render as empty text. Arrays render as a comma-separated
//! list. `null`, `false`, `0`, `""` and `[]` are falsy. Blocks do not nest.

use std::sync::LazyLock;

use fitness_ai_core::errors::ValidationError;
use fitness_ai_core::models::DataUri;
use regex::{Captures, Regex};
use serde_json::Value;
use thiserror::Error;

use crate::llm::MediaPart;

static IF_BLOCK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#if\s+(\w+)\s*\}\}(.*?)(?:\{\{else\}\}(.*?))?\{\{/if\}\}").ok()
});

static MEDIA_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\{media\s+url=(\w+)\s*\}\}").ok());

static FIELD_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\{\{?\s*(\w+)\s*\}?\}\}").ok());

/// Template rendering failure
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A built-in pattern failed to compile
    #[error("prompt template engine unavailable")]
    EngineUnavailable,
    /// A media field is missing or is not an image data URI
    #[error(transparent)]
    Media(#[from] ValidationError),
}

/// Prompt text plus the images it references, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// Prompt text with every tag resolved
    pub text: String,
    /// Images extracted from `{{media}}` tags
    pub media: Vec<MediaPart>,
}

fn pattern(lock: &LazyLock<Option<Regex>>) -> Result<&Regex, TemplateError> {
    lock.as_ref().ok_or(TemplateError::EngineUnavailable)
}

fn field<'a>(context: &'a Value, name: &str) -> Option<&'a Value> {
    context.get(name).filter(|value| !value.is_null())
}

/// Truthiness used by `{{#if}}`
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

/// Text form of a value as inserted by `{{{field}}}`
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Render `template` against `context`
///
/// # Errors
///
/// Returns [`TemplateError::Media`] when a `{{media}}` field is absent or is not
/// an image data URI
pub fn render(template: &str, context: &Value) -> Result<RenderedPrompt, TemplateError> {
    let with_blocks = pattern(&IF_BLOCK)?.replace_all(template, |caps: &Captures<'_>| {
        let condition = is_truthy(field(context, &caps[1]));
        let branch = if condition { caps.get(2) } else { caps.get(3) };
        branch.map_or_else(String::new, |m| m.as_str().to_owned())
    });

    let mut media = Vec::new();
    let mut media_error = None;
    let with_media = pattern(&MEDIA_TAG)?.replace_all(&with_blocks, |caps: &Captures<'_>| {
        let name = &caps[1];
        let parsed = field(context, name)
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::single(name, "required image is missing"))
            .and_then(|uri| DataUri::parse(name, uri));
        match parsed {
            Ok(uri) => {
                media.push(MediaPart {
                    mime_type: uri.mime_type,
                    data: uri.data,
                });
                format!("[image {}]", media.len())
            }
            Err(e) => {
                media_error.get_or_insert(e);
                String::new()
            }
        }
    });
    if let Some(e) = media_error {
        return Err(TemplateError::Media(e));
    }

    let text = pattern(&FIELD_TAG)?
        .replace_all(&with_media, |caps: &Captures<'_>| {
            field(context, &caps[1]).map_or_else(String::new, display_value)
        })
        .into_owned();

    Ok(RenderedPrompt { text, media })
}
