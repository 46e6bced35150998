// ABOUTME: Field-name translation between camelCase and the remote service's snake_case
// ABOUTME: Applies key renaming recursively through nested objects and arrays
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{Map, Value};

/// `photoDataUri` -> `photo_data_uri`
#[must_use]
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if index > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `photo_data_uri` -> `photoDataUri`
#[must_use]
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            // Leading underscores are kept; they carry meaning for some APIs
            if out.is_empty() {
                out.push(ch);
            } else {
                upper_next = true;
            }
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn rename_keys(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (rename(&key), rename_keys(inner, rename)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rename_keys(item, rename))
                .collect(),
        ),
        other => other,
    }
}

/// Rename every object key to snake_case, at any depth
#[must_use]
pub fn to_snake_case_keys(value: Value) -> Value {
    rename_keys(value, camel_to_snake)
}

/// Rename every object key to camelCase, at any depth
#[must_use]
pub fn to_camel_case_keys(value: Value) -> Value {
    rename_keys(value, snake_to_camel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("photoDataUri"), "photo_data_uri");
        assert_eq!(camel_to_snake("bmi"), "bmi");
        assert_eq!(camel_to_snake("currentSet"), "current_set");
    }

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("adjusted_schedule_suggestion"), "adjustedScheduleSuggestion");
        assert_eq!(snake_to_camel("calories"), "calories");
        assert_eq!(snake_to_camel("_id"), "_id");
    }

    #[test]
    fn test_values_are_left_alone() {
        let translated = to_snake_case_keys(json!({"weightGoal": "maintainWeight"}));
        assert_eq!(translated, json!({"weight_goal": "maintainWeight"}));
    }

    #[test]
    fn test_nested_keys_are_translated() {
        let remote = json!({
            "recommendations": [
                {"name": "Gym A", "extra_info": {"opening_hours": "24/7"}}
            ]
        });
        let local = to_camel_case_keys(remote);
        assert_eq!(local["recommendations"][0]["extraInfo"]["openingHours"], "24/7");
    }
}
