// ABOUTME: Defensive JSON parsing for untrusted model output
// ABOUTME: Direct parse first, then a salvage pass between the first { and last }
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Safe response parsing
//!
//! The upstream model is asked for JSON-only output but routinely wraps it
//! in prose or markdown fencing. This parser tries a strict parse, then
//! salvages the substring between the first `{` and the last `}`. Salvage is
//! the only recovery path for malformed output; re-invoking the model
//! belongs to the retry layer, never here.

use serde_json::Value;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Parse a text blob expected to contain a JSON object
///
/// # Errors
///
/// Returns `InvalidUpstreamResponse` when neither the direct parse nor the
/// salvage pass yields a JSON object. The raw text is not echoed to the
/// caller.
pub fn safe_json_parse(text: &str) -> AppResult<Value> {
    if let Ok(Value::Object(map)) = serde_json::from_str(text) {
        return Ok(Value::Object(map));
    }

    // Salvage: the model may wrap the object in prose or ```json fencing
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(Value::Object(map)) = serde_json::from_str(&text[start..=end]) {
                debug!("Salvaged JSON object from non-strict model output");
                return Ok(Value::Object(map));
            }
        }
    }

    Err(AppError::invalid_upstream_response(
        "Model output did not contain a JSON object",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_json() {
        let value = safe_json_parse(r#"{"foods": []}"#).unwrap();
        assert!(value.get("foods").is_some());
    }

    #[test]
    fn salvages_markdown_fenced_json() {
        let text = "```json\n{\"foods\": [{\"food_name\": \"Rice\"}]}\n```";
        let value = safe_json_parse(text).unwrap();
        assert_eq!(value["foods"][0]["food_name"], "Rice");
    }

    #[test]
    fn salvages_json_wrapped_in_prose() {
        let text = "Here is your nutrition data: {\"foods\": []} Hope that helps!";
        assert!(safe_json_parse(text).is_ok());
    }

    #[test]
    fn rejects_plain_prose() {
        let err = safe_json_parse("I could not identify any food.").unwrap_err();
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn rejects_unbalanced_braces() {
        assert!(safe_json_parse("{\"foods\": [").is_err());
    }

    #[test]
    fn rejects_top_level_arrays() {
        assert!(safe_json_parse("[1, 2, 3]").is_err());
    }
}
