// ABOUTME: Serving-size token extraction from free-form food descriptions
// ABOUTME: Finds the first number-plus-unit token or falls back to the standard-serving sentinel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Quantity extraction
//!
//! Scans text for an explicit serving-size token: a number (optionally
//! decimal) followed by a unit from a fixed recognized set. When no token is
//! found the [`STANDARD_SERVING`] sentinel is returned.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::nutrition::STANDARD_SERVING;

/// Serving-size token pattern
///
/// Longer unit spellings come first in the alternation so "200 grams"
/// matches the unit the user actually wrote rather than its "g" prefix.
/// There is deliberately no trailing word boundary: "2 slices" matches its
/// "slice" prefix, mirroring the extractor this one replaces.
/// Stored as Option to handle compilation failures gracefully (should never
/// fail for a static pattern).
static QUANTITY_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(\.\d+)?\s?(grams|gm|kg|g|ml|cups|cup|tbsp|tsp|pieces|piece|eggs|slice)")
        .ok()
});

/// Extract the first serving-size token from `text`
///
/// Returns the matched substring (number plus unit, lowercased) verbatim,
/// or the `"Standard serving"` sentinel when no token is present. Matching
/// is case-insensitive and first-match-wins with standard leftmost regex
/// semantics. Pure and deterministic.
#[must_use]
pub fn extract_quantity(text: &str) -> String {
    QUANTITY_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.find(text))
        .map_or_else(|| STANDARD_SERVING.to_owned(), |m| m.as_str().to_lowercase())
}

/// Whether `text` carries an explicit serving-size token
#[must_use]
pub fn has_quantity(text: &str) -> bool {
    extract_quantity(text) != STANDARD_SERVING
}
