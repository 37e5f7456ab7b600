// ABOUTME: Deterministic food-name casing applied to model-returned names
// ABOUTME: Trims whitespace and title-cases every word, no dictionary correction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Food name normalization

/// Normalize a model-returned food name
///
/// Strips leading/trailing whitespace, then title-cases: every alphabetic
/// character that follows a non-alphabetic one is uppercased, the rest are
/// lowercased. No dictionary correction, no locale awareness. Idempotent.
#[must_use]
pub fn normalize_food_name(name: &str) -> String {
    let trimmed = name.trim();
    let mut result = String::with_capacity(trimmed.len());
    let mut prev_alphabetic = false;

    for ch in trimmed.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            result.push(ch);
            prev_alphabetic = false;
        }
    }

    result
}
