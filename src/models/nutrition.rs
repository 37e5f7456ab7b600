// ABOUTME: Nutrition record models for food extraction results
// ABOUTME: FoodItem, NutritionTotals, and NutritionRecord definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

use serde::{Deserialize, Serialize};

/// The sentinel quantity used when no explicit serving size can be determined
pub const STANDARD_SERVING: &str = "Standard serving";

/// Whether the record describes one food or several
///
/// Derived solely from the length of the foods list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// Exactly one food entry
    Single,
    /// More than one food entry
    Multiple,
}

impl ResultType {
    /// Derive the result type from a food count
    #[must_use]
    pub const fn from_count(count: usize) -> Self {
        if count == 1 {
            Self::Single
        } else {
            Self::Multiple
        }
    }
}

/// How serving sizes were determined for this record
///
/// Decided from whether an explicit quantity token appears anywhere in the
/// original input string, not per food.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServingNote {
    /// The input carried at least one explicit quantity token
    #[serde(rename = "Based on user provided quantity")]
    UserProvidedQuantity,
    /// No quantity token was found; standard servings were assumed
    #[serde(rename = "Based on standard serving size")]
    StandardServingSize,
}

impl ServingNote {
    /// Derive the serving note from a quantity-detection result
    #[must_use]
    pub const fn from_detection(has_quantity: bool) -> Self {
        if has_quantity {
            Self::UserProvidedQuantity
        } else {
            Self::StandardServingSize
        }
    }
}

/// One food entry with model-estimated nutrition values
///
/// Every numeric field is always present; values the upstream model omitted
/// are coerced to 0 during extraction. The quantity is never empty - it is
/// either a serving descriptor ("100g", "2 pieces") or the
/// [`STANDARD_SERVING`] sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    /// Food name, title-cased
    pub food_name: String,
    /// Serving descriptor or the standard-serving sentinel
    pub quantity: String,
    /// Carbohydrates in grams
    pub carbohydrates_g: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Energy in kilocalories
    pub calories_kcal: f64,
}

/// Sum of the numeric fields across all foods, rounded to 2 decimals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionTotals {
    /// Total carbohydrates in grams
    pub carbohydrates_g: f64,
    /// Total protein in grams
    pub protein_g: f64,
    /// Total fat in grams
    pub fat_g: f64,
    /// Total energy in kilocalories
    pub calories_kcal: f64,
}

/// The pipeline's output: extracted foods plus aggregated totals
///
/// Constructed fresh per request; nothing persists beyond the
/// request/response cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionRecord {
    /// Single or multiple foods
    pub result_type: ResultType,
    /// How serving sizes were determined
    pub serving_note: ServingNote,
    /// Extracted food entries
    pub foods: Vec<FoodItem>,
    /// Aggregated totals
    pub total_nutrition: NutritionTotals,
}
