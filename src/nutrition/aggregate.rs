// ABOUTME: Nutrition aggregation summing per-food numeric fields into totals
// ABOUTME: Each summed field is rounded to 2 decimals, half away from zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Nutrition aggregation

use crate::models::{FoodItem, NutritionTotals};

/// Round to 2 decimal places, half away from zero (`f64::round` semantics)
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum the numeric fields across all foods
///
/// Each field is summed independently and rounded to 2 decimal places using
/// round-half-away-from-zero. Reordering `foods` does not change the result
/// beyond floating-point summation order effects. Missing upstream values
/// were already coerced to 0 when the [`FoodItem`]s were built, so this
/// never fails.
#[must_use]
pub fn calculate_total_nutrition(foods: &[FoodItem]) -> NutritionTotals {
    let mut totals = NutritionTotals {
        carbohydrates_g: 0.0,
        protein_g: 0.0,
        fat_g: 0.0,
        calories_kcal: 0.0,
    };

    for food in foods {
        totals.carbohydrates_g += food.carbohydrates_g;
        totals.protein_g += food.protein_g;
        totals.fat_g += food.fat_g;
        totals.calories_kcal += food.calories_kcal;
    }

    totals.carbohydrates_g = round2(totals.carbohydrates_g);
    totals.protein_g = round2(totals.protein_g);
    totals.fat_g = round2(totals.fat_g);
    totals.calories_kcal = round2(totals.calories_kcal);

    totals
}
