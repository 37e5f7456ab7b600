// ABOUTME: Data model module organization for the Nutrition Gateway
// ABOUTME: Re-exports the nutrition wire types used across pipeline and routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Wire-level data models

/// Nutrition record types (`FoodItem`, totals, the assembled record)
pub mod nutrition;

pub use nutrition::{
    FoodItem, NutritionRecord, NutritionTotals, ResultType, ServingNote, STANDARD_SERVING,
};
