// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the nutrition extraction and fitness coach system prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! # System Prompts
//!
//! This module provides system prompts for LLM interactions. Prompts are
//! loaded at compile time from markdown files for easy maintenance.

/// Nutrition extraction system prompt template
///
/// Carries the fixed instruction content: spelling correction, real food
/// names only, splitting/merging rules, quantity handling, the food-count
/// cap, and JSON-only output. The `{max_foods}` placeholder is substituted
/// at pipeline construction.
const NUTRITION_SYSTEM_TEMPLATE: &str = include_str!("nutrition_system.md");

/// Fitness coach persona system prompt
const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Build the nutrition extraction system prompt for a given food-count cap
#[must_use]
pub fn nutrition_system_prompt(max_foods: usize) -> String {
    NUTRITION_SYSTEM_TEMPLATE.replace("{max_foods}", &max_foods.to_string())
}

/// Get the system prompt for the fitness coach endpoint
#[must_use]
pub const fn coach_system_prompt() -> &'static str {
    COACH_SYSTEM_PROMPT
}
