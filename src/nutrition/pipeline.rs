// ABOUTME: End-to-end nutrition extraction orchestration with bounded retry
// ABOUTME: Validates input, prompts the model, repairs output, and assembles the record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! # Pipeline Orchestrator
//!
//! `NutritionPipeline` composes the leaf components into the end-to-end
//! `get_nutrition(input) -> NutritionRecord` contract. Each invocation is
//! independent and stateless; the pipeline is safely callable concurrently
//! for independent inputs. The only suspension points are the upstream
//! model call and its retry sleeps.

use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::aggregate::calculate_total_nutrition;
use super::normalize::normalize_food_name;
use super::parse::safe_json_parse;
use super::quantity::{extract_quantity, has_quantity};
use crate::config::{LlmConfig, NutritionConfig};
use crate::errors::{AppError, AppResult};
use crate::llm::{nutrition_system_prompt, ChatMessage, ChatRequest, LlmProvider};
use crate::models::{FoodItem, NutritionRecord, ResultType, ServingNote};

/// Separators used for the coarse client-side food count
///
/// Commas and the standalone word "and". This guard bounds prompt abuse; it
/// is not an exact food count - the model may still return a different one.
static FOOD_SEPARATOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i),|\band\b").ok());

/// Model response shape, deserialized leniently
///
/// Field presence is never assumed: the model may omit the foods list,
/// per-food quantities, or any numeric field.
#[derive(Debug, Deserialize)]
struct RawNutritionResponse {
    #[serde(default)]
    foods: Vec<RawFoodItem>,
}

/// One food entry as the model returned it
#[derive(Debug, Deserialize)]
struct RawFoodItem {
    #[serde(default)]
    food_name: String,
    #[serde(default)]
    quantity: Option<String>,
    #[serde(default)]
    carbohydrates_g: Option<f64>,
    #[serde(default)]
    protein_g: Option<f64>,
    #[serde(default)]
    fat_g: Option<f64>,
    #[serde(default)]
    calories_kcal: Option<f64>,
}

/// The nutrition extraction pipeline
///
/// Holds the injectable model capability and the fixed invocation
/// parameters. Construct once at startup and share via `Arc`; no state is
/// retained between invocations.
pub struct NutritionPipeline {
    provider: Arc<dyn LlmProvider>,
    llm: LlmConfig,
    config: NutritionConfig,
    system_prompt: String,
}

impl NutritionPipeline {
    /// Create a pipeline over the given provider and configuration
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, llm: LlmConfig, config: NutritionConfig) -> Self {
        let system_prompt = nutrition_system_prompt(config.max_foods);
        Self {
            provider,
            llm,
            config,
            system_prompt,
        }
    }

    /// Extract and aggregate nutrition data for a food description
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: empty input, or the food count bound is exceeded
    ///   (checked before any model call)
    /// - `UpstreamUnavailable`: the model call failed after exhausting retries
    /// - `InvalidUpstreamResponse`: the model output was not salvageable JSON
    /// - `NoFoodDetected`: the parsed output carried no usable foods
    pub async fn get_nutrition(&self, food_input: &str) -> AppResult<NutritionRecord> {
        let input = food_input.trim();
        if input.is_empty() {
            return Err(AppError::invalid_input("Input cannot be empty"));
        }

        let food_count = count_food_segments(input);
        if food_count > self.config.max_foods {
            return Err(AppError::invalid_input(format!(
                "Maximum {} foods allowed",
                self.config.max_foods
            )));
        }

        debug!(food_count, "Running nutrition extraction");

        let request = self.build_request(input);
        let raw = self.invoke_with_retry(&request).await?;
        let value = safe_json_parse(&raw)?;

        let parsed: RawNutritionResponse = serde_json::from_value(value).map_err(|e| {
            warn!("Model JSON did not match the expected shape: {}", e);
            AppError::invalid_upstream_response("Model returned an unexpected response shape")
        })?;

        if parsed.foods.is_empty() {
            return Err(AppError::no_food_detected());
        }

        let foods: Vec<FoodItem> = parsed.foods.into_iter().filter_map(assemble_food).collect();
        if foods.is_empty() {
            return Err(AppError::no_food_detected());
        }

        let total_nutrition = calculate_total_nutrition(&foods);

        info!(foods = foods.len(), "Nutrition extraction complete");

        Ok(NutritionRecord {
            result_type: ResultType::from_count(foods.len()),
            serving_note: ServingNote::from_detection(has_quantity(input)),
            foods,
            total_nutrition,
        })
    }

    /// Build the fixed extraction request for one input
    fn build_request(&self, food_input: &str) -> ChatRequest {
        let messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(format!("Food input: {food_input}")),
        ];

        let mut request = ChatRequest::new(messages)
            .with_temperature(self.llm.temperature)
            .with_max_tokens(self.llm.max_tokens);
        if let Some(model) = &self.llm.model {
            request = request.with_model(model.clone());
        }
        request
    }

    /// Invoke the model with bounded retry and a constant delay
    ///
    /// Any provider error is retried until the attempt budget is spent;
    /// exhaustion surfaces as a generic `UpstreamUnavailable`.
    async fn invoke_with_retry(&self, request: &ChatRequest) -> AppResult<String> {
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.provider.complete(request).await {
                Ok(response) => return Ok(response.content),
                Err(e) => {
                    if attempt >= retry.max_attempts {
                        error!(
                            "Model invocation failed after {} attempts: {}",
                            attempt, e
                        );
                        return Err(AppError::upstream_unavailable(
                            "Nutrition service temporarily unavailable",
                        )
                        .with_source(e));
                    }

                    warn!(
                        "Model invocation attempt {}/{} failed: {}; retrying in {}s",
                        attempt, retry.max_attempts, e, retry.delay_secs
                    );
                    sleep(retry.delay()).await;
                }
            }
        }
    }
}

/// Build a [`FoodItem`] from a raw model entry, or drop it
///
/// Names that normalize to empty are dropped. Missing numeric fields are
/// coerced to 0. A missing or blank quantity is backfilled by extracting
/// from the food name; quantity tokens that only appeared in the original
/// sentence are not recovered here.
fn assemble_food(raw: RawFoodItem) -> Option<FoodItem> {
    let food_name = normalize_food_name(&raw.food_name);
    if food_name.is_empty() {
        warn!("Dropping model food entry with empty name");
        return None;
    }

    let quantity = raw
        .quantity
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| extract_quantity(&food_name));

    Some(FoodItem {
        quantity,
        carbohydrates_g: raw.carbohydrates_g.unwrap_or(0.0),
        protein_g: raw.protein_g.unwrap_or(0.0),
        fat_g: raw.fat_g.unwrap_or(0.0),
        calories_kcal: raw.calories_kcal.unwrap_or(0.0),
        food_name,
    })
}

/// Count non-empty segments after splitting on commas and the word "and"
fn count_food_segments(input: &str) -> usize {
    FOOD_SEPARATOR.as_ref().map_or(1, |separator| {
        separator
            .split(input)
            .filter(|segment| !segment.trim().is_empty())
            .count()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_comma_and_word_separated_segments() {
        assert_eq!(count_food_segments("rice"), 1);
        assert_eq!(count_food_segments("rice, dal and 2 eggs"), 3);
        assert_eq!(count_food_segments("rice,, dal"), 2);
    }

    #[test]
    fn and_inside_a_word_does_not_split() {
        assert_eq!(count_food_segments("club sandwich"), 1);
        assert_eq!(count_food_segments("sandwich and fries"), 2);
    }

    #[test]
    fn assemble_drops_empty_names() {
        let raw = RawFoodItem {
            food_name: "   ".into(),
            quantity: None,
            carbohydrates_g: Some(1.0),
            protein_g: None,
            fat_g: None,
            calories_kcal: None,
        };
        assert!(assemble_food(raw).is_none());
    }

    #[test]
    fn assemble_defaults_missing_numbers_to_zero() {
        let raw = RawFoodItem {
            food_name: "rice".into(),
            quantity: Some("1 cup".into()),
            carbohydrates_g: None,
            protein_g: None,
            fat_g: None,
            calories_kcal: Some(200.0),
        };
        let food = assemble_food(raw).unwrap();
        assert_eq!(food.food_name, "Rice");
        assert_eq!(food.quantity, "1 cup");
        assert_eq!(food.carbohydrates_g, 0.0);
        assert_eq!(food.calories_kcal, 200.0);
    }

    #[test]
    fn assemble_backfills_quantity_from_name() {
        let raw = RawFoodItem {
            food_name: "2 eggs".into(),
            quantity: None,
            carbohydrates_g: None,
            protein_g: None,
            fat_g: None,
            calories_kcal: None,
        };
        let food = assemble_food(raw).unwrap();
        assert_eq!(food.quantity, "2 eggs");
    }
}
