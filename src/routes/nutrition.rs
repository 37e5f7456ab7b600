// ABOUTME: Nutrition search route handlers for text, voice, and image entry points
// ABOUTME: Thin request validation and dispatch into the extraction pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Nutrition search routes
//!
//! All three entry points funnel into the same pipeline. Voice and image
//! inputs arrive here already converted to plain text by their external
//! collaborators (speech-to-text, food detection); these handlers only
//! short-circuit the empty-conversion cases before invoking the pipeline.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::errors::AppError;
use crate::models::NutritionRecord;
use crate::resources::ServerResources;

// ============================================================================
// Request Types
// ============================================================================

/// Request for the text search endpoint
#[derive(Debug, Deserialize, Serialize)]
pub struct FoodSearchRequest {
    /// Free-form food description, e.g. "2 eggs and 1 cup rice"
    pub food_input: String,
}

/// Request for the voice search endpoint
///
/// The transcript is produced by the external speech-to-text collaborator;
/// an empty string signals "nothing understood".
#[derive(Debug, Deserialize, Serialize)]
pub struct VoiceSearchRequest {
    /// Best-effort transcript of the user's utterance
    pub transcript: String,
}

/// Request for the image search endpoint
///
/// The food list is produced by the external food-detection collaborator;
/// an empty string signals "no food detected".
#[derive(Debug, Deserialize, Serialize)]
pub struct ImageSearchRequest {
    /// Comma-separated food names detected in the image
    pub detected_foods: String,
}

// ============================================================================
// Nutrition Routes
// ============================================================================

/// Nutrition search routes handler
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all nutrition search routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/search-food", post(Self::search_food))
            .route("/voice-search", post(Self::voice_search))
            .route("/image-search", post(Self::image_search))
            .with_state(resources)
    }

    /// Text entry point
    async fn search_food(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<FoodSearchRequest>,
    ) -> Result<Json<NutritionRecord>, AppError> {
        if request.food_input.trim().is_empty() {
            return Err(AppError::invalid_input("Input cannot be empty"));
        }

        let record = resources.pipeline.get_nutrition(&request.food_input).await?;
        Ok(Json(record))
    }

    /// Voice entry point: transcript text from the speech collaborator
    async fn voice_search(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<VoiceSearchRequest>,
    ) -> Result<Json<NutritionRecord>, AppError> {
        if request.transcript.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Could not understand the audio. Please try again.",
            ));
        }

        info!("Voice transcript received: {} chars", request.transcript.len());

        let record = resources.pipeline.get_nutrition(&request.transcript).await?;
        Ok(Json(record))
    }

    /// Image entry point: detected food names from the vision collaborator
    async fn image_search(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ImageSearchRequest>,
    ) -> Result<Json<NutritionRecord>, AppError> {
        if request.detected_foods.trim().is_empty() {
            return Err(AppError::invalid_input("No food detected in the image"));
        }

        let record = resources
            .pipeline
            .get_nutrition(&request.detected_foods)
            .await?;
        Ok(Json(record))
    }
}
