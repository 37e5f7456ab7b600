// ABOUTME: Route module organization for the Nutrition Gateway HTTP endpoints
// ABOUTME: Thin handlers organized by domain, delegating to the pipeline and provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Route module for the Nutrition Gateway
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the pipeline or provider. Handlers return
//! `Result<Json<T>, AppError>`; the error type maps itself onto the wire.

/// Fitness coach chat endpoint
pub mod chat;
/// Health check and system status routes
pub mod health;
/// Nutrition search endpoints (text, voice-derived, image-derived)
pub mod nutrition;

pub use chat::CoachChatRoutes;
pub use health::HealthRoutes;
pub use nutrition::NutritionRoutes;

use axum::Router;
use std::sync::Arc;

use crate::resources::ServerResources;

/// Assemble the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(NutritionRoutes::routes(Arc::clone(&resources)))
        .merge(CoachChatRoutes::routes(resources))
}
